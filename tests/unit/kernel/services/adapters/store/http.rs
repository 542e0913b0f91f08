use super::*;

#[test]
fn urls_trim_trailing_slash_and_escape_ids() {
    let store = HttpDocumentStore::new("http://localhost:3333/api/", None).unwrap();

    assert_eq!(store.collection_url(), "http://localhost:3333/api/documents");
    assert_eq!(
        store.document_url("novelContentDoc"),
        "http://localhost:3333/api/documents/novelContentDoc"
    );
    assert_eq!(
        store.document_url("a b/c"),
        "http://localhost:3333/api/documents/a%20b%2Fc"
    );
}

#[test]
fn blank_token_is_dropped() {
    let store = HttpDocumentStore::new("http://x", Some("  ".to_string())).unwrap();
    assert!(store.token.is_none());

    let store = HttpDocumentStore::new("http://x", Some("secret".to_string())).unwrap();
    assert_eq!(store.token.as_deref(), Some("secret"));
}

#[test]
fn patch_body_carries_only_set_fields() {
    let json = serde_json::to_value(DocumentPatch::completed(true)).unwrap();
    assert_eq!(json, serde_json::json!({ "completed": true }));

    let json = serde_json::to_value(DocumentPatch::content("T", "<p>b</p>")).unwrap();
    assert_eq!(json, serde_json::json!({ "title": "T", "content": "<p>b</p>" }));
}

#[test]
fn create_body_uses_type_and_content_keys() {
    let json = serde_json::to_value(NewDocument::untitled("novelContent")).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "type": "novelContent",
            "title": "Untitled",
            "content": "",
            "completed": false,
        })
    );
}
