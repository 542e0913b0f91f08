use super::*;

#[test]
fn parse_color_accepts_hex_and_names() {
    assert_eq!(parse_color("#fcd34d"), Some(Color::Rgb(0xFC, 0xD3, 0x4D)));
    assert_eq!(parse_color(" #0f0 "), Some(Color::Rgb(0x00, 0xFF, 0x00)));
    assert_eq!(parse_color("Yellow"), Some(Color::Indexed(3)));
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("#zzzzzz"), None);
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("rgb(1,2,3)"), None);
}

#[test]
fn truecolor_leaves_palette_untouched() {
    let mut theme = UiTheme::dark();
    theme.apply_color_support(TerminalColorSupport::TrueColor);
    assert_eq!(theme, UiTheme::dark());
}

#[test]
fn ansi16_maps_every_color_into_basic_range() {
    let mut theme = UiTheme::light();
    theme.apply_color_support(TerminalColorSupport::Ansi16);

    for color in [theme.background, theme.foreground, theme.selection_bg, theme.gauge_fg] {
        match color {
            Color::Indexed(i) => assert!(i <= 15),
            other => panic!("unexpected color {other:?}"),
        }
    }
}

#[test]
fn ansi256_maps_pure_colors_exactly() {
    assert_eq!(
        map_color_for_support(Color::Rgb(255, 0, 0), TerminalColorSupport::Ansi256),
        Color::Indexed(9)
    );
    assert_eq!(
        map_color_for_support(Color::Indexed(200), TerminalColorSupport::Ansi256),
        Color::Indexed(200)
    );
}

#[test]
fn theme_pair_picks_by_mode() {
    let themes = ThemePair::default();
    assert_eq!(themes.get(true), &UiTheme::dark());
    assert_eq!(themes.get(false), &UiTheme::light());
}

#[test]
fn contrast_follows_luma() {
    assert_eq!(contrast_fg(Color::Rgb(0xFC, 0xD3, 0x4D)), Color::Rgb(0, 0, 0));
    assert_eq!(contrast_fg(Color::Rgb(0x1E, 0x3A, 0x8A)), Color::Rgb(0xFF, 0xFF, 0xFF));
}

#[test]
fn color_support_prefers_override_then_terminal_hints() {
    assert_eq!(
        color_support_from("basic", "truecolor", "xterm-256color"),
        TerminalColorSupport::Ansi16
    );
    assert_eq!(color_support_from("", "24bit", "xterm"), TerminalColorSupport::TrueColor);
    assert_eq!(
        color_support_from("", "", "xterm-256color"),
        TerminalColorSupport::Ansi256
    );
    assert_eq!(color_support_from("bogus", "", "vt100"), TerminalColorSupport::Ansi16);
}

#[test]
fn ansi16_folds_extended_indices_into_basic_range() {
    assert_eq!(
        map_color_for_support(Color::Indexed(196), TerminalColorSupport::Ansi16),
        Color::Indexed(9)
    );
    assert_eq!(
        map_color_for_support(Color::Indexed(4), TerminalColorSupport::Ansi16),
        Color::Indexed(4)
    );
}
