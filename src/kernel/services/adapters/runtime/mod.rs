//! Async runtime adapter: executes store calls and sends messages back to the UI layer.

mod message;
mod async_runtime;

pub use message::AppMessage;
pub use async_runtime::AsyncRuntime;
