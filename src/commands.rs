//! Async side effects run outside the event loop.
//!
//! The App spawns each command on the runtime. Results come back as
//! [`AppMessage`](crate::app::AppMessage)s and are applied on the loop.

mod clipboard;
mod editor;
mod env;
mod fetch;

use async_trait::async_trait;
pub use clipboard::CopyToClipboardCmd;
pub use editor::{EditorCommand, open_in_editor};
pub use env::CommandEnv;
pub use fetch::FetchCmd;

#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name, used in logs and error messages.
    fn name(&self) -> String;

    async fn execute(self: Box<Self>) -> color_eyre::Result<()>;
}
