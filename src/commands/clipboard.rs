use async_trait::async_trait;
use color_eyre::Result;
use tracing::debug;

use crate::commands::{Command, CommandEnv};
use crate::ui::ToastType;

/// Copies resource JSON to the clipboard and confirms with a toast.
pub struct CopyToClipboardCmd {
    env: CommandEnv,
    text: String,
    toast_message: String,
}

impl CopyToClipboardCmd {
    pub fn new(env: CommandEnv, text: impl Into<String>, toast_message: impl Into<String>) -> Self {
        Self {
            env,
            text: text.into(),
            toast_message: toast_message.into(),
        }
    }
}

#[async_trait]
impl Command for CopyToClipboardCmd {
    fn name(&self) -> String {
        "Copy to clipboard".to_string()
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        self.env.set_clipboard(&self.text)?;
        debug!(bytes = self.text.len(), "Copied to clipboard");
        self.env.show_toast(self.toast_message, ToastType::Success);
        Ok(())
    }
}
