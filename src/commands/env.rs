use std::sync::{Arc, Mutex};

use arboard::Clipboard;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;
use crate::ui::ToastType;

/// Shared handles every command may need. Cheap to clone.
#[derive(Clone)]
pub struct CommandEnv {
    clipboard: Arc<Mutex<Option<Clipboard>>>,
    app_tx: UnboundedSender<AppMessage>,
}

impl CommandEnv {
    pub fn new(app_tx: UnboundedSender<AppMessage>) -> Self {
        Self {
            clipboard: Arc::new(Mutex::new(None)),
            app_tx,
        }
    }

    pub fn sender(&self) -> UnboundedSender<AppMessage> {
        self.app_tx.clone()
    }

    /// Copy text to the system clipboard.
    ///
    /// The clipboard is opened on first use and kept for the lifetime of
    /// the app, so on X11/Wayland the text stays available after the copy.
    pub fn set_clipboard(&self, text: &str) -> color_eyre::Result<()> {
        let mut guard = self
            .clipboard
            .lock()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to lock clipboard: {e}"))?;

        if guard.is_none() {
            *guard = Some(Clipboard::new()?);
        }
        if let Some(clipboard) = guard.as_mut() {
            clipboard.set_text(text)?;
        }
        Ok(())
    }

    pub fn show_toast(&self, message: impl Into<String>, toast_type: ToastType) {
        let _ = self.app_tx.send(AppMessage::ShowToast {
            message: message.into(),
            toast_type,
        });
    }
}
