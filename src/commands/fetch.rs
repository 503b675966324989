use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::app::AppMessage;
use crate::commands::Command;
use crate::service::{FetchRequest, Services};

/// Runs one [`FetchRequest`] and posts the outcome back to the loop,
/// tagged with the generation it was started under.
pub struct FetchCmd {
    services: Arc<Services>,
    generation: u64,
    request: FetchRequest,
    app_tx: UnboundedSender<AppMessage>,
}

impl FetchCmd {
    pub const fn new(
        services: Arc<Services>,
        generation: u64,
        request: FetchRequest,
        app_tx: UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            services,
            generation,
            request,
            app_tx,
        }
    }
}

#[async_trait]
impl Command for FetchCmd {
    fn name(&self) -> String {
        self.request.describe()
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        let outcome = self
            .services
            .fetch(&self.request)
            .await
            .map_err(|err| err.to_string());
        match &outcome {
            Ok(_) => debug!(request = ?self.request, region = self.services.region(), "Fetch finished"),
            Err(err) => warn!(request = ?self.request, error = %err, "Fetch failed"),
        }
        self.app_tx.send(AppMessage::Fetched {
            generation: self.generation,
            request: self.request,
            outcome,
        })?;
        Ok(())
    }
}
