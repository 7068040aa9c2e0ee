use crate::actor::{Actor, Context};
use aso_common::AsoError;
use aso_generation::{traits::SuggestionGenerator, GenerationRequest, SuggestionOutput};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// One generation call. The result comes back on `reply`; cancelling
/// `cancel` resolves it early with [`AsoError::Cancelled`].
pub struct GenerateCmd {
    pub id: Uuid,
    pub request: GenerationRequest,
    pub cancel: CancellationToken,
    pub reply: oneshot::Sender<aso_common::Result<SuggestionOutput>>,
}

pub struct GeneratorActor {
    generator: Arc<dyn SuggestionGenerator + Send + Sync>,
}

impl GeneratorActor {
    pub fn new(generator: Arc<dyn SuggestionGenerator + Send + Sync>) -> Self {
        Self { generator }
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }
}

#[async_trait::async_trait]
impl Actor for GeneratorActor {
    type Msg = GenerateCmd;

    async fn handle(&mut self, msg: Self::Msg, _ctx: &mut Context<Self>) -> Result<()> {
        let GenerateCmd {
            id,
            request,
            cancel,
            reply,
        } = msg;

        tracing::debug!(
            call_id = %id,
            kind = request.kind(),
            generator = self.generator.name(),
            "generator.call.start"
        );

        let result = tokio::select! {
            _ = cancel.cancelled() => Err(AsoError::Cancelled),
            res = self.generator.generate(&request) => res,
        };

        match &result {
            Ok(_) => tracing::debug!(call_id = %id, "generator.call.done"),
            Err(AsoError::Cancelled) => tracing::info!(call_id = %id, "generator.call.cancelled"),
            Err(err) => tracing::warn!(call_id = %id, error = %err, "generator.call.failed"),
        }

        if reply.send(result).is_err() {
            tracing::debug!(call_id = %id, "generator reply dropped");
        }
        Ok(())
    }
}
