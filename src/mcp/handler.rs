//! The `rmcp` server handler: identity, version negotiation and the training tool.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, InitializeRequestParam, InitializeResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, tool, tool_handler, tool_router};

use crate::app::pipeline;
use crate::config::ServerConfig;
use crate::domain::TrainRequest;

#[derive(Clone)]
pub struct TrainingServer {
    config: Arc<ServerConfig>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TrainingServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Pipeline failures come back as `{"error": ...}` in a successful result.
    #[tool(
        description = "Train a logistic regression classifier on a CSV file. Every column except \
                       the target is a numeric feature. Returns the held-out accuracy, the \
                       coefficients and the intercept, or {\"error\": message}."
    )]
    async fn train_classifier_from_csv(
        &self,
        Parameters(request): Parameters<TrainRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        // CSV parsing and the solver are CPU-bound.
        let response = tokio::task::spawn_blocking(move || {
            pipeline::train_classifier_from_csv(&request)
        })
        .await
        .map_err(|e| ErrorData::internal_error(format!("training task failed: {e}"), None))?;

        let value = serde_json::to_value(&response)
            .map_err(|e| ErrorData::internal_error(format!("failed to encode result: {e}"), None))?;
        Ok(CallToolResult::structured(value))
    }
}

#[tool_handler]
impl ServerHandler for TrainingServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: self.config.latest_protocol(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: self.config.server_info(),
            instructions: self.config.instructions.clone(),
            ..Default::default()
        }
    }

    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, ErrorData> {
        let protocol_version = self.config.negotiate_protocol(&request.protocol_version);
        tracing::info!(
            client = %request.client_info.name,
            version = %request.client_info.version,
            protocol = ?protocol_version,
            "initialize"
        );
        Ok(InitializeResult {
            protocol_version,
            ..self.get_info()
        })
    }
}
