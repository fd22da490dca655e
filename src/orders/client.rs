use tracing::warn;

use crate::config::Config;
use crate::models::order::{SchoolOrderRequest, SchoolOrderResponse};
use crate::orders::OrderError;

/// Submission seam of the group pipeline. The form only talks to this
/// trait, so validation behavior is testable without a network.
#[allow(async_fn_in_trait)]
pub trait SubmitOrder {
    async fn submit(&self, order: &SchoolOrderRequest) -> Result<SchoolOrderResponse, OrderError>;
}

/// HTTP client for the order service. The base URL derives from the shared
/// [`Config`], so client and server can never disagree about the port.
#[derive(Clone)]
pub struct OrderServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl OrderServiceClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.api_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl SubmitOrder for OrderServiceClient {
    async fn submit(&self, order: &SchoolOrderRequest) -> Result<SchoolOrderResponse, OrderError> {
        let url = format!("{}/api/school-orders", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| OrderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("error")?.as_str().map(str::to_string))
                .unwrap_or_else(|| "no error body".to_string());
            warn!(status = status.as_u16(), %message, "Order service returned an error");
            return Err(OrderError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SchoolOrderResponse>()
            .await
            .map_err(|e| OrderError::Network(e.to_string()))
    }
}
