//! Negotiation backend client
//!
//! This service wraps the two remote operations of the negotiation backend:
//! generating a negotiation message from market data and delivering a message
//! through a channel such as email. Calls are issued at most once; there is
//! no retry and no caching.

use std::future::Future;
use std::time::Instant;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;
use crate::config::BackendConfig;
use crate::models::{
    DeliveryMethod, NegotiationRequest, NegotiationResponse, SendMessageRequest,
    SendMessageResponse, Tone,
};
use crate::utils::errors::{BackendError, BackendResult, NegotiatorError, Result};
use crate::utils::logging::log_backend_call;

const NEGOTIATE_PATH: &str = "api/negotiate";
const SEND_PATH: &str = "api/send";

/// Remote operations the conversation depends on
pub trait NegotiationApi: Send + Sync + 'static {
    /// Analyze the market for a product and generate a negotiation message
    fn generate_negotiation(
        &self,
        product_name: &str,
        current_price: f64,
        tone: Tone,
    ) -> impl Future<Output = BackendResult<NegotiationResponse>> + Send;

    /// Deliver a message through the given channel
    fn send_message(
        &self,
        message: &str,
        method: DeliveryMethod,
        recipient: Option<&str>,
    ) -> impl Future<Output = BackendResult<SendMessageResponse>> + Send;
}

/// HTTP client for the negotiation backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new BackendClient instance
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(NegotiatorError::Http)?;

        // A trailing slash makes `join` append instead of replacing the last segment
        let mut base_url = Url::parse(&config.api_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> BackendResult<Response> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        debug!(url = %url, "Making backend API request");

        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else if e.is_connect() {
                    BackendError::ServiceUnavailable
                } else {
                    BackendError::RequestFailed(e.to_string())
                }
            })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::RequestFailed(format!("HTTP {}: {}", status, error_text)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    async fn request_negotiation(&self, request: &NegotiationRequest) -> BackendResult<NegotiationResponse> {
        let response = self.post(NEGOTIATE_PATH, request).await?;
        let negotiation: NegotiationResponse = Self::decode(response).await?;

        if !negotiation.success {
            return Err(BackendError::NegotiationUnsuccessful);
        }

        debug!(
            suggested_price = negotiation.suggested_price,
            competitors = negotiation.competitor_prices.len(),
            "Received negotiation analysis"
        );
        Ok(negotiation)
    }

    async fn request_delivery(&self, request: &SendMessageRequest) -> BackendResult<SendMessageResponse> {
        let response = self.post(SEND_PATH, request).await?;
        let delivery: SendMessageResponse = Self::decode(response).await?;

        if delivery.success == Some(false) {
            return Err(BackendError::DeliveryRejected(format!(
                "backend reported failure for {:?} delivery",
                request.method
            )));
        }

        Ok(delivery)
    }
}

impl NegotiationApi for BackendClient {
    async fn generate_negotiation(
        &self,
        product_name: &str,
        current_price: f64,
        tone: Tone,
    ) -> BackendResult<NegotiationResponse> {
        let request = NegotiationRequest {
            product_name: product_name.to_string(),
            current_price,
            desired_price: None,
            tone,
        };

        let started = Instant::now();
        let result = self.request_negotiation(&request).await;
        log_backend_call("negotiate", started.elapsed().as_millis() as u64, result.is_ok());
        result
    }

    async fn send_message(
        &self,
        message: &str,
        method: DeliveryMethod,
        recipient: Option<&str>,
    ) -> BackendResult<SendMessageResponse> {
        let request = SendMessageRequest {
            message: message.to_string(),
            method,
            recipient: recipient.map(str::to_string),
        };

        let started = Instant::now();
        let result = self.request_delivery(&request).await;
        log_backend_call("send", started.elapsed().as_millis() as u64, result.is_ok());
        result
    }
}
