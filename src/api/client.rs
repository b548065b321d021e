//! HTTP client for the text-generation endpoint.
//!
//! Every remote or transport failure is converted here into the
//! [`InferenceResult`] union. Callers pattern-match on the outcome; no error
//! type crosses this boundary.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::{GeneratedText, GenerationParameters, InferenceRequest};
use crate::core::constants::REQUEST_TIMEOUT;

/// Outcome of one remote model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceResult {
    Success(String),
    Failure(InferenceFailure),
}

/// Typed failure classification for one inference call. Each kind maps to a
/// fixed user-visible sentence via [`InferenceFailure::user_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceFailure {
    /// HTTP 503: the hosted model is still warming up.
    ModelLoading,
    /// HTTP 401: the bearer token was rejected.
    AuthError,
    /// HTTP 402: inference credits are exhausted.
    QuotaExceeded,
    /// Any other status, including a 200 whose body is not the expected JSON
    /// array shape.
    ServerError { status: u16, body: String },
    /// DNS, connect, or read failure before a status arrived.
    NetworkError(String),
    /// The request exceeded [`REQUEST_TIMEOUT`].
    Timeout,
}

impl InferenceFailure {
    /// The sentence shown as the assistant's reply for this failure.
    pub fn user_message(&self) -> String {
        match self {
            InferenceFailure::ModelLoading => {
                "The model is still loading, try again in a few seconds.".to_string()
            }
            InferenceFailure::AuthError => "Invalid or missing API token.".to_string(),
            InferenceFailure::QuotaExceeded => "You've run out of inference credits.".to_string(),
            InferenceFailure::ServerError { status, body } => format!("Error {status}: {body}"),
            InferenceFailure::NetworkError(detail) => format!("Failed to connect: {detail}"),
            InferenceFailure::Timeout => "The request timed out, try again.".to_string(),
        }
    }
}

/// Client for one configured endpoint. Cheap to clone; the underlying
/// connection pool is shared between clones.
#[derive(Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl InferenceClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_token: api_token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues exactly one POST to the endpoint and classifies the outcome.
    /// No retries, no caching: identical prompts re-query the service.
    pub async fn complete(
        &self,
        prompt: &str,
        params: GenerationParameters,
    ) -> InferenceResult {
        let request = InferenceRequest {
            inputs: prompt.to_string(),
            parameters: params,
        };

        debug!(endpoint = %self.endpoint, "dispatching inference request");
        let response = match self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "inference request failed before a response arrived");
                let failure = if err.is_timeout() {
                    InferenceFailure::Timeout
                } else {
                    InferenceFailure::NetworkError(err.to_string())
                };
                return InferenceResult::Failure(failure);
            }
        };

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(err) => {
                        return InferenceResult::Failure(InferenceFailure::NetworkError(
                            err.to_string(),
                        ))
                    }
                };
                Self::parse_success_body(&body)
            }
            StatusCode::SERVICE_UNAVAILABLE => {
                InferenceResult::Failure(InferenceFailure::ModelLoading)
            }
            StatusCode::UNAUTHORIZED => InferenceResult::Failure(InferenceFailure::AuthError),
            StatusCode::PAYMENT_REQUIRED => {
                InferenceResult::Failure(InferenceFailure::QuotaExceeded)
            }
            other => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<no body>".to_string());
                warn!(status = other.as_u16(), "inference request rejected");
                InferenceResult::Failure(InferenceFailure::ServerError {
                    status: other.as_u16(),
                    body,
                })
            }
        }
    }

    /// A 200 body must be a JSON array whose first element carries
    /// `generated_text`. Anything else is reported as `ServerError(200)`
    /// rather than a parse error escaping to the caller.
    fn parse_success_body(body: &str) -> InferenceResult {
        match serde_json::from_str::<Vec<GeneratedText>>(body) {
            Ok(outputs) => match outputs.first() {
                Some(output) => {
                    InferenceResult::Success(output.generated_text.trim().to_string())
                }
                None => InferenceResult::Failure(InferenceFailure::ServerError {
                    status: 200,
                    body: body.to_string(),
                }),
            },
            Err(_) => InferenceResult::Failure(InferenceFailure::ServerError {
                status: 200,
                body: body.to_string(),
            }),
        }
    }
}
