use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_MAX_NEW_TOKENS, DEFAULT_TEMPERATURE};

/// Request body for the hosted text-generation endpoint.
#[derive(Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct GenerationParameters {
    pub temperature: f64,
    pub max_new_tokens: u32,
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            return_full_text: false,
        }
    }
}

/// One element of the success body; the endpoint replies with a JSON array of
/// these and only the first is used.
#[derive(Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

pub mod client;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_the_wire_format() {
        let request = InferenceRequest {
            inputs: "hello".to_string(),
            parameters: GenerationParameters::default(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["inputs"], "hello");
        assert_eq!(body["parameters"]["temperature"], 0.7);
        assert_eq!(body["parameters"]["max_new_tokens"], 512);
        assert_eq!(body["parameters"]["return_full_text"], false);
    }
}
