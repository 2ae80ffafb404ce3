use async_trait::async_trait;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::GatewayError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// What a handler sends upstream: a bare prompt, or a prompt plus one inline
/// base64 image.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelInput {
  Text(String),
  TextWithImage { prompt: String, image_base64: String },
}

/// The single capability the gateway needs from a model provider. Handlers
/// hold an `Arc<dyn LanguageModel>` so tests can substitute a mock.
#[async_trait]
pub trait LanguageModel: Send + Sync {
  async fn invoke(&self, input: ModelInput) -> Result<String, GatewayError>;
}

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
  parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
  #[serde(skip_serializing_if = "Option::is_none")]
  text: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  inline_data: Option<InlineData>,
}

#[derive(Serialize)]
struct InlineData {
  mime_type: String,
  data: String,
}

fn build_payload(input: &ModelInput) -> GenerateContentRequest {
  let parts = match input {
    ModelInput::Text(prompt) => vec![Part {
      text: Some(prompt.clone()),
      inline_data: None,
    }],
    ModelInput::TextWithImage {
      prompt,
      image_base64,
    } => vec![
      Part {
        text: Some(prompt.clone()),
        inline_data: None,
      },
      Part {
        text: None,
        inline_data: Some(InlineData {
          // Always declared PNG, whatever the caller uploaded; Gemini
          // tolerates the mismatch for JPEG payloads.
          mime_type: "image/png".to_string(),
          data: image_base64.clone(),
        }),
      },
    ],
  };

  GenerateContentRequest {
    contents: vec![Content { parts }],
  }
}

fn extract_text(body: &serde_json::Value) -> Option<String> {
  body["candidates"][0]["content"]["parts"][0]["text"]
    .as_str()
    .map(str::to_string)
}

/// Long-lived Gemini client: one reqwest client, one model id, one API key,
/// all fixed at startup.
pub struct GeminiClient {
  http: reqwest::Client,
  api_key: String,
  model: String,
}

impl GeminiClient {
  pub fn new(config: &AppConfig) -> Self {
    Self {
      http: reqwest::Client::new(),
      api_key: config.gemini_api_key.clone(),
      model: config.model.trim().trim_start_matches("models/").to_string(),
    }
  }
}

#[async_trait]
impl LanguageModel for GeminiClient {
  async fn invoke(&self, input: ModelInput) -> Result<String, GatewayError> {
    let url = format!(
      "{GEMINI_BASE_URL}/{}:generateContent?key={}",
      self.model, self.api_key
    );

    let resp = self
      .http
      .post(&url)
      .json(&build_payload(&input))
      .send()
      .await
      .map_err(|err| GatewayError::Upstream(err.to_string()))?;

    let status = resp.status();
    let body: serde_json::Value = resp
      .json()
      .await
      .map_err(|err| GatewayError::Upstream(err.to_string()))?;

    if !status.is_success() {
      return Err(GatewayError::Upstream(format!(
        "Gemini HTTP {status}: {body}"
      )));
    }

    extract_text(&body)
      .ok_or_else(|| GatewayError::Upstream("Gemini returned no text candidate".to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_payload_has_single_text_part() {
    let payload = build_payload(&ModelInput::Text("2+2".to_string()));
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["contents"][0]["parts"][0]["text"], "2+2");
    assert!(value["contents"][0]["parts"].as_array().unwrap().len() == 1);
    assert!(value["contents"][0]["parts"][0].get("inline_data").is_none());
  }

  #[test]
  fn multimodal_payload_declares_png() {
    let payload = build_payload(&ModelInput::TextWithImage {
      prompt: "Solve this".to_string(),
      image_base64: "QQ==".to_string(),
    });
    let value = serde_json::to_value(&payload).unwrap();
    let parts = value["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["text"], "Solve this");
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
    assert_eq!(parts[1]["inline_data"]["data"], "QQ==");
  }

  #[test]
  fn extracts_first_candidate_text() {
    let body = serde_json::json!({
      "candidates": [{
        "content": { "parts": [{ "text": "The answer is 4." }] }
      }]
    });
    assert_eq!(extract_text(&body), Some("The answer is 4.".to_string()));
  }

  #[test]
  fn missing_candidate_yields_none() {
    let body = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
    assert_eq!(extract_text(&body), None);
  }
}
