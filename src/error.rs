use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Everything a handler can fail with. Request-shape problems the service
/// catches itself are `Validation`; anything the model client reports,
/// including transport failures, is `Upstream`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GatewayError {
  #[error("{0}")]
  Validation(String),
  #[error("{0}")]
  Upstream(String),
}

impl GatewayError {
  /// Attach the per-endpoint message prefix without changing the variant.
  pub fn prefixed(self, prefix: &str) -> Self {
    match self {
      GatewayError::Validation(msg) => GatewayError::Validation(format!("{prefix}: {msg}")),
      GatewayError::Upstream(msg) => GatewayError::Upstream(format!("{prefix}: {msg}")),
    }
  }

  fn status(&self) -> StatusCode {
    match self {
      GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
      GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
  }

  fn code(&self) -> &'static str {
    match self {
      GatewayError::Validation(_) => "invalid_request",
      GatewayError::Upstream(_) => "upstream_error",
    }
  }
}

impl IntoResponse for GatewayError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = Json(serde_json::json!({ "error": self.to_string(), "code": self.code() }));
    (status, body).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prefix_keeps_variant() {
    let err = GatewayError::Upstream("quota exceeded".to_string()).prefixed("Error processing image");
    assert_eq!(
      err,
      GatewayError::Upstream("Error processing image: quota exceeded".to_string())
    );
  }

  #[test]
  fn validation_maps_to_bad_request() {
    let response = GatewayError::Validation("image must not be empty".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn upstream_maps_to_bad_gateway() {
    let response = GatewayError::Upstream("connection refused".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
  }

  #[tokio::test]
  async fn error_body_carries_message_and_code() {
    let err = GatewayError::Upstream("boom".to_string()).prefixed("Error analyzing image");
    let response = err.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Error analyzing image: boom");
    assert_eq!(body["code"], "upstream_error");
    assert!(body.get("success").is_none());
  }
}
