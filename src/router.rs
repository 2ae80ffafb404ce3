use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::gemini::{LanguageModel, ModelInput};
use crate::image::normalize_base64;
use crate::logger::Logger;
use crate::models::{
  AnalysisResponse, AskParams, AskResponse, ImageRequest, RootResponse, SolveResponse, TextRequest,
};
use crate::prompts::{self, ImageTask};

pub struct RouterState {
  pub config: AppConfig,
  pub model: Arc<dyn LanguageModel>,
  pub logger: Arc<Logger>,
}

pub async fn run_router(listener: tokio::net::TcpListener, state: RouterState) -> anyhow::Result<()> {
  let app = build_router(Arc::new(state));
  axum::serve(listener, app).await?;
  Ok(())
}

pub fn build_router(state: Arc<RouterState>) -> Router {
  let cors = cors_layer(&state.config);
  Router::new()
    .route("/", get(root))
    .route("/ask", get(ask))
    .route("/ask-text", post(ask_text))
    .route("/ask-with-image", post(ask_with_image))
    .route("/analyze-image", post(analyze_image))
    .route("/save-image", post(save_image))
    .layer(cors)
    .with_state(state)
}

// Wildcard plus credentials is rejected by browsers and by tower-http, so the
// two modes are split: mirror any origin without credentials, or allow-list
// with credentials and the methods the service serves.
fn cors_layer(config: &AppConfig) -> CorsLayer {
  if config.allows_any_origin() {
    CorsLayer::new()
      .allow_origin(Any)
      .allow_methods(Any)
      .allow_headers(Any)
  } else {
    let origins: Vec<HeaderValue> = config
      .allowed_origins
      .iter()
      .filter_map(|origin| origin.parse().ok())
      .collect();
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers([header::CONTENT_TYPE])
      .allow_credentials(true)
  }
}

async fn root() -> Json<RootResponse> {
  Json(RootResponse {
    message: "canvas-gateway is running and relaying to Gemini".to_string(),
  })
}

async fn ask(
  State(state): State<Arc<RouterState>>,
  Query(params): Query<AskParams>,
) -> Result<Json<AskResponse>, GatewayError> {
  state.logger.log("INFO", "GET /ask");
  match state.model.invoke(ModelInput::Text(params.prompt)).await {
    Ok(response) => Ok(Json(AskResponse { response })),
    Err(err) => {
      let err = err.prefixed("Error");
      state.logger.log("ERROR", &err.to_string());
      Err(err)
    }
  }
}

async fn ask_text(
  State(state): State<Arc<RouterState>>,
  Json(req): Json<TextRequest>,
) -> Result<Json<AskResponse>, GatewayError> {
  state.logger.log("INFO", "POST /ask-text");
  match state.model.invoke(ModelInput::Text(req.prompt)).await {
    Ok(response) => Ok(Json(AskResponse { response })),
    Err(err) => {
      let err = err.prefixed("Error");
      state.logger.log("ERROR", &err.to_string());
      Err(err)
    }
  }
}

async fn ask_with_image(
  State(state): State<Arc<RouterState>>,
  Json(req): Json<ImageRequest>,
) -> Result<Json<AskResponse>, GatewayError> {
  state.logger.log("INFO", "POST /ask-with-image");
  match relay_image(&state, &req, ImageTask::Describe).await {
    Ok(response) => Ok(Json(AskResponse { response })),
    Err(err) => {
      let err = err.prefixed("Error processing image");
      state.logger.log("ERROR", &err.to_string());
      Err(err)
    }
  }
}

async fn analyze_image(
  State(state): State<Arc<RouterState>>,
  Json(req): Json<ImageRequest>,
) -> Result<Json<AnalysisResponse>, GatewayError> {
  state.logger.log("INFO", "POST /analyze-image");
  match relay_image(&state, &req, ImageTask::Analyze).await {
    Ok(analysis) => Ok(Json(AnalysisResponse {
      analysis,
      success: true,
    })),
    Err(err) => {
      let err = err.prefixed("Error analyzing image");
      state.logger.log("ERROR", &err.to_string());
      Err(err)
    }
  }
}

async fn save_image(
  State(state): State<Arc<RouterState>>,
  Json(req): Json<ImageRequest>,
) -> Result<Json<SolveResponse>, GatewayError> {
  state.logger.log("INFO", "POST /save-image");
  match relay_image(&state, &req, ImageTask::Solve).await {
    Ok(result) => Ok(Json(SolveResponse {
      result,
      success: true,
    })),
    Err(err) => {
      let err = err.prefixed("Error processing image");
      state.logger.log("ERROR", &err.to_string());
      Err(err)
    }
  }
}

/// Shared core of the three image endpoints: validate, strip data-URL
/// prefixes, pick the instruction for the task, invoke the model once.
async fn relay_image(
  state: &RouterState,
  req: &ImageRequest,
  task: ImageTask,
) -> Result<String, GatewayError> {
  if req.image.trim().is_empty() {
    return Err(GatewayError::Validation(
      "image must not be empty".to_string(),
    ));
  }

  let image_base64 = normalize_base64(&req.image);
  let prompt = prompts::resolve(task, req.prompt.as_deref());

  state
    .model
    .invoke(ModelInput::TextWithImage {
      prompt,
      image_base64,
    })
    .await
}
