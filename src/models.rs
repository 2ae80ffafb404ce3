use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct TextRequest {
  pub prompt: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ImageRequest {
  pub image: String,
  pub prompt: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct AskParams {
  pub prompt: String,
}

#[derive(Serialize, Deserialize)]
pub struct RootResponse {
  pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
  pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
  pub analysis: String,
  pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SolveResponse {
  pub result: String,
  pub success: bool,
}
