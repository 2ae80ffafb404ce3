/// Default instruction for `/ask-with-image` when the caller sends none.
pub const DESCRIBE_IMAGE: &str = "Describe this image in detail";

/// Default instruction for `/analyze-image`.
pub const ANALYZE_IMAGE: &str = "\
Analyze this image and identify any:
- Mathematical expressions
- Equations
- Graphs
- Shapes
- Data
Solve anything found.";

/// Fixed instruction for `/save-image`; caller prompts are ignored there.
pub const SOLVE_MATH: &str = "\
Analyze the image for math-related content:
1. Identify all expressions
2. Solve step-by-step
3. Give final answer";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageTask {
  Describe,
  Analyze,
  Solve,
}

/// Pick the outgoing instruction for an image endpoint. Describe and Analyze
/// honor a non-empty caller prompt; Solve always uses the math instruction.
pub fn resolve(task: ImageTask, caller: Option<&str>) -> String {
  let caller = caller.map(str::trim).filter(|prompt| !prompt.is_empty());
  match task {
    ImageTask::Describe => caller.unwrap_or(DESCRIBE_IMAGE).to_string(),
    ImageTask::Analyze => caller.unwrap_or(ANALYZE_IMAGE).to_string(),
    ImageTask::Solve => SOLVE_MATH.to_string(),
  }
}
