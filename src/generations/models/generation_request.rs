use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::generations::enums::scheduler::Scheduler;

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.5;
pub const DEFAULT_NUM_INFERENCE_STEPS: u32 = 50;
pub const DEFAULT_NUM_OUTPUTS: u32 = 1;
pub const DEFAULT_PROMPT_STRENGTH: f64 = 0.8;

/// The `input` payload sent to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GenerationRequest {
    #[validate(custom(function = "validate_prompt"))]
    pub prompt: String,
    pub negative_prompt: String,
    #[validate(range(min = 1, message = "width must be greater than 0."))]
    pub width: u32,
    #[validate(range(min = 1, message = "height must be greater than 0."))]
    pub height: u32,
    #[validate(range(min = 0.0, message = "guidance_scale must not be negative."))]
    pub guidance_scale: f64,
    #[validate(range(min = 1, message = "num_inference_steps must be greater than 0."))]
    pub num_inference_steps: u32,
    #[validate(range(min = 1, message = "num_outputs must be greater than 0."))]
    pub num_outputs: u32,
    #[validate(range(
        min = 0.0,
        max = 1.0,
        message = "prompt_strength must be between 0 and 1."
    ))]
    pub prompt_strength: f64,
    pub scheduler: Scheduler,
    /// Omitted from the payload when absent so the service picks a seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            num_inference_steps: DEFAULT_NUM_INFERENCE_STEPS,
            num_outputs: DEFAULT_NUM_OUTPUTS,
            prompt_strength: DEFAULT_PROMPT_STRENGTH,
            scheduler: Scheduler::default(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        let mut error = ValidationError::new("validate_prompt");
        error.message = Some(Cow::from("prompt must not be empty."));
        return Err(error);
    }

    Ok(())
}
