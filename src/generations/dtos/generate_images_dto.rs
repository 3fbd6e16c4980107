use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    app::util::form_value,
    generations::{
        enums::scheduler::Scheduler,
        errors::GenerationError,
        models::generation_request::{
            GenerationRequest, DEFAULT_GUIDANCE_SCALE, DEFAULT_HEIGHT, DEFAULT_NUM_INFERENCE_STEPS,
            DEFAULT_NUM_OUTPUTS, DEFAULT_PROMPT_STRENGTH, DEFAULT_WIDTH,
        },
    },
};

/// Raw generation form. Numeric fields arrive as text (or JSON numbers) and
/// are coerced by [`GenerateImagesDto::to_request`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateImagesDto {
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default, deserialize_with = "form_value::deserialize")]
    pub width: Option<String>,
    #[serde(default, deserialize_with = "form_value::deserialize")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "form_value::deserialize")]
    pub guidance_scale: Option<String>,
    #[serde(default, deserialize_with = "form_value::deserialize")]
    pub num_inference_steps: Option<String>,
    #[serde(default, deserialize_with = "form_value::deserialize")]
    pub num_outputs: Option<String>,
    #[serde(default, deserialize_with = "form_value::deserialize")]
    pub prompt_strength: Option<String>,
    #[serde(default)]
    pub scheduler: Option<String>,
    #[serde(default, deserialize_with = "form_value::deserialize")]
    pub seed: Option<String>,
}

impl GenerateImagesDto {
    pub fn to_request(&self) -> Result<GenerationRequest, GenerationError> {
        let request = GenerationRequest {
            prompt: self.prompt.trim().to_string(),
            negative_prompt: self
                .negative_prompt
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            width: coerce_int("width", &self.width, DEFAULT_WIDTH)?,
            height: coerce_int("height", &self.height, DEFAULT_HEIGHT)?,
            guidance_scale: coerce_float("guidance_scale", &self.guidance_scale, DEFAULT_GUIDANCE_SCALE)?,
            num_inference_steps: coerce_int(
                "num_inference_steps",
                &self.num_inference_steps,
                DEFAULT_NUM_INFERENCE_STEPS,
            )?,
            num_outputs: coerce_int("num_outputs", &self.num_outputs, DEFAULT_NUM_OUTPUTS)?,
            prompt_strength: coerce_float(
                "prompt_strength",
                &self.prompt_strength,
                DEFAULT_PROMPT_STRENGTH,
            )?,
            scheduler: match self.scheduler.as_deref().map(str::trim) {
                None | Some("") => Scheduler::default(),
                Some(value) => value.parse()?,
            },
            seed: match self.seed.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(value) => Some(parse_seed(value)?),
            },
        };

        request.validate()?;

        Ok(request)
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, GenerationError> {
    let number: f64 = value.trim().parse().map_err(|_| {
        GenerationError::Validation(format!("{} must be a number, got {:?}.", field, value))
    })?;

    if !number.is_finite() {
        return Err(GenerationError::Validation(format!(
            "{} must be a finite number.",
            field
        )));
    }

    Ok(number)
}

/// Absent fields take the form default; present-but-empty ones are invalid.
fn coerce_float(field: &str, value: &Option<String>, default: f64) -> Result<f64, GenerationError> {
    match value {
        Some(value) => parse_number(field, value),
        None => Ok(default),
    }
}

/// Truncates toward zero. Negative input saturates to 0 so the range rules
/// report it.
fn coerce_int(field: &str, value: &Option<String>, default: u32) -> Result<u32, GenerationError> {
    match value {
        Some(value) => Ok(parse_number(field, value)?.trunc() as u32),
        None => Ok(default),
    }
}

fn parse_seed(value: &str) -> Result<i64, GenerationError> {
    if let Ok(seed) = value.parse::<i64>() {
        return Ok(seed);
    }

    let number = parse_number("seed", value)?.trunc();
    if number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return Err(GenerationError::Validation(format!(
            "seed is out of range, got {:?}.",
            value
        )));
    }

    Ok(number as i64)
}
