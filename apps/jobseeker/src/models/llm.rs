use serde::{Deserialize, Serialize};

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// An entry of the selectable LLM catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelName {
    /// Identifier shown to the user and sent back as `ModelParameters::name`.
    pub llm_alias: String,
    /// Provider model id, informational only.
    #[serde(default)]
    pub llm_value: String,
}

/// Model choice sent with every parse/generate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub name: String,
    pub temperature: f32,
}

impl ModelParameters {
    /// Builds parameters with the temperature clamped to the slider range.
    pub fn new(name: impl Into<String>, temperature: f32) -> Self {
        Self {
            name: name.into(),
            temperature: clamp_temperature(temperature),
        }
    }
}

/// Clamps to `[MIN_TEMPERATURE, MAX_TEMPERATURE]` and rounds to the 0.01 slider step.
pub fn clamp_temperature(temperature: f32) -> f32 {
    if temperature.is_nan() {
        return DEFAULT_TEMPERATURE;
    }
    let clamped = temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
    (clamped * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_temperature(-1.0), 0.0);
        assert_eq!(clamp_temperature(3.5), 2.0);
        assert_eq!(clamp_temperature(f32::NAN), DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_clamp_rounds_to_step() {
        assert!((clamp_temperature(0.456) - 0.46).abs() < 1e-6);
    }

    #[test]
    fn test_model_name_without_value() {
        let name: ModelName = serde_json::from_str(r#"{"llm_alias": "GPT4_O"}"#).unwrap();
        assert_eq!(name.llm_alias, "GPT4_O");
        assert!(name.llm_value.is_empty());
    }
}
