//! JSON Schema validation layer.
//!
//! The two schema documents are embedded at compile time and compiled once
//! at startup. Validation collects every violation, not just the first.

use foresight_core::error::{ForesightError, Result};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const INPUT_SCHEMA: &str = include_str!("../schemas/generate-input.schema.json");
const OUTPUT_SCHEMA: &str = include_str!("../schemas/artifacts.schema.json");

/// Compiled validators for the generation input and output bundle.
pub struct SchemaValidators {
    input: JSONSchema,
    output: JSONSchema,
}

impl SchemaValidators {
    /// Compile both embedded schemas.
    pub fn new() -> Result<Self> {
        Ok(Self {
            input: compile(INPUT_SCHEMA)?,
            output: compile(OUTPUT_SCHEMA)?,
        })
    }

    /// Validate a generation request body, listing all violations.
    pub fn validate_input(&self, value: &Value) -> std::result::Result<(), Vec<String>> {
        collect(&self.input, value)
    }

    /// Validate a stored artifact bundle before it is returned to a poller.
    pub fn validate_output(&self, value: &Value) -> std::result::Result<(), Vec<String>> {
        collect(&self.output, value)
    }
}

fn compile(raw: &str) -> Result<JSONSchema> {
    let schema: Value =
        serde_json::from_str(raw).map_err(|e| ForesightError::Internal(e.to_string()))?;
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|e| ForesightError::Internal(format!("schema failed to compile: {e}")))
}

fn collect(schema: &JSONSchema, value: &Value) -> std::result::Result<(), Vec<String>> {
    match schema.validate(value) {
        Ok(()) => Ok(()),
        Err(errors) => Err(errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validators() -> SchemaValidators {
        SchemaValidators::new().unwrap()
    }

    #[test]
    fn test_minimal_input_is_valid() {
        let v = validators();
        assert!(v.validate_input(&json!({"question": "What next?"})).is_ok());
    }

    #[test]
    fn test_full_input_is_valid() {
        let v = validators();
        let input = json!({
            "question": "Future of EVs in NYC by 2030?",
            "horizon": 24,
            "location": null,
            "perspective": "we",
            "seed_bias": "exploratory"
        });
        assert!(v.validate_input(&input).is_ok());
    }

    #[test]
    fn test_out_of_enum_horizon_is_rejected() {
        let v = validators();
        let details = v
            .validate_input(&json!({"question": "q", "horizon": 999}))
            .unwrap_err();
        assert!(!details.is_empty());
    }

    #[test]
    fn test_missing_question_lists_violation() {
        let v = validators();
        let details = v.validate_input(&json!({"horizon": 24})).unwrap_err();
        assert!(!details.is_empty());
    }

    #[test]
    fn test_all_violations_are_collected() {
        let v = validators();
        let details = v
            .validate_input(&json!({"horizon": 999, "perspective": "them"}))
            .unwrap_err();
        // missing question + bad horizon + bad perspective
        assert!(details.len() >= 3);
    }

    #[test]
    fn test_generated_bundle_passes_output_schema() {
        let v = validators();
        let input = foresight_core::GenerateInput::question("Will it scale?");
        let bundle = serde_json::to_value(crate::bundle::build_bundle(&input)).unwrap();
        assert!(v.validate_output(&bundle).is_ok());
    }

    #[test]
    fn test_short_bullets_fail_output_schema() {
        let v = validators();
        let input = foresight_core::GenerateInput::question("q");
        let mut bundle = serde_json::to_value(crate::bundle::build_bundle(&input)).unwrap();
        bundle["quick_take"]["bullets"] = json!(["only one"]);
        assert!(v.validate_output(&bundle).is_err());
    }
}
