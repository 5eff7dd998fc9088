use serde_json::{Map, Value};

use crate::error::LLMError;

/// Keywords the local validator enforces but which backends either reject or
/// ignore in their structured-output dialects.
const VALIDATION_ONLY_KEYWORDS: &[&str] = &[
    "$schema",
    "additionalProperties",
    "maxLength",
    "minLength",
    "pattern",
];

/// A JSON schema the backend is asked to honour, and that every structured
/// response is validated against before it is handed back.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputContract {
    name: String,
    schema: Value,
}

impl OutputContract {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// The schema as sent over the wire, without validation-only keywords.
    pub fn wire_schema(&self) -> Value {
        strip_validation_keywords(&self.schema)
    }

    /// Parses `text` as JSON and checks it against the full schema.
    ///
    /// Anything short of a complete match is rejected; there is no partial
    /// acceptance.
    pub fn validate(&self, text: &str) -> Result<Value, LLMError> {
        let validator =
            jsonschema::validator_for(&self.schema).map_err(|e| LLMError::InvalidContract {
                contract: self.name.clone(),
                reason: e.to_string(),
            })?;

        let value: Value = serde_json::from_str(text).map_err(|e| self.violation(e))?;

        let errors: Vec<String> = validator
            .iter_errors(&value)
            .map(|error| error.to_string())
            .collect();

        if errors.is_empty() {
            Ok(value)
        } else {
            Err(self.violation(errors.join("; ")))
        }
    }

    pub(crate) fn violation(&self, reason: impl ToString) -> LLMError {
        LLMError::ContractViolation {
            contract: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

fn strip_validation_keywords(schema: &Value) -> Value {
    let Value::Object(map) = schema else {
        return schema.clone();
    };

    let stripped: Map<String, Value> = map
        .iter()
        .filter(|(key, _)| !VALIDATION_ONLY_KEYWORDS.contains(&key.as_str()))
        .map(|(key, value)| {
            let value = match (key.as_str(), value) {
                ("properties", Value::Object(properties)) => Value::Object(
                    properties
                        .iter()
                        .map(|(name, property)| (name.clone(), strip_validation_keywords(property)))
                        .collect(),
                ),
                ("items", items) => strip_validation_keywords(items),
                _ => value.clone(),
            };
            (key.clone(), value)
        })
        .collect();

    Value::Object(stripped)
}
