//! Request payload validation for the predict endpoint.
//!
//! The schema is the fixed ten-field feature record. Validation walks every
//! field and aggregates all failures instead of stopping at the first, so a
//! client sees the complete list of problems in a single 400 response.
//! Unknown extra keys are ignored.

use crate::error::{FieldIssue, ServingError, ServingResult};
use serde_json::Value;
use triage_model::{FEATURE_NAMES, NUM_FEATURES};

/// Issue kind for a field absent from the payload.
pub const KIND_MISSING: &str = "missing";

/// Issue kind for a JSON type the schema cannot coerce.
pub const KIND_INVALID_TYPE: &str = "invalid_type";

/// Issue kind for a string that does not parse as a number.
pub const KIND_FLOAT_PARSING: &str = "float_parsing";

/// Issue kind for a value that parses but is NaN or infinite.
pub const KIND_NOT_FINITE: &str = "not_finite";

/// A validated feature record, values held in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [f64; NUM_FEATURES],
}

impl FeatureRecord {
    /// Value for a schema field name.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|field| *field == name)
            .map(|i| self.values[i])
    }

    /// Values in schema order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Reorder the values to match `order`, looking each name up in the
    /// schema. A name outside the schema means the caller's manifest has
    /// drifted from the inputs this service accepts.
    pub fn ordered_by(&self, order: &[String]) -> ServingResult<Vec<f64>> {
        order
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| {
                    ServingError::prediction(format!(
                        "feature {name:?} in the model manifest is not part of the input schema"
                    ))
                })
            })
            .collect()
    }
}

/// Validate a raw request body against the feature schema.
///
/// On failure the returned [`ServingError::InvalidPayload`] carries one
/// issue per failed field, in schema order. A body that is not a JSON
/// object at all yields a single `"body"` issue.
pub fn validate_payload(body: &[u8]) -> ServingResult<FeatureRecord> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            return Err(ServingError::InvalidPayload(vec![FieldIssue::new(
                "body",
                KIND_INVALID_TYPE,
                format!("request body is not valid JSON: {e}"),
            )]));
        }
    };

    let object = match value.as_object() {
        Some(object) => object,
        None => {
            return Err(ServingError::InvalidPayload(vec![FieldIssue::new(
                "body",
                KIND_INVALID_TYPE,
                format!("request body must be a JSON object, got {}", type_name(&value)),
            )]));
        }
    };

    let mut values = [0.0; NUM_FEATURES];
    let mut issues = Vec::new();

    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        match object.get(*name) {
            None => issues.push(FieldIssue::new(*name, KIND_MISSING, "field is required")),
            Some(raw) => match coerce_float(raw) {
                Ok(parsed) if parsed.is_finite() => values[i] = parsed,
                Ok(parsed) => issues.push(FieldIssue::new(
                    *name,
                    KIND_NOT_FINITE,
                    format!("value {parsed} is not a finite number"),
                )),
                Err(issue_kind) => issues.push(FieldIssue::new(
                    *name,
                    issue_kind,
                    describe_failure(issue_kind, raw),
                )),
            },
        }
    }

    if issues.is_empty() {
        Ok(FeatureRecord { values })
    } else {
        Err(ServingError::InvalidPayload(issues))
    }
}

/// Accept JSON numbers and numeric strings, reject everything else.
fn coerce_float(value: &Value) -> Result<f64, &'static str> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(KIND_FLOAT_PARSING),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| KIND_FLOAT_PARSING),
        _ => Err(KIND_INVALID_TYPE),
    }
}

fn describe_failure(kind: &str, value: &Value) -> String {
    match kind {
        KIND_FLOAT_PARSING => format!("could not parse {value} as a number"),
        _ => format!("expected a number, got {}", type_name(value)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
