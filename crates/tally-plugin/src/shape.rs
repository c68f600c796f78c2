//! Result-shape classification and element counting

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The JSON type of a response's `result` field
///
/// Only [`ResultShape::Sequence`] is defined for metric derivation;
/// every other shape surfaces a [`ShapeError`] instead of a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// An ordered sequence of values
    Sequence,
    /// A key/value object
    Object,
    /// A number, string, or boolean
    Scalar,
    /// JSON null (or a missing result)
    Null,
}

impl ResultShape {
    /// Classify a result value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => ResultShape::Sequence,
            Value::Object(_) => ResultShape::Object,
            Value::Null => ResultShape::Null,
            _ => ResultShape::Scalar,
        }
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultShape::Sequence => "sequence",
            ResultShape::Object => "object",
            ResultShape::Scalar => "scalar",
            ResultShape::Null => "null",
        };
        write!(f, "{}", name)
    }
}

/// A successful call whose result is not sequence-shaped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected a sequence result, got {shape}")]
pub struct ShapeError {
    /// The shape that was actually observed
    pub shape: ResultShape,
}

/// Count the elements of a sequence-shaped result
pub fn count_elements(value: &Value) -> Result<f64, ShapeError> {
    match value {
        Value::Array(items) => Ok(items.len() as f64),
        other => Err(ShapeError {
            shape: ResultShape::of(other),
        }),
    }
}
