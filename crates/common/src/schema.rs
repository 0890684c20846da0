//! Field-level validation of JSON request bodies.
//!
//! Request types declare their fields through [`RequestSchema`]; a parsed
//! JSON value is checked against that declaration before serde ever sees
//! it, so that every offending field is reported at once with its location.

use serde::Serialize;
use serde_json::Value;

/// Error type reported for a required field that is absent.
pub const MISSING: &str = "missing";
/// Error type reported for a field holding something other than a string.
pub const STRING_TYPE: &str = "string_type";
/// Error type reported when the body is not valid JSON.
pub const JSON_INVALID: &str = "json_invalid";
/// Error type reported when the body is valid JSON but not an object.
pub const MODEL_ATTRIBUTES_TYPE: &str = "model_attributes_type";

/// Declared shape of a single string field in a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub nullable: bool,
}

impl FieldSpec {
    /// A field that must be present and hold a string.
    pub const fn required_string(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            nullable: false,
        }
    }

    /// A field that may be absent, `null`, or a string.
    pub const fn optional_string(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            nullable: true,
        }
    }
}

/// Implemented by request bodies that are validated field by field.
pub trait RequestSchema {
    const FIELDS: &'static [FieldSpec];
}

/// One segment of a [`FieldError`] location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Loc {
    Key(String),
    Offset(usize),
}

impl From<&str> for Loc {
    fn from(key: &str) -> Self {
        Loc::Key(key.to_owned())
    }
}

/// A single validation failure, rendered into the 422 `detail` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<Loc>,
    pub msg: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    pub fn missing(field: &str, input: &Value) -> Self {
        Self {
            kind: MISSING,
            loc: vec!["body".into(), field.into()],
            msg: "Field required".to_string(),
            input: input.clone(),
            ctx: None,
        }
    }

    /// No body was sent at all.
    pub fn missing_body() -> Self {
        Self {
            kind: MISSING,
            loc: vec!["body".into()],
            msg: "Field required".to_string(),
            input: Value::Null,
            ctx: None,
        }
    }

    pub fn string_type(field: &str, input: &Value) -> Self {
        Self {
            kind: STRING_TYPE,
            loc: vec!["body".into(), field.into()],
            msg: "Input should be a valid string".to_string(),
            input: input.clone(),
            ctx: None,
        }
    }

    pub fn not_an_object(input: &Value) -> Self {
        Self {
            kind: MODEL_ATTRIBUTES_TYPE,
            loc: vec!["body".into()],
            msg: "Input should be a valid dictionary or object to extract fields from".to_string(),
            input: input.clone(),
            ctx: None,
        }
    }

    /// `offset` is the byte position in the body where parsing stopped.
    pub fn json_invalid(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            kind: JSON_INVALID,
            loc: vec!["body".into(), Loc::Offset(offset)],
            msg: "JSON decode error".to_string(),
            input: Value::Object(Default::default()),
            ctx: Some(serde_json::json!({ "error": reason.into() })),
        }
    }
}

/// Checks `value` against the fields declared by `T`.
///
/// Errors are returned in declaration order. Fields not declared by `T`
/// are ignored.
pub fn validate<T: RequestSchema>(value: &Value) -> Result<(), Vec<FieldError>> {
    let Some(object) = value.as_object() else {
        return Err(vec![FieldError::not_an_object(value)]);
    };

    let errors: Vec<FieldError> = T::FIELDS
        .iter()
        .filter_map(|spec| match object.get(spec.name) {
            None if spec.required => Some(FieldError::missing(spec.name, value)),
            None => None,
            Some(Value::String(_)) => None,
            Some(Value::Null) if spec.nullable => None,
            Some(other) => Some(FieldError::string_type(spec.name, other)),
        })
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
