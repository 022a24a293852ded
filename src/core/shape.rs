//! Shape descriptors: the declared contract for input and output records.
//!
//! A [`Shape`] is an ordered list of named fields with primitive types and
//! optional enum constraints. Shapes are declared once per flow at process
//! start and never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::record::Record;

/// The primitive type of a single field.
///
/// `Json` marks a string-encoded JSON blob: the library passes the serialized
/// text through to the model verbatim and never parses the nested structure
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Str,
    Number,
    Bool,
    Enum(Vec<String>),
    Json,
}

impl FieldType {
    /// An enum constraint over the given set of allowed string values.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldType::Enum(values.into_iter().map(Into::into).collect())
    }
}

/// A single declared field in a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub description: String,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            field_type,
            required: true,
        }
    }
}

/// One reason a record failed validation against a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// A required field is absent.
    Missing,
    /// The field is present but carries the wrong primitive type.
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
    /// The field is a string but not one of the declared enum values.
    NotInEnum { allowed: Vec<String>, actual: String },
    /// The record carries a field the shape does not declare.
    Undeclared,
    /// The raw text could not be read as a JSON object at all.
    Malformed(String),
}

impl Violation {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Missing,
        }
    }

    pub fn wrong_type(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::WrongType { expected, actual },
        }
    }

    pub fn not_in_enum(
        field: impl Into<String>,
        allowed: Vec<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::NotInEnum {
                allowed,
                actual: actual.into(),
            },
        }
    }

    pub fn undeclared(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Undeclared,
        }
    }

    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Malformed(reason.into()),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "field '{}' is required but missing", self.field),
            ViolationKind::WrongType { expected, actual } => write!(
                f,
                "field '{}' expected {} but got {}",
                self.field, expected, actual
            ),
            ViolationKind::NotInEnum { allowed, actual } => write!(
                f,
                "field '{}' value '{}' is not one of [{}]",
                self.field,
                actual,
                allowed.join(", ")
            ),
            ViolationKind::Undeclared => {
                write!(f, "field '{}' is not declared by the shape", self.field)
            }
            ViolationKind::Malformed(reason) => {
                write!(f, "'{}' is not a JSON object: {}", self.field, reason)
            }
        }
    }
}

/// An ordered set of field declarations for an input or output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub fields: Vec<FieldSpec>,
}

impl Shape {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a required field to the shape.
    pub fn field(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec::new(name, field_type, description));
        self
    }

    /// Add an optional field to the shape.
    pub fn optional(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
    ) -> Self {
        let mut spec = FieldSpec::new(name, field_type, description);
        spec.required = false;
        self.fields.push(spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check a caller-supplied record against this shape.
    ///
    /// Required fields must be present, types must match, enum values must be
    /// within their declared sets. Fields the shape does not declare are
    /// rejected rather than silently dropped from the rendered prompt.
    pub fn validate(&self, record: &Record) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();

        for spec in &self.fields {
            match record.get(&spec.name) {
                Some(value) => check_value(spec, value, &mut violations),
                None if spec.required => violations.push(Violation::missing(&spec.name)),
                None => {}
            }
        }

        for name in record.keys() {
            if self.get(name).is_none() {
                violations.push(Violation::undeclared(name));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Project a raw service response onto this shape.
    ///
    /// Declared fields are checked and kept in declaration order; undeclared
    /// fields in the response are dropped (the contract only covers declared
    /// fields). A `Json` field accepts a string verbatim and coerces a
    /// structured value to its JSON text. Any violation fails the whole
    /// projection; a partially valid record is never produced.
    pub fn project(&self, response: &Map<String, Value>) -> Result<Record, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut record = Record::new();

        for spec in &self.fields {
            match response.get(&spec.name) {
                Some(value) => {
                    let before = violations.len();
                    check_value(spec, value, &mut violations);
                    let coerced = match (&spec.field_type, value) {
                        (FieldType::Json, v @ (Value::Object(_) | Value::Array(_))) => {
                            Value::String(v.to_string())
                        }
                        _ => value.clone(),
                    };
                    if violations.len() == before {
                        record.insert(&spec.name, coerced);
                    }
                }
                None if spec.required => violations.push(Violation::missing(&spec.name)),
                None => {}
            }
        }

        for name in response.keys() {
            if self.get(name).is_none() {
                log::warn!("service response carried undeclared field '{}', dropping", name);
            }
        }

        if violations.is_empty() {
            Ok(record)
        } else {
            Err(violations)
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::new()
    }
}

fn check_value(spec: &FieldSpec, value: &Value, violations: &mut Vec<Violation>) {
    let actual = json_type_name(value);
    match &spec.field_type {
        FieldType::Str => {
            if !value.is_string() {
                violations.push(Violation::wrong_type(&spec.name, "string", actual));
            }
        }
        FieldType::Number => {
            if !value.is_number() {
                violations.push(Violation::wrong_type(&spec.name, "number", actual));
            }
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                violations.push(Violation::wrong_type(&spec.name, "boolean", actual));
            }
        }
        FieldType::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => {}
            Some(s) => violations.push(Violation::not_in_enum(&spec.name, allowed.clone(), s)),
            None => violations.push(Violation::wrong_type(&spec.name, "string", actual)),
        },
        FieldType::Json => {
            // Structured values are coerced during projection; for inputs the
            // caller must hand over the serialized text.
            if !value.is_string() && !value.is_object() && !value.is_array() {
                violations.push(Violation::wrong_type(&spec.name, "json string", actual));
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn risk_shape() -> Shape {
        Shape::new()
            .field("risk_score", FieldType::Number, "Risk score from 0 to 100.")
            .field(
                "risk_level",
                FieldType::enumeration(["Low", "Medium", "High", "Critical"]),
                "Categorized risk level.",
            )
    }

    #[test]
    fn test_validate_accepts_conforming_record() {
        let record = Record::new().with("risk_score", 45).with("risk_level", "Medium");
        assert!(risk_shape().validate(&record).is_ok());
    }

    #[test]
    fn test_validate_reports_missing_required_field() {
        let record = Record::new().with("risk_score", 45);
        let violations = risk_shape().validate(&record).unwrap_err();
        assert_eq!(violations, vec![Violation::missing("risk_level")]);
    }

    #[test]
    fn test_validate_rejects_enum_value_outside_set() {
        let record = Record::new().with("risk_score", 45).with("risk_level", "Extreme");
        let violations = risk_shape().validate(&record).unwrap_err();
        assert!(matches!(violations[0].kind, ViolationKind::NotInEnum { .. }));
    }

    #[test]
    fn test_validate_rejects_undeclared_field() {
        let record = Record::new()
            .with("risk_score", 45)
            .with("risk_level", "Low")
            .with("extra", "value");
        let violations = risk_shape().validate(&record).unwrap_err();
        assert_eq!(violations, vec![Violation::undeclared("extra")]);
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let shape = Shape::new()
            .field("a", FieldType::Str, "")
            .optional("b", FieldType::Str, "");
        let record = Record::new().with("a", "x");
        assert!(shape.validate(&record).is_ok());
    }

    #[test]
    fn test_project_keeps_declaration_order_and_drops_undeclared() {
        let shape = Shape::new()
            .field("summary", FieldType::Str, "")
            .field("threats_found", FieldType::Bool, "");
        let response = json!({
            "threats_found": true,
            "noise": 1,
            "summary": "all clear"
        });
        let record = shape.project(response.as_object().unwrap()).unwrap();
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["summary", "threats_found"]);
        assert!(record.get("noise").is_none());
    }

    #[test]
    fn test_project_fails_whole_record_on_single_violation() {
        let shape = Shape::new()
            .field("summary", FieldType::Str, "")
            .field("threats_found", FieldType::Bool, "");
        let response = json!({ "summary": "ok", "threats_found": "yes" });
        let violations = shape.project(response.as_object().unwrap()).unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::wrong_type("threats_found", "boolean", "string")]
        );
    }

    #[test]
    fn test_project_coerces_structured_json_field_to_text() {
        let shape = Shape::new().field("metrics", FieldType::Json, "");
        let response = json!({ "metrics": { "cpu": 93 } });
        let record = shape.project(response.as_object().unwrap()).unwrap();
        assert_eq!(record.get("metrics").unwrap().as_str().unwrap(), r#"{"cpu":93}"#);
    }
}
