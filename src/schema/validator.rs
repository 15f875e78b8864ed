//! Form validation against the embedded schemas
//!
//! Violations are mapped to per-field issues so an error on one field never
//! blocks or obscures another.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{validator_for, Validator as JsonValidator};
use miette::Diagnostic;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use thiserror::Error;

use crate::schema::registry::{FormKind, SchemaRegistry};

#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("missing embedded schema for form: {0}")]
    #[diagnostic(code(bmv::schema::missing))]
    Missing(&'static str),

    #[error("embedded schema for {form} failed to compile: {message}")]
    #[diagnostic(code(bmv::schema::compile))]
    Compile { form: &'static str, message: String },
}

/// A single field-local validation issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Compiled validators for every form the client knows
pub struct FormValidator {
    validators: HashMap<FormKind, JsonValidator>,
}

impl FormValidator {
    /// Compile all embedded schemas
    pub fn new() -> Result<Self, SchemaError> {
        let registry = SchemaRegistry::new();
        let mut validators = HashMap::new();
        for kind in [FormKind::Register, FormKind::Login] {
            let raw = registry
                .get(kind)
                .ok_or(SchemaError::Missing(kind.as_str()))?;
            let schema: JsonValue =
                serde_json::from_str(&raw).map_err(|e| SchemaError::Compile {
                    form: kind.as_str(),
                    message: e.to_string(),
                })?;
            let validator = validator_for(&schema).map_err(|e| SchemaError::Compile {
                form: kind.as_str(),
                message: e.to_string(),
            })?;
            validators.insert(kind, validator);
        }
        Ok(Self { validators })
    }

    /// Validate a form instance, returning one issue per offending field
    pub fn validate(&self, kind: FormKind, instance: &JsonValue) -> Vec<FieldIssue> {
        let validator = &self.validators[&kind];
        let mut issues: Vec<FieldIssue> = Vec::new();

        for error in validator.iter_errors(instance) {
            let field = match &error.kind {
                ValidationErrorKind::Required { property } => property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string()),
                _ => {
                    let pointer = error.instance_path.to_string();
                    match pointer.rsplit('/').next() {
                        Some(seg) if !seg.is_empty() => seg.to_string(),
                        _ => continue,
                    }
                }
            };
            if issues.iter().any(|i| i.field == field) {
                continue;
            }
            let message = field_message(&field)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            issues.push(FieldIssue { field, message });
        }

        issues
    }
}

/// User-facing message per field, mirroring the form's inline hints
fn field_message(field: &str) -> Option<&'static str> {
    match field {
        "full_name" => Some("Full Name is required"),
        "email" => Some("Invalid email address"),
        "contact" => Some("Invalid phone number"),
        "password" => Some("Password must be at least 6 characters"),
        "category" => Some("Category is required"),
        "service" => Some("Service is required"),
        _ => None,
    }
}
