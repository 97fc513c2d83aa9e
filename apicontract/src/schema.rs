//! JSON Schema documents and the validator compiled from them.
//!
//! The structural checks themselves (types, required members, nested shapes)
//! are delegated to the `jsonschema` crate. A non-conforming instance is
//! reported as [`ValidationResult::Invalid`] with every violation in the
//! order the engine produced them.

use crate::error::Error;
use jsonschema::Validator;
use serde_json::Value;
use std::{fmt, fs, path::Path};

/// An immutable JSON Schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    name: String,
    value: Value,
}

impl SchemaDocument {
    /// Wrap an already parsed schema, e.g. one built with `serde_json::json!`.
    pub fn from_value<S: Into<String>>(name: S, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Parse a schema from its JSON text.
    ///
    /// # Errors
    /// `Error::Schema` if the text is not JSON.
    pub fn parse<S: Into<String>>(name: S, text: &str) -> Result<Self, Error> {
        let name = name.into();
        let value = serde_json::from_str(text).map_err(|e| Error::Schema {
            name: name.clone(),
            reason: format!("invalid JSON: {}", e),
        })?;

        Ok(Self { name, value })
    }

    /// Load a schema file, naming the document after the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::parse(name, &text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value in the instance.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Ordered, non-empty list of violations of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations {
    schema_name: String,
    violations: Vec<Violation>,
}

impl Violations {
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// The violations rendered as strings, in order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema {}:", self.schema_name)?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Violations),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(violations) => Some(violations),
        }
    }

    /// Turn an `Invalid` outcome into `Error::Validation`.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(violations) => Err(Error::Validation(violations)),
        }
    }
}

/// A validator compiled once from a [`SchemaDocument`] and reusable for any
/// number of instances.
pub struct SchemaValidator {
    schema_name: String,
    validator: Validator,
}

impl SchemaValidator {
    /// Compile the document. The draft is taken from its `$schema` keyword.
    ///
    /// # Errors
    /// `Error::Schema` if the document is not a valid JSON Schema.
    pub fn new(schema: &SchemaDocument) -> Result<Self, Error> {
        let validator = jsonschema::validator_for(schema.as_value()).map_err(|e| Error::Schema {
            name: schema.name().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            schema_name: schema.name().to_string(),
            validator,
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn validate(&self, instance: &Value) -> ValidationResult {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(Violations {
                schema_name: self.schema_name.clone(),
                violations,
            })
        }
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish()
    }
}

/// Compile `schema` and validate a single instance against it.
pub fn validate(schema: &SchemaDocument, instance: &Value) -> Result<ValidationResult, Error> {
    Ok(SchemaValidator::new(schema)?.validate(instance))
}
