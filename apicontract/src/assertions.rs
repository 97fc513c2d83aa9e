use crate::{error::Error, schema::SchemaValidator, HttpResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Chainable checks on a response. Every check returns the chain back on
/// success, so a test reads as one statement:
///
/// ```no_run
/// # fn check(response: &apicontract::HttpResponse) -> Result<(), apicontract::Error> {
/// response
///     .then()
///     .status_code(200)?
///     .body("title", "A New Hope")?
///     .body("director", "George Lucas")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ResponseAssert<'a> {
    response: &'a HttpResponse,
}

impl<'a> ResponseAssert<'a> {
    pub(crate) fn new(response: &'a HttpResponse) -> Self {
        Self { response }
    }

    pub fn status_code(self, expected: u16) -> Result<Self, Error> {
        let actual = self.response.status_code();
        if actual == expected {
            Ok(self)
        } else {
            Err(Error::UnexpectedStatus { expected, actual })
        }
    }

    /// Check that the value at a dot-separated `path` equals `expected`.
    pub fn body<V: Into<Value>>(self, path: &str, expected: V) -> Result<Self, Error> {
        let expected = expected.into();
        let actual = self.response.field(path)?;

        if actual == Some(&expected) {
            Ok(self)
        } else {
            Err(Error::FieldMismatch {
                path: String::from(path),
                expected,
                actual: actual.cloned(),
            })
        }
    }

    pub fn matches_schema(self, validator: &SchemaValidator) -> Result<Self, Error> {
        validator.validate(self.response.json()?).into_result()?;
        Ok(self)
    }

    /// Finish the chain by mapping the body onto a model.
    pub fn extract<T: DeserializeOwned>(self) -> Result<T, Error> {
        self.response.deserialize()
    }
}
