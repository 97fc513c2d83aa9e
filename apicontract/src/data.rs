use crate::{assertions::ResponseAssert, error::Error, util};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{cell::OnceCell, collections::HashMap};

#[derive(Debug, Clone)]
pub struct RequestData {
    pub uri: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// A response captured verbatim. The body is only parsed as JSON when one of
/// the JSON accessors is called, and then at most once.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status_code: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    json: OnceCell<Value>,
}

impl HttpResponse {
    pub fn new<B: Into<Vec<u8>>>(
        status_code: u16,
        headers: HashMap<String, String>,
        body: B,
    ) -> Self {
        Self {
            status_code,
            headers,
            body: body.into(),
            json: OnceCell::new(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header lookup by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body as received, byte for byte.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, or `None` if it is not valid UTF-8.
    pub fn body(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// The body parsed as JSON.
    ///
    /// # Errors
    /// `Error::Deserialization` if the body is not JSON or not valid UTF-8.
    pub fn json(&self) -> Result<&Value, Error> {
        if let Some(value) = self.json.get() {
            return Ok(value);
        }

        let value: Value = serde_json::from_slice(&self.body)?;
        Ok(self.json.get_or_init(|| value))
    }

    /// The value at a dot-separated path (`"title"`, `"characters.0"`), or
    /// `None` if the path does not exist.
    pub fn field(&self, path: &str) -> Result<Option<&Value>, Error> {
        Ok(self.json()?.pointer(&util::json_pointer(path)))
    }

    /// Map the body onto a typed model. Unknown members are ignored; whether
    /// missing members are an error is decided by the model's serde attributes.
    ///
    /// # Errors
    /// `Error::Deserialization` if the body is not JSON or a mapped member has
    /// the wrong type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(T::deserialize(self.json()?)?)
    }

    /// Start a chain of assertions on this response.
    pub fn then(&self) -> ResponseAssert<'_> {
        ResponseAssert::new(self)
    }
}
