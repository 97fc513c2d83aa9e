use crate::error::Error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

pub fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    // it currently ignores header values with opaque characters
    header_map
        .iter()
        .map(|(k, v)| (String::from(k.as_str()), v.to_str()))
        .filter_map(|(key, value)| value.ok().map(|v| (key, String::from(v))))
        .collect::<HashMap<_, _>>()
}

pub fn put_headers<'a, I: IntoIterator<Item = (&'a String, &'a String)>>(
    header_map: &mut HeaderMap<HeaderValue>,
    headers: I,
) -> Result<(), Error> {
    for (key, value) in headers {
        let header_name = HeaderName::from_lowercase(key.to_lowercase().as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        header_map.append(header_name, header_value);
    }

    Ok(())
}

/// Convert a dot-separated path into a JSON Pointer. An empty path points at
/// the document root.
pub fn json_pointer(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    path.split('.')
        .map(|segment| segment.replace('~', "~0").replace('/', "~1"))
        .fold(String::new(), |mut pointer, segment| {
            pointer.push('/');
            pointer.push_str(&segment);
            pointer
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_pointer() {
        assert_eq!(json_pointer(""), "");
        assert_eq!(json_pointer("title"), "/title");
        assert_eq!(json_pointer("characters.0"), "/characters/0");
        assert_eq!(json_pointer("a/b.c~d"), "/a~1b/c~0d");
    }

    #[test]
    fn test_put_headers_lowercases_names() {
        let mut headers = HashMap::new();
        headers.insert(String::from("Content-Type"), String::from("application/json"));
        let mut header_map = HeaderMap::new();

        put_headers(&mut header_map, &headers).unwrap();

        assert_eq!(
            extract_headers(&header_map).get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_put_headers_rejects_invalid_name() {
        let mut headers = HashMap::new();
        headers.insert(String::from("bad header"), String::from("x"));

        let result = put_headers(&mut HeaderMap::new(), &headers);

        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
