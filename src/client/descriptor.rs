//! Request descriptors
//!
//! A [`RequestDescriptor`] captures everything a Resource Action Module
//! decides about one call: method, path, query parameters, and body. It is
//! built fresh for every call and never changes after dispatch.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// One outbound API call, fully described.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

/// Body variants a descriptor can carry.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body (GET, DELETE, bare POST)
    Empty,
    /// JSON body, sent with `Content-Type: application/json`
    Json(Value),
    /// Multipart form body; the transport sets its own boundary content type
    Multipart(Vec<Part>),
}

/// One part of a multipart body.
#[derive(Debug, Clone)]
pub enum Part {
    /// A plain text field
    Text { name: String, value: String },
    /// A file upload
    File {
        name: String,
        file_name: String,
        mime: String,
        data: Vec<u8>,
    },
}

impl Part {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            data,
        }
    }
}

impl RequestDescriptor {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        // Serializing plain payload structs to a Value cannot fail in
        // practice; a Null body is the harmless degenerate outcome.
        self.body = RequestBody::Json(serde_json::to_value(body).unwrap_or(Value::Null));
        self
    }

    /// Attach a multipart body
    pub fn multipart(mut self, parts: Vec<Part>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Whether the body is multipart (the JSON content-type default must be
    /// omitted so the transport can set its own boundary header)
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_descriptor() {
        let d = RequestDescriptor::get("/tickets/list")
            .query("page", 2)
            .query("pageSize", 10);
        assert_eq!(d.method(), &Method::GET);
        assert_eq!(d.path(), "/tickets/list");
        assert_eq!(
            d.query_params(),
            &[
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "10".to_string())
            ]
        );
        assert!(matches!(d.body(), RequestBody::Empty));
    }

    #[test]
    fn test_json_body() {
        let d = RequestDescriptor::post("/users/login").json(&json!({"username": "u"}));
        match d.body() {
            RequestBody::Json(value) => assert_eq!(value["username"], "u"),
            _ => panic!("Expected Json body"),
        }
        assert!(!d.is_multipart());
    }

    #[test]
    fn test_multipart_body() {
        let d = RequestDescriptor::post("/tickets/1/attachments").multipart(vec![Part::file(
            "file",
            "photo.jpg",
            "image/jpeg",
            vec![0xff, 0xd8],
        )]);
        assert!(d.is_multipart());
    }
}
