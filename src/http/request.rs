use std::collections::HashMap;

/// HTTP request methods implemented by the server.
///
/// Anything outside this enum is answered with 501 and otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a file
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches an implemented method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            _ => None,
        }
    }
}

/// Header fields of one request, keyed by case-folded name.
///
/// Names and values are both lowercased during parsing; for duplicate names
/// the first occurrence wins (duplicates of `connection` and
/// `content-length` never get this far).
#[derive(Debug, Clone, Default)]
pub struct Headers {
    fields: HashMap<String, String>,
}

impl Headers {
    pub(crate) fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Retrieves a header value by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Whether the client asked for the connection to be closed after the
    /// current response.
    pub fn connection_close(&self) -> bool {
        self.get("connection") == Some("close")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Represents a parsed and validated HTTP request from a client.
///
/// Exists only for the duration of one dispatch call.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET or HEAD)
    pub method: Method,
    /// The request target (e.g., "/index.html"), always starting with `/`
    pub target: String,
    /// HTTP version token from the request line
    pub version: String,
    /// Request headers
    pub headers: Headers,
}

impl Request {
    /// Whether this request carried `Connection: close`.
    pub fn connection_close(&self) -> bool {
        self.headers.connection_close()
    }
}
