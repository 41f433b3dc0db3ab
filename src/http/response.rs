use std::collections::HashMap;

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): file found under the served root and returned
/// - `Found` (302): file held by a peer server, redirect issued
/// - `BadRequest` (400): malformed request, connection will be closed
/// - `NotFound` (404): file held neither locally nor by a peer
/// - `NotImplemented` (501): method other than GET/HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200
    Ok,
    /// 302
    Found,
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 501
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the reason phrase emitted on the status line.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "File has been located.",
            StatusCode::Found => "File has been located on correlated server.",
            StatusCode::BadRequest => "Wrong query.",
            StatusCode::NotFound => "Failed to locate file.",
            StatusCode::NotImplemented => "This method is not accepted.",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// `Content-Length` is never added implicitly: bodiless responses carry no
/// headers beyond the ones set here, and a HEAD response states the length
/// of a body it does not send. Callers that attach a body set the header
/// themselves.
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates the 400 response. It always announces the connection closure
    /// that follows it.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest)
            .header("Connection", "close")
            .build()
    }

    /// Creates the bare 404 response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound).build()
    }

    /// Creates the 501 response for methods the server does not implement.
    pub fn not_implemented() -> Self {
        ResponseBuilder::new(StatusCode::NotImplemented).build()
    }

    /// Creates a 302 response pointing at a peer server.
    pub fn redirect(location: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::Found)
            .header("Location", location)
            .build()
    }
}
