use tracing::debug;

use crate::http::HTTP_VERSION;
use crate::http::parser::{parse_header_block, split_request_line};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::route::Router;

/// What the connection loop should do after one request has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Request answered, keep draining the buffer.
    Continue,
    /// Method not implemented; answered with 501, connection stays open.
    MethodUnsupported,
    /// Malformed request; answered with 400, remaining buffered requests
    /// are abandoned and the connection closes.
    FatalMalformed,
}

/// Result of dispatching one complete request span.
#[derive(Debug)]
pub struct Dispatch {
    pub response: Response,
    pub outcome: DispatchOutcome,
    pub close_requested: bool,
}

impl Dispatch {
    fn malformed() -> Self {
        Self {
            response: Response::bad_request(),
            outcome: DispatchOutcome::FatalMalformed,
            close_requested: true,
        }
    }
}

/// Validates one complete request (status line + header block, with the
/// final `\r\n\r\n` already stripped down to a single trailing `\r\n`) and
/// picks its response.
///
/// The method is checked first: an unimplemented method is answered with
/// 501 without looking at the rest of the request, and is not a protocol
/// error. After that, a version other than HTTP/1.1, a target that is empty
/// or does not start with `/`, or a header block that fails validation all
/// make the request malformed.
pub async fn dispatch(span: &[u8], router: &Router) -> Dispatch {
    let Ok(text) = std::str::from_utf8(span) else {
        debug!("Request is not valid UTF-8");
        return Dispatch::malformed();
    };

    let (request_line, header_block) = text.split_once("\r\n").unwrap_or((text, ""));
    let line = split_request_line(request_line);

    let Some(method) = Method::from_str(line.method) else {
        debug!("Method not accepted: {:?}", line.method);
        return Dispatch {
            response: Response::not_implemented(),
            outcome: DispatchOutcome::MethodUnsupported,
            close_requested: false,
        };
    };

    if line.version != HTTP_VERSION || line.target.is_empty() || !line.target.starts_with('/') {
        debug!("Rejecting request line {:?}", request_line);
        return Dispatch::malformed();
    }

    let headers = match parse_header_block(header_block) {
        Ok(headers) => headers,
        Err(e) => {
            debug!("Rejecting headers: {:?}", e);
            return Dispatch::malformed();
        }
    };

    let request = Request {
        method,
        target: line.target.to_string(),
        version: line.version.to_string(),
        headers,
    };
    let close_requested = request.connection_close();

    Dispatch {
        response: router.route(&request).await,
        outcome: DispatchOutcome::Continue,
        close_requested,
    }
}
