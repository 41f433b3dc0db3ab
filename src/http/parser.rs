use std::collections::HashMap;

use crate::http::request::Headers;

const CONTENT_LENGTH: &[u8] = b"content-length";

#[derive(Debug)]
pub enum ParseError {
    InvalidHeader,
    DuplicateHeader,
}

pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: &'a str,
    pub version: &'a str,
}

pub fn split_request_line(line: &str) -> RequestLine<'_> {
    let mut parts = line.splitn(3, ' ');

    RequestLine {
        method: parts.next().unwrap_or(""),
        target: parts.next().unwrap_or(""),
        version: parts.next().unwrap_or(""),
    }
}

// Splits one header line at the first colon. The value starts after any
// spaces following the colon and ends at the next space or the end of the
// line. A line without a colon comes back with an empty value.
pub fn parse_header_field(line: &str) -> (&str, &str) {
    let Some(colon) = line.find(':') else {
        return (line, "");
    };

    let name = &line[..colon];
    let rest = line[colon + 1..].trim_start_matches(' ');
    let value = rest.split(' ').next().unwrap_or("");

    (name, value)
}

/// Walks the header block of one request, line by line, into a `Headers`
/// map keyed by case-folded name.
///
/// A line with an empty name or value is malformed, and `connection` and
/// `content-length` may each appear at most once. Other header names are
/// accepted and ignored by the rest of the pipeline. Trailing text without
/// a line terminator is ignored.
pub fn parse_header_block(block: &str) -> Result<Headers, ParseError> {
    let mut fields = HashMap::new();
    let mut seen_connection = false;
    let mut seen_content_length = false;

    let mut rest = block;
    while let Some(end) = rest.find("\r\n") {
        let line = rest[..end].to_ascii_lowercase();
        rest = &rest[end + 2..];

        let (name, value) = parse_header_field(&line);
        if name.is_empty() || value.is_empty() {
            return Err(ParseError::InvalidHeader);
        }

        match name {
            "connection" => {
                if seen_connection {
                    return Err(ParseError::DuplicateHeader);
                }
                seen_connection = true;
            }
            "content-length" => {
                if seen_content_length {
                    return Err(ParseError::DuplicateHeader);
                }
                seen_content_length = true;
            }
            _ => {}
        }

        fields.entry(name.to_string()).or_insert_with(|| value.to_string());
    }

    Ok(Headers::from_fields(fields))
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

/// Scans the raw buffer for `content-length` occurrences and reports whether
/// any of them declares a body.
///
/// The server accepts no request bodies, so the only tolerated value is a
/// run of `0` digits, optionally surrounded by spaces, ending at a line
/// terminator. The scan is textual: it matches the header name anywhere in
/// the buffered bytes, across all pipelined requests, and stops at the
/// first violation.
pub fn nonzero_content_length(buf: &[u8]) -> bool {
    let mut from = 0;

    while let Some(at) = find_ignore_case(buf, CONTENT_LENGTH, from) {
        // Skip the name and the colon position.
        let mut i = at + CONTENT_LENGTH.len() + 1;

        while buf.get(i) == Some(&b' ') {
            i += 1;
        }
        if buf.get(i) != Some(&b'0') {
            return true;
        }
        while buf.get(i) == Some(&b'0') {
            i += 1;
        }
        while buf.get(i) == Some(&b' ') {
            i += 1;
        }
        if buf.get(i) != Some(&b'\r') || buf.get(i + 1) != Some(&b'\n') {
            return true;
        }

        from = i;
    }

    false
}

fn find_ignore_case(buf: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|i| i + from)
}
