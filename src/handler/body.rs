//! JSON request body decoding

use crate::validation::{ErrorKind, FieldError, LocPart, Location, ValidationErrors};
use serde_json::{Map, Value};

/// Decode a JSON body; an empty body is `None`
///
/// Malformed JSON is reported at `["body", <byte offset>]`.
pub fn parse_json(body: &[u8]) -> Result<Option<Value>, ValidationErrors> {
    if body.is_empty() {
        return Ok(None);
    }

    serde_json::from_slice(body).map(Some).map_err(|e| {
        let position = byte_offset(body, e.line(), e.column());
        let message = e.to_string();
        let message = message
            .rsplit_once(" at line ")
            .map_or(message.as_str(), |(msg, _)| msg)
            .to_string();
        FieldError::at(
            vec![Location::Body.into(), LocPart::Index(position)],
            ErrorKind::JsonDecode(message),
        )
        .into()
    })
}

/// Body whose fields are embedded by name (`{"item": {...}, "importance": 1}`)
///
/// A missing body behaves like an empty object so each field reports itself missing.
pub fn embedded(body: &[u8]) -> Result<Value, ValidationErrors> {
    Ok(parse_json(body)?.unwrap_or_else(|| Value::Object(Map::new())))
}

/// Root location every body field hangs off
pub fn body_loc() -> Vec<LocPart> {
    vec![Location::Body.into()]
}

/// Convert serde_json's 1-based line/column into a byte offset
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = body
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(body.len())
}
