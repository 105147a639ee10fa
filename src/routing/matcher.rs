//! Path pattern matching module
//!
//! Patterns are written like `/items/{item_id}`; a `{name:path}` parameter
//! captures the remainder of the path including slashes. Paths are matched
//! after percent-decoding.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// One segment of a compiled path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    Param(&'static str),
    Rest(&'static str),
}

/// Compile a path pattern into segments
pub fn compile(pattern: &'static str) -> Vec<Segment> {
    pattern
        .split('/')
        .skip(1)
        .map(|part| {
            match part
                .strip_prefix('{')
                .and_then(|inner| inner.strip_suffix('}'))
            {
                Some(inner) => match inner.strip_suffix(":path") {
                    Some(name) => Segment::Rest(name),
                    None => Segment::Param(inner),
                },
                None => Segment::Literal(part),
            }
        })
        .collect()
}

/// Decoded path parameters captured by a match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(&'static str, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Percent-decode a request path before matching
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Match a decoded request path against compiled segments
pub fn match_path(segments: &[Segment], path: &str) -> Option<PathParams> {
    let mut parts = path.split('/').skip(1);
    let mut params = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Literal(literal) => {
                if parts.next()? != *literal {
                    return None;
                }
            }
            Segment::Param(name) => {
                let value = parts.next().filter(|value| !value.is_empty())?;
                params.push((*name, value.to_string()));
            }
            Segment::Rest(name) => {
                // Only valid as the final segment
                if index + 1 != segments.len() {
                    return None;
                }
                let first = parts.next()?;
                let rest: Vec<&str> = std::iter::once(first).chain(parts.by_ref()).collect();
                params.push((*name, rest.join("/")));
            }
        }
    }

    if parts.next().is_some() {
        return None;
    }
    Some(PathParams(params))
}
