//! Field-level validation errors
//!
//! Every rejected input is reported as a [`FieldError`] carrying its location
//! (`["query", "skip"]`, `["body", "item", "price"]`, ...) and the violated rule.
//! Errors are aggregated into [`ValidationErrors`] so a single response can
//! enumerate every offending field.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Where a parameter was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Path,
    Query,
    Body,
}

impl Location {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

/// One segment of an error location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocPart {
    Key(String),
    Index(usize),
}

impl From<&str> for LocPart {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<Location> for LocPart {
    fn from(location: Location) -> Self {
        Self::Key(location.as_str().to_string())
    }
}

/// The rule a field violated
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Missing,
    NoneNotAllowed,
    NotInteger,
    NotFloat,
    NotBool,
    NotStr,
    NotDict,
    Ge(i64),
    Lt(i64),
    Le(i64),
    MaxItems(usize),
    Enum(Vec<&'static str>),
    JsonDecode(String),
    /// A form part that should have been a file carried plain text
    NotUpload,
}

impl ErrorKind {
    pub fn message(&self) -> String {
        match self {
            Self::Missing => "field required".to_string(),
            Self::NoneNotAllowed => "none is not an allowed value".to_string(),
            Self::NotInteger => "value is not a valid integer".to_string(),
            Self::NotFloat => "value is not a valid float".to_string(),
            Self::NotBool => "value could not be parsed to a boolean".to_string(),
            Self::NotStr => "str type expected".to_string(),
            Self::NotDict => "value is not a valid dict".to_string(),
            Self::Ge(limit) => format!("ensure this value is greater than or equal to {limit}"),
            Self::Lt(limit) => format!("ensure this value is less than {limit}"),
            Self::Le(limit) => format!("ensure this value is less than or equal to {limit}"),
            Self::MaxItems(limit) => format!("ensure this value has at most {limit} items"),
            Self::Enum(permitted) => {
                let quoted: Vec<String> = permitted.iter().map(|v| format!("'{v}'")).collect();
                format!(
                    "value is not a valid enumeration member; permitted: {}",
                    quoted.join(", ")
                )
            }
            Self::JsonDecode(msg) => msg.clone(),
            Self::NotUpload => "Expected UploadFile, received: <class 'str'>".to_string(),
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Missing => "value_error.missing",
            Self::NoneNotAllowed => "type_error.none.not_allowed",
            Self::NotInteger => "type_error.integer",
            Self::NotFloat => "type_error.float",
            Self::NotBool => "type_error.bool",
            Self::NotStr => "type_error.str",
            Self::NotDict => "type_error.dict",
            Self::Ge(_) => "value_error.number.not_ge",
            Self::Lt(_) => "value_error.number.not_lt",
            Self::Le(_) => "value_error.number.not_le",
            Self::MaxItems(_) => "value_error.list.max_items",
            Self::Enum(_) => "type_error.enum",
            Self::JsonDecode(_) => "value_error.jsondecode",
            Self::NotUpload => "value_error",
        }
    }

    fn context(&self) -> Option<serde_json::Value> {
        match self {
            Self::Ge(limit) | Self::Lt(limit) | Self::Le(limit) => {
                Some(serde_json::json!({ "limit_value": limit }))
            }
            Self::MaxItems(limit) => Some(serde_json::json!({ "limit_value": limit })),
            Self::Enum(permitted) => Some(serde_json::json!({ "enum_values": permitted })),
            _ => None,
        }
    }
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub loc: Vec<LocPart>,
    pub kind: ErrorKind,
}

impl FieldError {
    pub fn new(location: Location, field: &str, kind: ErrorKind) -> Self {
        Self {
            loc: vec![location.into(), field.into()],
            kind,
        }
    }

    pub const fn at(loc: Vec<LocPart>, kind: ErrorKind) -> Self {
        Self { loc, kind }
    }

    /// Location rendered as a dotted path, used in log lines
    pub fn loc_string(&self) -> String {
        self.loc
            .iter()
            .map(|part| match part {
                LocPart::Key(key) => key.clone(),
                LocPart::Index(index) => index.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let context = self.kind.context();
        let len = if context.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("FieldError", len)?;
        state.serialize_field("loc", &self.loc)?;
        state.serialize_field("msg", &self.kind.message())?;
        state.serialize_field("type", self.kind.type_name())?;
        if let Some(ctx) = context {
            state.serialize_field("ctx", &ctx)?;
        }
        state.end()
    }
}

/// Aggregated validation failures for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    detail: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.detail.push(error);
    }

    pub fn extend(&mut self, other: Self) {
        self.detail.extend(other.detail);
    }

    pub fn is_empty(&self) -> bool {
        self.detail.is_empty()
    }

    pub fn len(&self) -> usize {
        self.detail.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.detail
    }

    /// Record a field failure, keeping the value on success
    pub fn take<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    /// Record every failure of a nested validator, keeping the value on success
    pub fn take_all<T>(&mut self, result: Result<T, Self>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.extend(e);
                None
            }
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            detail: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .errors()
            .iter()
            .map(|e| format!("{} ({})", e.loc_string(), e.kind.type_name()))
            .collect();
        write!(f, "{} validation error(s): {}", self.len(), fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
