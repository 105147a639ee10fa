//! Text parameter extraction (path and query)
//!
//! Each extractor applies presence, coercion, constraint and enum checks in
//! that order and stops at the first failure for the field.

use super::coerce::{bool_from_text, int_from_text};
use super::error::{ErrorKind, FieldError, Location};
use super::rules::{max_items, IntBounds, TextEnum};
use serde_json::Number;

/// Integers beyond `i64` fail the bound they exceed
pub fn required_int(
    location: Location,
    name: &str,
    raw: Option<&str>,
    bounds: IntBounds,
) -> Result<i64, FieldError> {
    let raw = raw.ok_or_else(|| FieldError::new(location, name, ErrorKind::Missing))?;
    int_from_text(raw)
        .and_then(|value| bounds.check(value.saturating()))
        .map_err(|kind| FieldError::new(location, name, kind))
}

/// Unconstrained integer of any size, for echoing back
pub fn required_number(
    location: Location,
    name: &str,
    raw: Option<&str>,
) -> Result<Number, FieldError> {
    let raw = raw.ok_or_else(|| FieldError::new(location, name, ErrorKind::Missing))?;
    int_from_text(raw)
        .and_then(|value| value.to_number())
        .map_err(|kind| FieldError::new(location, name, kind))
}

pub fn int_or_default(
    location: Location,
    name: &str,
    raw: Option<&str>,
    default: i64,
    bounds: IntBounds,
) -> Result<i64, FieldError> {
    match raw {
        Some(raw) => required_int(location, name, Some(raw), bounds),
        None => Ok(default),
    }
}

pub fn optional_bool(
    location: Location,
    name: &str,
    raw: Option<&str>,
) -> Result<Option<bool>, FieldError> {
    raw.map(bool_from_text)
        .transpose()
        .map_err(|kind| FieldError::new(location, name, kind))
}

pub fn required_enum<E: TextEnum>(
    location: Location,
    name: &str,
    raw: Option<&str>,
) -> Result<E, FieldError> {
    let raw = raw.ok_or_else(|| FieldError::new(location, name, ErrorKind::Missing))?;
    E::parse(raw).map_err(|kind| FieldError::new(location, name, kind))
}

/// Repeated parameter (`?q=a&q=b`); absent when no value was sent
pub fn optional_list(
    location: Location,
    name: &str,
    values: Vec<String>,
    limit: usize,
) -> Result<Option<Vec<String>>, FieldError> {
    if values.is_empty() {
        return Ok(None);
    }
    max_items(values.len(), limit).map_err(|kind| FieldError::new(location, name, kind))?;
    Ok(Some(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_int_missing() {
        let err = required_int(Location::Path, "item_id", None, IntBounds::NONE).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Missing);
        assert_eq!(err.loc_string(), "path.item_id");
    }

    #[test]
    fn test_required_int_coerces_before_bounds() {
        let bounds = IntBounds::NONE.ge(0).le(10);
        assert_eq!(
            required_int(Location::Path, "id", Some("x"), bounds).unwrap_err().kind,
            ErrorKind::NotInteger
        );
        assert_eq!(
            required_int(Location::Path, "id", Some("11"), bounds).unwrap_err().kind,
            ErrorKind::Le(10)
        );
        assert_eq!(required_int(Location::Path, "id", Some("7"), bounds), Ok(7));
    }

    #[test]
    fn test_required_int_beyond_i64_hits_bounds() {
        let bounds = IntBounds::NONE.ge(0).le(10_000);
        let huge = "99999999999999999999";
        assert_eq!(
            required_int(Location::Path, "id", Some(huge), bounds).unwrap_err().kind,
            ErrorKind::Le(10_000)
        );
        assert_eq!(
            required_int(Location::Path, "id", Some("-99999999999999999999"), bounds)
                .unwrap_err()
                .kind,
            ErrorKind::Ge(0)
        );
        assert_eq!(
            required_int(Location::Query, "skip", Some(huge), IntBounds::NONE.lt(9))
                .unwrap_err()
                .kind,
            ErrorKind::Lt(9)
        );
    }

    #[test]
    fn test_required_number_keeps_precision() {
        let number =
            required_number(Location::Path, "item_id", Some("123456789012345678901234")).unwrap();
        assert_eq!(number.to_string(), "123456789012345678901234");
        assert_eq!(
            required_number(Location::Path, "item_id", Some("42")).unwrap(),
            Number::from(42)
        );
        assert_eq!(
            required_number(Location::Path, "item_id", Some("4.2")).unwrap_err().kind,
            ErrorKind::NotInteger
        );
    }

    #[test]
    fn test_int_or_default() {
        let bounds = IntBounds::NONE.le(10);
        assert_eq!(int_or_default(Location::Query, "limit", None, 10, bounds), Ok(10));
        assert_eq!(int_or_default(Location::Query, "limit", Some("3"), 10, bounds), Ok(3));
        assert!(int_or_default(Location::Query, "limit", Some("11"), 10, bounds).is_err());
    }

    #[test]
    fn test_optional_bool() {
        assert_eq!(optional_bool(Location::Query, "all", None), Ok(None));
        assert_eq!(optional_bool(Location::Query, "all", Some("true")), Ok(Some(true)));
        assert_eq!(
            optional_bool(Location::Query, "all", Some("nope")).unwrap_err().kind,
            ErrorKind::NotBool
        );
    }

    #[test]
    fn test_optional_list_limit() {
        assert_eq!(optional_list(Location::Query, "q", Vec::new(), 50), Ok(None));
        let values = vec!["x".to_string()];
        assert_eq!(
            optional_list(Location::Query, "q", values.clone(), 50),
            Ok(Some(values))
        );
        let many = vec!["x".to_string(); 51];
        assert_eq!(
            optional_list(Location::Query, "q", many, 50).unwrap_err().kind,
            ErrorKind::MaxItems(50)
        );
    }
}
