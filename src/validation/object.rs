//! JSON object field validation
//!
//! [`ObjectValidator`] walks the declared fields of one JSON object, coercing
//! each and collecting failures with their full location.
//!
//! A `null` on a required model field is rejected as such; only parameters
//! embedded by name in the request body treat `null` as not sent.

use super::coerce::{bool_from_json, float_from_json, int_from_json, str_from_json};
use super::error::{ErrorKind, FieldError, LocPart, ValidationErrors};
use serde_json::{Map, Value};

pub struct ObjectValidator<'a> {
    fields: &'a Map<String, Value>,
    loc: Vec<LocPart>,
    errors: ValidationErrors,
    null_is_missing: bool,
}

impl<'a> ObjectValidator<'a> {
    /// Fails when the object itself is absent, `null`, or not an object
    pub fn new(value: Option<&'a Value>, loc: Vec<LocPart>) -> Result<Self, ValidationErrors> {
        match value {
            None | Some(Value::Null) => Err(FieldError::at(loc, ErrorKind::Missing).into()),
            Some(Value::Object(fields)) => Ok(Self {
                fields,
                loc,
                errors: ValidationErrors::default(),
                null_is_missing: false,
            }),
            Some(_) => Err(FieldError::at(loc, ErrorKind::NotDict).into()),
        }
    }

    /// Validator over a body whose fields are request parameters embedded by name
    pub fn embedded(value: &'a Value, loc: Vec<LocPart>) -> Result<Self, ValidationErrors> {
        let mut fields = Self::new(Some(value), loc)?;
        fields.null_is_missing = true;
        Ok(fields)
    }

    fn field_loc(&self, name: &str) -> Vec<LocPart> {
        let mut loc = self.loc.clone();
        loc.push(name.into());
        loc
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    fn required<T>(
        &mut self,
        name: &str,
        coerce: impl Fn(&Value) -> Result<T, ErrorKind>,
    ) -> Option<T> {
        let result = match self.fields.get(name) {
            None => Err(ErrorKind::Missing),
            Some(Value::Null) if self.null_is_missing => Err(ErrorKind::Missing),
            Some(Value::Null) => Err(ErrorKind::NoneNotAllowed),
            Some(value) => coerce(value),
        }
        .map_err(|kind| FieldError::at(self.field_loc(name), kind));
        self.errors.take(result)
    }

    /// Outer `None` means the field failed; inner `None` means it was not sent
    fn optional<T>(
        &mut self,
        name: &str,
        coerce: impl Fn(&Value) -> Result<T, ErrorKind>,
    ) -> Option<Option<T>> {
        let result = self
            .present(name)
            .map(coerce)
            .transpose()
            .map_err(|kind| FieldError::at(self.field_loc(name), kind));
        self.errors.take(result)
    }

    pub fn required_str(&mut self, name: &str) -> Option<String> {
        self.required(name, str_from_json)
    }

    pub fn optional_str(&mut self, name: &str) -> Option<Option<String>> {
        self.optional(name, str_from_json)
    }

    pub fn required_int(&mut self, name: &str) -> Option<i64> {
        self.required(name, int_from_json)
    }

    pub fn required_float(&mut self, name: &str) -> Option<f64> {
        self.required(name, float_from_json)
    }

    pub fn optional_bool(&mut self, name: &str) -> Option<Option<bool>> {
        self.optional(name, bool_from_json)
    }

    /// Raw access for fields validated by a nested validator
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }

    pub fn nested_loc(&self, name: &str) -> Vec<LocPart> {
        self.field_loc(name)
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_loc() -> Vec<LocPart> {
        vec!["body".into()]
    }

    #[test]
    fn test_missing_object() {
        let err = ObjectValidator::new(None, body_loc()).err().unwrap();
        assert_eq!(err.errors()[0].kind, ErrorKind::Missing);

        let null = Value::Null;
        assert!(ObjectValidator::new(Some(&null), body_loc()).is_err());
    }

    #[test]
    fn test_not_an_object() {
        let value = json!([1, 2]);
        let err = ObjectValidator::new(Some(&value), body_loc()).err().unwrap();
        assert_eq!(err.errors()[0].kind, ErrorKind::NotDict);
    }

    #[test]
    fn test_collects_all_field_errors() {
        let value = json!({"price": {"amount": 1}, "parameters": "many"});
        let mut fields = ObjectValidator::new(Some(&value), body_loc()).unwrap();
        assert!(fields.required_str("name").is_none());
        assert!(fields.required_str("price").is_none());
        assert!(fields.required_int("parameters").is_none());
        assert_eq!(fields.optional_bool("available"), Some(None));

        let errors = fields.into_errors();
        let locs: Vec<String> = errors.errors().iter().map(FieldError::loc_string).collect();
        assert_eq!(locs, vec!["body.name", "body.price", "body.parameters"]);
        assert_eq!(errors.errors()[1].kind, ErrorKind::NotStr);
        assert_eq!(errors.errors()[2].kind, ErrorKind::NotInteger);
    }

    #[test]
    fn test_null_required_field() {
        let value = json!({"name": null, "price": "1"});
        let mut fields = ObjectValidator::new(Some(&value), body_loc()).unwrap();
        assert!(fields.required_str("name").is_none());
        let errors = fields.into_errors();
        assert_eq!(errors.errors()[0].kind, ErrorKind::NoneNotAllowed);
        assert_eq!(errors.errors()[0].kind.type_name(), "type_error.none.not_allowed");

        let value = json!({"importance": null});
        let mut fields = ObjectValidator::embedded(&value, body_loc()).unwrap();
        assert!(fields.required_int("importance").is_none());
        assert_eq!(fields.into_errors().errors()[0].kind, ErrorKind::Missing);
    }

    #[test]
    fn test_null_optional_is_absent() {
        let value = json!({"description": null});
        let mut fields = ObjectValidator::new(Some(&value), body_loc()).unwrap();
        assert_eq!(fields.optional_str("description"), Some(None));
        assert!(fields.into_errors().is_empty());
    }
}
