use crate::validation::{LocPart, ObjectValidator, ValidationErrors};
use serde::Serialize;
use serde_json::Value;

/// A catalogue item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub available: Option<bool>,
}

impl Item {
    /// Build an item from the JSON found at `loc`
    pub fn validate(value: Option<&Value>, loc: Vec<LocPart>) -> Result<Self, ValidationErrors> {
        let mut fields = ObjectValidator::new(value, loc)?;
        let name = fields.required_str("name");
        let description = fields.optional_str("description");
        let price = fields.required_str("price");
        let available = fields.optional_bool("available");

        match (name, description, price, available) {
            (Some(name), Some(description), Some(price), Some(available)) => Ok(Self {
                name,
                description,
                price,
                available,
            }),
            _ => Err(fields.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;
    use serde_json::json;

    fn loc() -> Vec<LocPart> {
        vec!["body".into(), "item".into()]
    }

    #[test]
    fn test_valid_item() {
        let value = json!({"name": "Foo", "price": "12.5", "available": true});
        let item = Item::validate(Some(&value), loc()).unwrap();
        assert_eq!(
            item,
            Item {
                name: "Foo".to_string(),
                description: None,
                price: "12.5".to_string(),
                available: Some(true),
            }
        );
    }

    #[test]
    fn test_serializes_absent_optionals_as_null() {
        let value = json!({"name": "Foo", "price": "3"});
        let item = Item::validate(Some(&value), loc()).unwrap();
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"name": "Foo", "description": null, "price": "3", "available": null})
        );
    }

    #[test]
    fn test_missing_required_fields() {
        let value = json!({"description": "no name, no price"});
        let errors = Item::validate(Some(&value), loc()).unwrap_err();
        let locs: Vec<String> = errors.errors().iter().map(|e| e.loc_string()).collect();
        assert_eq!(locs, vec!["body.item.name", "body.item.price"]);
        assert!(errors.errors().iter().all(|e| e.kind == ErrorKind::Missing));
    }

    #[test]
    fn test_bad_available() {
        let value = json!({"name": "Foo", "price": "1", "available": "sometimes"});
        let errors = Item::validate(Some(&value), loc()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind, ErrorKind::NotBool);
    }
}
