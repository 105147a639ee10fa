use crate::validation::{LocPart, ObjectValidator, ValidationErrors};
use serde::Serialize;
use serde_json::Value;

/// Metadata describing a trained model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MlModel {
    pub name: String,
    pub description: Option<String>,
    /// Number of trainable parameters
    pub parameters: i64,
    /// Validation accuracy of the model
    pub accuracy: f64,
}

impl MlModel {
    pub fn validate(value: Option<&Value>, loc: Vec<LocPart>) -> Result<Self, ValidationErrors> {
        let mut fields = ObjectValidator::new(value, loc)?;
        let name = fields.required_str("name");
        let description = fields.optional_str("description");
        let parameters = fields.required_int("parameters");
        let accuracy = fields.required_float("accuracy");

        match (name, description, parameters, accuracy) {
            (Some(name), Some(description), Some(parameters), Some(accuracy)) => Ok(Self {
                name,
                description,
                parameters,
                accuracy,
            }),
            _ => Err(fields.into_errors()),
        }
    }
}
