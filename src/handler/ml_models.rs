//! Model metadata endpoints

use super::body::{body_loc, parse_json};
use super::{respond, RequestInput};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::models::{MlModel, ModelName};
use crate::validation::{params, IntBounds, Location, ValidationErrors};
use serde::Serialize;

const MODEL_ID_BOUNDS: IntBounds = IntBounds::NONE.ge(0).lt(10);

#[derive(Serialize)]
struct UpdatedModel {
    model_id: i64,
    model: MlModel,
}

#[derive(Serialize)]
struct ModelInfo {
    model_name: ModelName,
    message: &'static str,
}

/// `PUT /models/{model_id}` with a bare `MlModel` body
pub fn update_model(input: &RequestInput) -> Result<HttpResponse, ApiError> {
    let body = parse_json(&input.body)?;

    let mut errors = ValidationErrors::default();
    let model_id = errors.take(params::required_int(
        Location::Path,
        "model_id",
        input.params.get("model_id"),
        MODEL_ID_BOUNDS,
    ));
    let model = errors.take_all(MlModel::validate(body.as_ref(), body_loc()));

    match (model_id, model) {
        (Some(model_id), Some(model)) => respond(&UpdatedModel { model_id, model }),
        _ => Err(errors.into()),
    }
}

/// `GET /model/{model_name}`
pub fn get_model_info(input: &RequestInput) -> Result<HttpResponse, ApiError> {
    let model_name: ModelName = params::required_enum(
        Location::Path,
        "model_name",
        input.params.get("model_name"),
    )
    .map_err(ValidationErrors::from)?;

    let info = ModelInfo {
        model_name,
        message: model_name.message(),
    };
    respond(&info)
}
