//! Request/response data models
//!
//! Flat records rebuilt from decoded input on every request. Each model
//! exposes a `validate` constructor so handlers only ever see typed values.

mod item;
mod ml_model;
mod names;

pub use item::Item;
pub use ml_model::MlModel;
pub use names::{FileReference, ModelName};
