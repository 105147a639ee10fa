//! Request validation module
//!
//! Explicit validators that run before a handler is dispatched:
//! - Presence checks for required fields
//! - Coercion of text and JSON values into typed values
//! - Range, length and enum membership constraints
//!
//! Failures are aggregated so one response lists every offending field.

mod coerce;
mod error;
mod object;
pub mod params;
mod rules;

pub use error::{ErrorKind, FieldError, LocPart, Location, ValidationErrors};
pub use object::ObjectValidator;
pub use rules::{IntBounds, TextEnum};
