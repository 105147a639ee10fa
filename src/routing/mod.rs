//! Routing module
//!
//! Provides request routing capabilities including:
//! - Path pattern compilation and matching with parameter capture
//! - Method dispatch with 405 and trailing-slash redirect resolution

mod matcher;
mod table;

pub use matcher::PathParams;
pub use table::{allow_header, Resolution, RouteId, RouteTable};
