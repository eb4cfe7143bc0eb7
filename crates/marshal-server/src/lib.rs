//! HTTP surface for the marshal encoder: two routes serving the same kind of
//! record under default and customized encoding options.

pub mod logging;
pub mod payload;
pub mod routes;

pub use crate::payload::Payload;
pub use crate::routes::{AppState, router};
