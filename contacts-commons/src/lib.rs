pub mod api;
pub mod config;
pub mod model;
pub mod submit;
pub mod sync;
pub mod token;

pub mod error;
pub use error::*;
