//! Web API module for the stories application.

pub mod error;
pub mod routes;
pub mod status;
pub mod stories;

pub use routes::*;
