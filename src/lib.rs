pub mod config;
pub mod dto;
pub mod errors;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod retrieval;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
