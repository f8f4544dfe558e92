pub mod auth;
pub mod envelope;
pub mod error;
pub mod extractors;
