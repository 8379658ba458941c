// Frameworks layer: configuration and page session bootstrap.

pub mod config;
pub mod session;
