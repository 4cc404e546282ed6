//! Triton - Static File Server
//!
//! Core library for the HTTP/1.1 subset and the static file pipeline.

pub mod config;
pub mod http;
pub mod server;
