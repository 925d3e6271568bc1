//! # Taskboard API Server Library
//!
//! The HTTP half of Taskboard. Route handlers parse and validate requests,
//! call the board core from `taskboard-shared`, and map its results onto
//! HTTP responses.
//!
//! ## Modules
//!
//! - `app`: router assembly and shared state
//! - `config`: environment-driven configuration
//! - `error`: the unified HTTP error mapping
//! - `middleware`: response security headers
//! - `routes`: one module per route group

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
