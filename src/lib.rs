//! Waypoint - Static File Origin Server
//!
//! Core library for HTTP handling, file serving and peer redirects.

pub mod config;
pub mod http;
pub mod route;
pub mod server;
