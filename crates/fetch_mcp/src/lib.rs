//! MCP server that fetches a URL from the internet and returns its content
//! as text, with optional HTML-to-markdown simplification and stateless
//! pagination over repeated tool calls.

pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;
