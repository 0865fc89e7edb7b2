//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the MCP
//! server: tools that clients can call and resources that clients can read.

pub mod resources;
pub mod tools;
