//! MCP server for the Tech Radar.
//!
//! Exposes the `get_tech_stack_guidance` tool over JSON-RPC 2.0 stdio
//! transport: radar entries loaded once at startup, filtered by quadrant and
//! ring, and returned in `(ring, label)` order.

pub mod config;
pub mod handlers;
pub mod protocol;
pub mod radar;
pub mod server;
pub mod source;

pub mod schema;
