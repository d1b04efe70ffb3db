//! netcarbs Tools module
//!
//! Tool implementations behind the MCP server.

pub mod calculations;
pub mod status;
