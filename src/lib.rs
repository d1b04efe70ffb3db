//! Net Carbs Calculator Library
//!
//! Net carbohydrate math for keto tracking, exported over the C ABI
//! (see [`ffi`]) and served as MCP tools (see [`mcp`]).

pub mod build_info;
pub mod db;
pub mod ffi;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;

pub use nutrition::{net_carbs, NetCarbsBreakdown, NetCarbsInput};
