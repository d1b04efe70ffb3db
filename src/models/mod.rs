//! Data models
//!
//! Rust structs representing database entities.

mod calculation;

pub use calculation::{Calculation, CalculationCreate};
