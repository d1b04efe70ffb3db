//! Net carbohydrate calculation
//!
//! Net carbs are total carbohydrates minus dietary fiber and half of the
//! sugar alcohols (polyols), floored at zero. All quantities are grams.
//!
//! Inputs are not validated. The floor uses [`f64::max`], which ignores a
//! NaN operand, so a NaN intermediate (a NaN input, or `inf - inf`) yields
//! `0.0`. Positive infinity passes through, negative infinity floors to `0.0`.

use serde::{Deserialize, Serialize};

/// Fraction of polyol grams deducted from total carbs
pub const POLYOL_FACTOR: f64 = 0.5;

/// Per-meal net carb ceiling used by the keto assistant
pub const KETO_MEAL_LIMIT_G: f64 = 20.0;

/// Compute net carbs: `max(0, total - fiber - 0.5 * polyols)`
#[inline]
pub fn net_carbs(total: f64, fiber: f64, polyols: f64) -> f64 {
    let net = total - fiber - POLYOL_FACTOR * polyols;
    0.0_f64.max(net)
}

/// Whether a net carb amount fits within a single keto meal
#[inline]
pub fn is_keto_friendly(net: f64) -> bool {
    net <= KETO_MEAL_LIMIT_G
}

/// The three grams values a net carb calculation is made from
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetCarbsInput {
    pub total: f64,   // grams
    pub fiber: f64,   // grams
    pub polyols: f64, // grams
}

impl NetCarbsInput {
    pub fn new(total: f64, fiber: f64, polyols: f64) -> Self {
        Self {
            total,
            fiber,
            polyols,
        }
    }

    pub fn net_carbs(&self) -> f64 {
        net_carbs(self.total, self.fiber, self.polyols)
    }

    /// Full breakdown of how the result was reached
    pub fn breakdown(&self) -> NetCarbsBreakdown {
        let polyol_deduction = POLYOL_FACTOR * self.polyols;
        let raw = self.total - self.fiber - polyol_deduction;
        let net = self.net_carbs();

        NetCarbsBreakdown {
            total: self.total,
            fiber: self.fiber,
            polyols: self.polyols,
            polyol_deduction,
            net_carbs: net,
            // NaN compares false, so it counts as clamped too
            clamped: !(raw >= 0.0),
            keto_friendly: is_keto_friendly(net),
        }
    }
}

/// Explanation of a single net carb calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetCarbsBreakdown {
    pub total: f64,
    pub fiber: f64,
    pub polyols: f64,
    pub polyol_deduction: f64,
    pub net_carbs: f64,
    /// The raw difference was below zero (or undefined) and was floored
    pub clamped: bool,
    pub keto_friendly: bool,
}
