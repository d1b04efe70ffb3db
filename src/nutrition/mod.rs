//! Nutrition calculation module
//!
//! Net carb arithmetic and the `netcarbs` chat directive.

pub mod directive;
pub mod net_carbs;

pub use directive::{format_reply, parse_directive, snack_prompt, DIRECTIVE_KEYWORD};
pub use net_carbs::{
    is_keto_friendly, net_carbs, NetCarbsBreakdown, NetCarbsInput, KETO_MEAL_LIMIT_G,
    POLYOL_FACTOR,
};
