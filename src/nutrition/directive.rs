//! `netcarbs` chat directive
//!
//! A message of the form `netcarbs <total> <fiber> <polyols>` asks for a
//! direct calculation instead of a free-form assistant reply.

use super::net_carbs::NetCarbsInput;

/// Keyword that opens a directive (matched case-insensitively)
pub const DIRECTIVE_KEYWORD: &str = "netcarbs";

/// Parse `netcarbs <total> <fiber> <polyols>`
///
/// Parts are separated by spaces; runs of spaces and leading or trailing
/// spaces are skipped.
pub fn parse_directive(s: &str) -> Option<NetCarbsInput> {
    let parts: Vec<&str> = s.split(' ').filter(|p| !p.is_empty()).collect();
    if parts.len() != 4 || !parts[0].eq_ignore_ascii_case(DIRECTIVE_KEYWORD) {
        return None;
    }

    let total = parts[1].parse::<f64>().ok()?;
    let fiber = parts[2].parse::<f64>().ok()?;
    let polyols = parts[3].parse::<f64>().ok()?;

    Some(NetCarbsInput::new(total, fiber, polyols))
}

/// Reply line echoing the inputs and the computed net carbs
///
/// Inputs are printed with their fractional part (`30.0g`), the result to one decimal.
/// Non-finite and very large inputs use Rust's float notation (`NaN`, `inf`, `1e16`),
/// not the `nan` / `1e+16` spelling of other runtimes.
pub fn format_reply(input: &NetCarbsInput, net: f64) -> String {
    format!(
        "Using your inputs: total={:?}g, fiber={:?}g, polyols={:?}g → net={:.1}g.",
        input.total, input.fiber, input.polyols, net
    )
}

/// Follow-up prompt asking an assistant for a snack that fits the result
pub fn snack_prompt(net: f64) -> String {
    format!("Given net carbs {:?}g, suggest a matching keto snack.", net)
}
