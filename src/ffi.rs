//! C ABI exports
//!
//! Primitive-only entry points for host languages (C, C++, Swift, Python
//! ctypes, ...). Every function here is total: none of them can panic and
//! there is no error channel. Declarations live in `include/netcarbs.h`.

use crate::nutrition;

/// Net carbohydrates in grams: `max(0, total - fiber - 0.5 * polyols)`.
///
/// Inputs are not range-checked. Any NaN along the way yields `0.0`.
#[no_mangle]
pub extern "C" fn net_carbs(total: f64, fiber: f64, polyols: f64) -> f64 {
    nutrition::net_carbs(total, fiber, polyols)
}

/// Whether `net` grams fits within one keto meal.
#[no_mangle]
pub extern "C" fn netcarbs_is_keto_friendly(net: f64) -> bool {
    nutrition::is_keto_friendly(net)
}

/// Per-meal net carb ceiling in grams.
#[no_mangle]
pub extern "C" fn netcarbs_keto_meal_limit() -> f64 {
    nutrition::KETO_MEAL_LIMIT_G
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_net_carbs() {
        assert_eq!(net_carbs(30.0, 5.0, 10.0), 20.0);
        assert_eq!(net_carbs(10.0, 12.0, 0.0), 0.0);
        assert_eq!(net_carbs(0.0, 0.0, 0.0), 0.0);
        assert_eq!(net_carbs(f64::NAN, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_exported_through_fn_pointer() {
        // Same shape a host sees after dlsym
        let f: extern "C" fn(f64, f64, f64) -> f64 = net_carbs;
        assert_eq!(f(12.0, 2.0, 4.0), 8.0);
    }

    #[test]
    fn test_exported_keto_helpers() {
        assert_eq!(netcarbs_keto_meal_limit(), 20.0);
        assert!(netcarbs_is_keto_friendly(8.0));
        assert!(!netcarbs_is_keto_friendly(25.0));
    }
}
