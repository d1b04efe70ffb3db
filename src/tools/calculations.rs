//! Net Carb MCP Tools
//!
//! Calculation, directive handling, and the calculation log.

use serde::Serialize;

use crate::db::Database;
use crate::models::{Calculation, CalculationCreate};
use crate::nutrition::{self, NetCarbsBreakdown, NetCarbsInput};

/// Response for run_netcarbs_directive
#[derive(Debug, Serialize)]
pub struct DirectiveResponse {
    /// false when the text was not a `netcarbs` directive
    pub matched: bool,
    pub breakdown: Option<NetCarbsBreakdown>,
    pub reply: Option<String>,
    /// Follow-up prompt for the assistant, not executed here
    pub snack_prompt: Option<String>,
    pub logged_id: Option<i64>,
}

impl DirectiveResponse {
    fn unmatched() -> Self {
        Self {
            matched: false,
            breakdown: None,
            reply: None,
            snack_prompt: None,
            logged_id: None,
        }
    }
}

/// Response for log_calculation
#[derive(Debug, Serialize)]
pub struct LogCalculationResponse {
    pub id: i64,
    pub label: Option<String>,
    pub breakdown: NetCarbsBreakdown,
    pub created_at: String,
}

/// Response for list_calculations
#[derive(Debug, Serialize)]
pub struct ListCalculationsResponse {
    pub items: Vec<Calculation>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for delete_calculation
#[derive(Debug, Serialize)]
pub struct DeleteCalculationResponse {
    pub id: i64,
    pub deleted: bool,
}

// ============================================================================
// Calculation Tools
// ============================================================================

/// Compute net carbs with a full breakdown (no database access)
pub fn calculate(input: NetCarbsInput) -> NetCarbsBreakdown {
    input.breakdown()
}

/// Handle a chat message that may be a `netcarbs <total> <fiber> <polyols>` directive
pub fn run_directive(db: &Database, text: &str, log: bool) -> Result<DirectiveResponse, String> {
    let input = match nutrition::parse_directive(text.trim()) {
        Some(input) => input,
        None => {
            tracing::debug!("Not a netcarbs directive: {:?}", text);
            return Ok(DirectiveResponse::unmatched());
        }
    };

    let breakdown = input.breakdown();
    let has_nan = input.total.is_nan() || input.fiber.is_nan() || input.polyols.is_nan();
    if log && has_nan {
        // SQLite stores NaN as NULL, so the row cannot be written; the reply still stands
        tracing::warn!("Not logging directive with NaN input: {:?}", text.trim());
    }

    let logged_id = if log && !has_nan {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        let data = CalculationCreate {
            label: Some(text.trim().to_string()),
            input,
        };
        let calc = Calculation::create(&conn, &data)
            .map_err(|e| format!("Failed to log calculation: {}", e))?;
        Some(calc.id)
    } else {
        None
    };

    Ok(DirectiveResponse {
        matched: true,
        reply: Some(nutrition::format_reply(&input, breakdown.net_carbs)),
        snack_prompt: Some(nutrition::snack_prompt(breakdown.net_carbs)),
        breakdown: Some(breakdown),
        logged_id,
    })
}

/// Compute and store a calculation
pub fn log_calculation(
    db: &Database,
    input: NetCarbsInput,
    label: Option<String>,
) -> Result<LogCalculationResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let calc = Calculation::create(&conn, &CalculationCreate { label, input })
        .map_err(|e| format!("Failed to log calculation: {}", e))?;

    tracing::info!("Logged calculation {} (net {:.1}g)", calc.id, calc.net_carbs);

    Ok(LogCalculationResponse {
        id: calc.id,
        breakdown: calc.input().breakdown(),
        label: calc.label,
        created_at: calc.created_at,
    })
}

pub fn get_calculation(db: &Database, id: i64) -> Result<Option<Calculation>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Calculation::get_by_id(&conn, id).map_err(|e| format!("Failed to get calculation: {}", e))
}

/// List logged calculations, newest first
pub fn list_calculations(
    db: &Database,
    limit: i64,
    offset: i64,
) -> Result<ListCalculationsResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = Calculation::list(&conn, limit, offset)
        .map_err(|e| format!("Failed to list calculations: {}", e))?;
    let total =
        Calculation::count(&conn).map_err(|e| format!("Failed to count calculations: {}", e))?;

    Ok(ListCalculationsResponse {
        items,
        total,
        limit,
        offset,
    })
}

pub fn delete_calculation(db: &Database, id: i64) -> Result<DeleteCalculationResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Calculation::delete(&conn, id)
        .map_err(|e| format!("Failed to delete calculation: {}", e))?;

    Ok(DeleteCalculationResponse { id, deleted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    #[test]
    fn test_calculate() {
        let b = calculate(NetCarbsInput::new(30.0, 5.0, 10.0));
        assert!((b.net_carbs - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_directive_logs() {
        let db = setup();
        let resp = run_directive(&db, "  netcarbs 30 5 10 ", true).unwrap();

        assert!(resp.matched);
        assert_eq!(
            resp.reply.as_deref(),
            Some("Using your inputs: total=30.0g, fiber=5.0g, polyols=10.0g → net=20.0g.")
        );
        assert_eq!(
            resp.snack_prompt.as_deref(),
            Some("Given net carbs 20.0g, suggest a matching keto snack.")
        );

        let id = resp.logged_id.unwrap();
        let stored = get_calculation(&db, id).unwrap().unwrap();
        assert_eq!(stored.label.as_deref(), Some("netcarbs 30 5 10"));
        assert_eq!(stored.net_carbs, 20.0);
    }

    #[test]
    fn test_run_directive_without_logging() {
        let db = setup();
        let resp = run_directive(&db, "netcarbs 10 12 0", false).unwrap();

        assert!(resp.matched);
        assert!(resp.logged_id.is_none());
        assert_eq!(resp.breakdown.unwrap().net_carbs, 0.0);
        assert_eq!(list_calculations(&db, 10, 0).unwrap().total, 0);
    }

    #[test]
    fn test_run_directive_nan_replies_without_logging() {
        let db = setup();
        let resp = run_directive(&db, "netcarbs nan 0 0", true).unwrap();

        assert!(resp.matched);
        assert!(resp.logged_id.is_none());
        assert_eq!(resp.breakdown.unwrap().net_carbs, 0.0);
        assert!(resp.reply.unwrap().ends_with("net=0.0g."));
        assert_eq!(list_calculations(&db, 10, 0).unwrap().total, 0);
    }

    #[test]
    fn test_run_directive_unmatched() {
        let db = setup();
        let resp = run_directive(&db, "give me a keto breakfast", true).unwrap();

        assert!(!resp.matched);
        assert!(resp.reply.is_none());
        assert!(resp.logged_id.is_none());
    }

    #[test]
    fn test_log_list_delete() {
        let db = setup();
        let first = log_calculation(&db, NetCarbsInput::new(12.0, 2.0, 4.0), None).unwrap();
        let second =
            log_calculation(&db, NetCarbsInput::new(0.0, 0.0, 0.0), Some("water".into())).unwrap();
        assert_eq!(first.breakdown.net_carbs, 8.0);

        let list = list_calculations(&db, 0, -5).unwrap();
        assert_eq!(list.limit, 1);
        assert_eq!(list.offset, 0);
        assert_eq!(list.total, 2);
        assert_eq!(list.items[0].id, second.id);

        let resp = delete_calculation(&db, first.id).unwrap();
        assert!(resp.deleted);
        assert!(get_calculation(&db, first.id).unwrap().is_none());
    }
}
