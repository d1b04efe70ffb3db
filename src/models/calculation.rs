//! Calculation model
//!
//! A logged net carb calculation.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::NetCarbsInput;

/// A stored net carb calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    pub id: i64,
    pub label: Option<String>,
    pub total: f64,
    pub fiber: f64,
    pub polyols: f64,
    pub net_carbs: f64,
    pub created_at: String,
}

/// Data for logging a new calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationCreate {
    pub label: Option<String>,
    #[serde(flatten)]
    pub input: NetCarbsInput,
}

impl Calculation {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            label: row.get("label")?,
            total: row.get("total")?,
            fiber: row.get("fiber")?,
            polyols: row.get("polyols")?,
            net_carbs: row.get("net_carbs")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn input(&self) -> NetCarbsInput {
        NetCarbsInput::new(self.total, self.fiber, self.polyols)
    }

    /// Insert a new calculation; the net carbs column is always derived from the inputs
    ///
    /// A NaN input binds as NULL in SQLite, so it fails the NOT NULL constraint.
    pub fn create(conn: &Connection, data: &CalculationCreate) -> DbResult<Self> {
        let net = data.input.net_carbs();

        conn.execute(
            r#"
            INSERT INTO calculations (label, total, fiber, polyols, net_carbs)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                data.label,
                data.input.total,
                data.input.fiber,
                data.input.polyols,
                net,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::NotFound(format!("calculation {}", id)))
    }

    /// Get a calculation by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM calculations WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(calc) => Ok(Some(calc)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List calculations, newest first
    pub fn list(conn: &Connection, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM calculations
            ORDER BY created_at DESC, id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )?;

        let items = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM calculations", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a calculation; returns whether a row was removed
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM calculations WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn create(conn: &Connection, label: &str, total: f64, fiber: f64, polyols: f64) -> Calculation {
        let data = CalculationCreate {
            label: Some(label.to_string()),
            input: NetCarbsInput::new(total, fiber, polyols),
        };
        Calculation::create(conn, &data).unwrap()
    }

    #[test]
    fn test_create_derives_net_carbs() {
        let conn = setup();
        let calc = create(&conn, "Protein bar", 30.0, 5.0, 10.0);

        assert_eq!(calc.label.as_deref(), Some("Protein bar"));
        assert!((calc.net_carbs - 20.0).abs() < 1e-9);
        assert_eq!(calc.input(), NetCarbsInput::new(30.0, 5.0, 10.0));
        assert!(!calc.created_at.is_empty());
    }

    #[test]
    fn test_create_stores_clamped_value() {
        let conn = setup();
        let calc = create(&conn, "Broccoli", 10.0, 12.0, 0.0);
        assert_eq!(calc.net_carbs, 0.0);
    }

    #[test]
    fn test_create_rejects_nan_input() {
        let conn = setup();
        let data = CalculationCreate {
            label: None,
            input: NetCarbsInput::new(f64::NAN, 0.0, 0.0),
        };
        assert!(Calculation::create(&conn, &data).is_err());
    }

    #[test]
    fn test_get_missing() {
        let conn = setup();
        assert!(Calculation::get_by_id(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn test_list_newest_first_with_paging() {
        let conn = setup();
        let a = create(&conn, "a", 1.0, 0.0, 0.0);
        let b = create(&conn, "b", 2.0, 0.0, 0.0);
        let c = create(&conn, "c", 3.0, 0.0, 0.0);

        let all = Calculation::list(&conn, 10, 0).unwrap();
        let ids: Vec<i64> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);

        let page = Calculation::list(&conn, 1, 1).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, b.id);

        assert_eq!(Calculation::count(&conn).unwrap(), 3);
    }

    #[test]
    fn test_delete() {
        let conn = setup();
        let calc = create(&conn, "x", 5.0, 1.0, 1.0);

        assert!(Calculation::delete(&conn, calc.id).unwrap());
        assert!(!Calculation::delete(&conn, calc.id).unwrap());
        assert_eq!(Calculation::count(&conn).unwrap(), 0);
    }
}
