use super::SqliteStore;
use crate::{error::EngineResult, model::Company};
use rusqlite::{params, OptionalExtension, Row};

fn company_from_row(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        company_id: row.get(0)?,
        name: row.get(1)?,
        plan: row.get(2)?,
    })
}

impl SqliteStore {
    // ── Company ───────────────────────────────────────────────────

    pub fn insert_company(&self, c: &Company) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO company (company_id, name, plan) VALUES (?1, ?2, ?3)",
            params![&c.company_id, &c.name, &c.plan],
        )?;
        Ok(())
    }

    pub fn all_companies(&self) -> EngineResult<Vec<Company>> {
        let mut stmt = self.conn.prepare(
            "SELECT company_id, name, plan FROM company ORDER BY company_id ASC",
        )?;
        let rows = stmt.query_map([], company_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn get_company(&self, company_id: &str) -> EngineResult<Option<Company>> {
        let company = self
            .conn
            .query_row(
                "SELECT company_id, name, plan FROM company WHERE company_id = ?1",
                params![company_id],
                company_from_row,
            )
            .optional()?;
        Ok(company)
    }
}
