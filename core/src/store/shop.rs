use super::{parse_column, SqliteStore};
use crate::{error::EngineResult, model::Store};
use rusqlite::params;

impl SqliteStore {
    // ── Store ─────────────────────────────────────────────────────

    pub fn insert_store(&self, s: &Store) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO store (store_id, company_id, store_type) VALUES (?1, ?2, ?3)",
            params![&s.store_id, &s.company_id, s.store_type.as_str()],
        )?;
        Ok(())
    }

    pub fn stores_for_company(&self, company_id: &str) -> EngineResult<Vec<Store>> {
        let mut stmt = self.conn.prepare(
            "SELECT store_id, company_id, store_type FROM store
             WHERE company_id = ?1 ORDER BY store_id ASC",
        )?;
        let rows = stmt.query_map(params![company_id], |row| {
            Ok(Store {
                store_id: row.get(0)?,
                company_id: row.get(1)?,
                store_type: parse_column(2, row.get(2)?)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Remove a store. Orders keep pointing at it; the engine skips them.
    pub fn delete_store(&self, store_id: &str) -> EngineResult<()> {
        self.conn.execute(
            "UPDATE customer SET store_id = NULL WHERE store_id = ?1",
            params![store_id],
        )?;
        self.conn
            .execute("DELETE FROM store WHERE store_id = ?1", params![store_id])?;
        Ok(())
    }
}
