use super::{as_sql_params, placeholders, SqliteStore, IN_BATCH};
use crate::{
    error::EngineResult,
    model::{Assignment, Customer, OrderStatus},
    types::{Phone, StoreId},
};
use rusqlite::{params, OptionalExtension, Row, ToSql};

const CUSTOMER_COLUMNS: &str = "customer_id, company_id, phone, store_id";

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: row.get(0)?,
        company_id: row.get(1)?,
        phone: row.get(2)?,
        store_id: row.get(3)?,
    })
}

impl SqliteStore {
    // ── Customer ──────────────────────────────────────────────────

    pub fn insert_customer(&self, c: &Customer) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO customer (customer_id, company_id, phone, store_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![&c.customer_id, &c.company_id, &c.phone, &c.store_id],
        )?;
        Ok(())
    }

    pub fn get_customer(&self, customer_id: &str) -> EngineResult<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                &format!("SELECT {CUSTOMER_COLUMNS} FROM customer WHERE customer_id = ?1"),
                params![customer_id],
                customer_from_row,
            )
            .optional()?;
        Ok(customer)
    }

    pub fn customer_store(&self, customer_id: &str) -> EngineResult<Option<StoreId>> {
        let store_id: Option<Option<StoreId>> = self
            .conn
            .query_row(
                "SELECT store_id FROM customer WHERE customer_id = ?1",
                params![customer_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(store_id.flatten())
    }

    /// Customers of a company still waiting for a store.
    pub fn unassigned_customer_count(&self, company_id: &str) -> EngineResult<i64> {
        let n = self.conn.query_row(
            "SELECT COUNT(*) FROM customer WHERE company_id = ?1 AND store_id IS NULL",
            params![company_id],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    /// Distinct non-empty phones of unassigned customers, lowest first.
    ///
    /// Only phones where some unassigned customer has a completed order at
    /// one of the company's stores are paged. Any other phone would yield no
    /// champion and would hold its place in every later page.
    pub fn unassigned_phones(
        &self,
        company_id: &str,
        page_size: usize,
    ) -> EngineResult<Vec<Phone>> {
        let sql = format!(
            "SELECT DISTINCT c.phone FROM customer c
             WHERE c.company_id = ?1 AND c.store_id IS NULL
               AND c.phone IS NOT NULL AND c.phone <> ''
               AND EXISTS (
                   SELECT 1 FROM customer g
                   JOIN sale_order o ON o.customer_id = g.customer_id
                   JOIN store s ON s.store_id = o.store_id AND s.company_id = ?1
                   WHERE g.company_id = ?1 AND g.phone = c.phone
                     AND g.store_id IS NULL AND o.status = '{}'
               )
             ORDER BY c.phone ASC
             LIMIT ?2",
            OrderStatus::Completed.as_str(),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let limit = i64::try_from(page_size).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![company_id, limit], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn customers_with_phones(
        &self,
        company_id: &str,
        phones: &[Phone],
        unassigned_only: bool,
    ) -> EngineResult<Vec<Customer>> {
        let mut customers = Vec::new();
        for batch in phones.chunks(IN_BATCH) {
            let sql = format!(
                "SELECT {CUSTOMER_COLUMNS} FROM customer
                 WHERE company_id = ?1 AND phone IN ({}){}
                 ORDER BY rowid ASC",
                placeholders(2, batch.len()),
                if unassigned_only { " AND store_id IS NULL" } else { "" },
            );
            let head: [&dyn ToSql; 1] = [&company_id];
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(as_sql_params(&head, batch).as_slice(), customer_from_row)?;
            for row in rows {
                customers.push(row?);
            }
        }
        Ok(customers)
    }

    /// Write one chunk of assignments in its own transaction.
    ///
    /// Customers without a row are skipped; the reactive path may hand in a
    /// triggering customer that is not saved yet.
    pub fn apply_assignments(&self, assignments: &[Assignment]) -> EngineResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let mut missing = 0usize;
        {
            let mut stmt =
                tx.prepare("UPDATE customer SET store_id = ?1 WHERE customer_id = ?2")?;
            for a in assignments {
                if stmt.execute(params![&a.store_id, &a.customer_id])? == 0 {
                    missing += 1;
                }
            }
        }
        tx.commit()?;
        if missing > 0 {
            log::debug!(
                "assignment chunk: {missing} of {} customers not found, skipped",
                assignments.len()
            );
        }
        Ok(())
    }
}
