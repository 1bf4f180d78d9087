use super::{parse_column, placeholders, SqliteStore, IN_BATCH};
use crate::{
    error::EngineResult,
    model::{Order, OrderStatus},
    types::CustomerId,
};
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const ORDER_COLUMNS: &str = "order_id, company_id, customer_id, store_id, status, total";

fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        order_id: row.get(0)?,
        company_id: row.get(1)?,
        customer_id: row.get(2)?,
        store_id: row.get(3)?,
        status: parse_column(4, row.get(4)?)?,
        total: row.get(5)?,
    })
}

impl SqliteStore {
    // ── Order ─────────────────────────────────────────────────────

    pub fn insert_order(&self, o: &Order) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO sale_order (
                order_id, company_id, customer_id, store_id, status, total, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &o.order_id,
                &o.company_id,
                &o.customer_id,
                &o.store_id,
                o.status.as_str(),
                o.total,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_order(&self, order_id: &str) -> EngineResult<Option<Order>> {
        let order = self
            .conn
            .query_row(
                &format!("SELECT {ORDER_COLUMNS} FROM sale_order WHERE order_id = ?1"),
                params![order_id],
                order_from_row,
            )
            .optional()?;
        Ok(order)
    }

    /// Completed orders placed at a store by any of `customer_ids`.
    pub fn completed_orders_for(&self, customer_ids: &[CustomerId]) -> EngineResult<Vec<Order>> {
        let mut orders = Vec::new();
        for batch in customer_ids.chunks(IN_BATCH) {
            let sql = format!(
                "SELECT {ORDER_COLUMNS} FROM sale_order
                 WHERE status = '{}' AND store_id IS NOT NULL
                   AND customer_id IN ({})
                 ORDER BY rowid ASC",
                OrderStatus::Completed.as_str(),
                placeholders(1, batch.len()),
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(batch.iter()), order_from_row)?;
            for row in rows {
                orders.push(row?);
            }
        }
        Ok(orders)
    }

    pub fn orders_for_customer(&self, customer_id: &str) -> EngineResult<Vec<Order>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM sale_order WHERE customer_id = ?1 ORDER BY rowid ASC"
        ))?;
        let rows = stmt.query_map(params![customer_id], order_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
