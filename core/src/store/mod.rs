//! SQLite persistence layer.
//!
//! RULE: Only store/ talks to the database.
//! The engine reaches it through ChampionSource and AssignmentSink.

mod company;
mod customer;
mod order;
mod shop;

use crate::{
    error::EngineResult,
    model::{Assignment, Company, Customer, Order, Store},
    source::{AssignmentSink, ChampionSource},
    types::{CustomerId, Phone},
};
use rusqlite::{Connection, ToSql};
use std::str::FromStr;

/// Maximum bound parameters per IN (...) list.
pub(crate) const IN_BATCH: usize = 900;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_orders.sql"))?;
        Ok(())
    }
}

/// Comma-separated `?` placeholders, numbered from `first`.
pub(crate) fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn as_sql_params<'a>(
    head: &'a [&'a dyn ToSql],
    tail: &'a [String],
) -> Vec<&'a dyn ToSql> {
    head.iter()
        .copied()
        .chain(tail.iter().map(|s| s as &dyn ToSql))
        .collect()
}

/// Parse a TEXT column into an enum, surfacing bad values as row errors.
pub(crate) fn parse_column<T>(idx: usize, raw: String) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })
}

impl ChampionSource for SqliteStore {
    fn list_companies(&self) -> EngineResult<Vec<Company>> {
        self.all_companies()
    }

    fn find_company(&self, company_id: &str) -> EngineResult<Option<Company>> {
        self.get_company(company_id)
    }

    fn list_stores(&self, company_id: &str) -> EngineResult<Vec<Store>> {
        self.stores_for_company(company_id)
    }

    fn list_unassigned_customer_phones(
        &self,
        company_id: &str,
        page_size: usize,
    ) -> EngineResult<Vec<Phone>> {
        self.unassigned_phones(company_id, page_size)
    }

    fn list_customers_by_phones(
        &self,
        company_id: &str,
        phones: &[Phone],
        unassigned_only: bool,
    ) -> EngineResult<Vec<Customer>> {
        self.customers_with_phones(company_id, phones, unassigned_only)
    }

    fn list_completed_orders(&self, customer_ids: &[CustomerId]) -> EngineResult<Vec<Order>> {
        self.completed_orders_for(customer_ids)
    }

    fn list_orders_by_customer(&self, customer_id: &str) -> EngineResult<Vec<Order>> {
        self.orders_for_customer(customer_id)
    }
}

impl AssignmentSink for SqliteStore {
    fn assign_store(&self, assignments: &[Assignment]) -> EngineResult<()> {
        self.apply_assignments(assignments)
    }
}
