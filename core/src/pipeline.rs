//! The shared resolution pipeline.
//!
//! STAGES (fixed order):
//!   1. group_by_phone      customers → phone groups
//!   2. aggregate_orders    orders → per phone, per store totals
//!   3. select_champions    totals → one winner per phone
//!   4. write_in_chunks     winners → per-customer assignments, chunked
//!
//! Both orchestrators feed this with a scope (stores, customers, orders)
//! and differ only in how they load it.

use crate::{
    aggregate::aggregate_orders,
    champion::select_champions,
    config::EngineConfig,
    error::EngineResult,
    grouping::group_by_phone,
    model::{Customer, Order, Store},
    source::AssignmentSink,
    writer::{build_assignments, write_in_chunks},
};
use serde::{Deserialize, Serialize};

/// Counts from one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeOutcome {
    pub phones: usize,
    pub champions: usize,
    pub assignments: usize,
    pub chunks: usize,
}

pub fn resolve_scope<S: AssignmentSink + ?Sized>(
    stores: &[Store],
    customers: &[Customer],
    orders: &[Order],
    config: &EngineConfig,
    sink: &S,
) -> EngineResult<ScopeOutcome> {
    let groups = group_by_phone(customers);
    let aggregates = aggregate_orders(stores, orders, &groups);
    let champions = select_champions(&aggregates);
    let assignments = build_assignments(&champions, &groups);
    log::debug!(
        "pipeline: {} phones, {} orders, {} champions, {} assignments",
        groups.len(),
        orders.len(),
        champions.len(),
        assignments.len()
    );

    let written = write_in_chunks(sink, &assignments, config.chunk_size)?;
    Ok(ScopeOutcome {
        phones: groups.len(),
        champions: champions.len(),
        assignments: written.assignments,
        chunks: written.chunks,
    })
}
