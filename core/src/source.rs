//! Collaborator contracts at the data-access boundary.
//!
//! RULE: The engine never touches storage directly.
//! Orchestrators read through ChampionSource and write through
//! AssignmentSink. Any storage technology can satisfy both.

use crate::{
    error::EngineResult,
    model::{Assignment, Company, Customer, Order, Store},
    types::{CompanyId, CustomerId, Phone},
};

/// Read side of the boundary.
pub trait ChampionSource {
    fn list_companies(&self) -> EngineResult<Vec<Company>>;

    fn find_company(&self, company_id: &str) -> EngineResult<Option<Company>>;

    fn list_stores(&self, company_id: &str) -> EngineResult<Vec<Store>>;

    /// Up to `page_size` distinct, non-empty phones of customers that have
    /// no store assigned yet, restricted to phones where such a customer
    /// has a completed order at one of the company's stores. Every phone in
    /// a page therefore resolves, and repeated sweeps drain the backlog.
    fn list_unassigned_customer_phones(
        &self,
        company_id: &str,
        page_size: usize,
    ) -> EngineResult<Vec<Phone>>;

    /// Customers of `company_id` whose phone is one of `phones`. With
    /// `unassigned_only`, customers that already have a store are left out.
    fn list_customers_by_phones(
        &self,
        company_id: &str,
        phones: &[Phone],
        unassigned_only: bool,
    ) -> EngineResult<Vec<Customer>>;

    /// Completed orders with a store, placed by any of `customer_ids`.
    fn list_completed_orders(&self, customer_ids: &[CustomerId]) -> EngineResult<Vec<Order>>;

    /// Every order of one customer, whatever its status.
    fn list_orders_by_customer(&self, customer_id: &str) -> EngineResult<Vec<Order>>;
}

/// Write side of the boundary. Called once per chunk.
pub trait AssignmentSink {
    /// Set `store_id` on each listed customer. Idempotent; touches no other
    /// column. Unknown customer ids are skipped.
    fn assign_store(&self, assignments: &[Assignment]) -> EngineResult<()>;
}

impl<T: ChampionSource + ?Sized> ChampionSource for &T {
    fn list_companies(&self) -> EngineResult<Vec<Company>> {
        (**self).list_companies()
    }

    fn find_company(&self, company_id: &str) -> EngineResult<Option<Company>> {
        (**self).find_company(company_id)
    }

    fn list_stores(&self, company_id: &str) -> EngineResult<Vec<Store>> {
        (**self).list_stores(company_id)
    }

    fn list_unassigned_customer_phones(
        &self,
        company_id: &str,
        page_size: usize,
    ) -> EngineResult<Vec<Phone>> {
        (**self).list_unassigned_customer_phones(company_id, page_size)
    }

    fn list_customers_by_phones(
        &self,
        company_id: &str,
        phones: &[Phone],
        unassigned_only: bool,
    ) -> EngineResult<Vec<Customer>> {
        (**self).list_customers_by_phones(company_id, phones, unassigned_only)
    }

    fn list_completed_orders(&self, customer_ids: &[CustomerId]) -> EngineResult<Vec<Order>> {
        (**self).list_completed_orders(customer_ids)
    }

    fn list_orders_by_customer(&self, customer_id: &str) -> EngineResult<Vec<Order>> {
        (**self).list_orders_by_customer(customer_id)
    }
}

impl<T: AssignmentSink + ?Sized> AssignmentSink for &T {
    fn assign_store(&self, assignments: &[Assignment]) -> EngineResult<()> {
        (**self).assign_store(assignments)
    }
}

/// Convenience for callers that hold a company id and need the record.
pub fn require_company<S: ChampionSource + ?Sized>(
    source: &S,
    company_id: &CompanyId,
) -> EngineResult<Company> {
    source
        .find_company(company_id)?
        .ok_or_else(|| crate::error::EngineError::CompanyNotFound {
            company_id: company_id.clone(),
        })
}
