//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use champion_core::{
    error::EngineResult,
    model::{Assignment, Company, Customer, Order, OrderStatus, Store, StoreType},
    source::{AssignmentSink, ChampionSource},
    store::SqliteStore,
    types::{CustomerId, Phone},
};
use std::cell::{Cell, RefCell};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Migrated, empty in-memory store.
pub fn fresh_store() -> SqliteStore {
    init_logging();
    let store = SqliteStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

pub fn add_company(store: &SqliteStore, id: &str) -> Company {
    let company = Company {
        company_id: id.into(),
        name: format!("Company {id}"),
        plan: "standard".into(),
    };
    store.insert_company(&company).expect("insert company");
    company
}

pub fn add_store(store: &SqliteStore, company: &Company, id: &str, store_type: StoreType) -> Store {
    let s = Store {
        store_id: id.into(),
        company_id: company.company_id.clone(),
        store_type,
    };
    store.insert_store(&s).expect("insert store");
    s
}

pub fn add_customer(
    store: &SqliteStore,
    company: &Company,
    id: &str,
    phone: Option<&str>,
) -> Customer {
    let customer = Customer {
        customer_id: id.into(),
        company_id: company.company_id.clone(),
        phone: phone.map(Into::into),
        store_id: None,
    };
    store.insert_customer(&customer).expect("insert customer");
    customer
}

pub fn new_order(
    id: &str,
    customer: &Customer,
    store_id: Option<&str>,
    status: OrderStatus,
    total: f64,
) -> Order {
    Order {
        order_id: id.into(),
        company_id: Some(customer.company_id.clone()),
        customer_id: customer.customer_id.clone(),
        store_id: store_id.map(Into::into),
        status,
        total,
    }
}

pub fn add_order(
    store: &SqliteStore,
    id: &str,
    customer: &Customer,
    store_id: Option<&str>,
    status: OrderStatus,
    total: f64,
) -> Order {
    let order = new_order(id, customer, store_id, status, total);
    store.insert_order(&order).expect("insert order");
    order
}

pub fn completed(
    store: &SqliteStore,
    id: &str,
    customer: &Customer,
    store_id: &str,
    total: f64,
) -> Order {
    add_order(store, id, customer, Some(store_id), OrderStatus::Completed, total)
}

/// Wraps a store, counting calls and optionally failing for one company.
pub struct CountingStore {
    pub inner: SqliteStore,
    pub reads: Cell<usize>,
    pub store_reads: Cell<usize>,
    pub customer_reads: Cell<usize>,
    pub write_sizes: RefCell<Vec<usize>>,
    pub fail_stores_for: Option<String>,
}

impl CountingStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
            store_reads: Cell::new(0),
            customer_reads: Cell::new(0),
            write_sizes: RefCell::new(Vec::new()),
            fail_stores_for: None,
        }
    }

    pub fn failing_for(mut self, company_id: &str) -> Self {
        self.fail_stores_for = Some(company_id.into());
        self
    }

    fn tick(&self) {
        self.reads.set(self.reads.get() + 1);
    }
}

impl ChampionSource for CountingStore {
    fn list_companies(&self) -> EngineResult<Vec<Company>> {
        self.tick();
        self.inner.list_companies()
    }

    fn find_company(&self, company_id: &str) -> EngineResult<Option<Company>> {
        self.tick();
        self.inner.find_company(company_id)
    }

    fn list_stores(&self, company_id: &str) -> EngineResult<Vec<Store>> {
        self.tick();
        self.store_reads.set(self.store_reads.get() + 1);
        if self.fail_stores_for.as_deref() == Some(company_id) {
            return Err(anyhow::anyhow!("store listing unavailable for {company_id}").into());
        }
        self.inner.list_stores(company_id)
    }

    fn list_unassigned_customer_phones(
        &self,
        company_id: &str,
        page_size: usize,
    ) -> EngineResult<Vec<Phone>> {
        self.tick();
        self.inner.list_unassigned_customer_phones(company_id, page_size)
    }

    fn list_customers_by_phones(
        &self,
        company_id: &str,
        phones: &[Phone],
        unassigned_only: bool,
    ) -> EngineResult<Vec<Customer>> {
        self.tick();
        self.customer_reads.set(self.customer_reads.get() + 1);
        self.inner.list_customers_by_phones(company_id, phones, unassigned_only)
    }

    fn list_completed_orders(&self, customer_ids: &[CustomerId]) -> EngineResult<Vec<Order>> {
        self.tick();
        self.inner.list_completed_orders(customer_ids)
    }

    fn list_orders_by_customer(&self, customer_id: &str) -> EngineResult<Vec<Order>> {
        self.tick();
        self.inner.list_orders_by_customer(customer_id)
    }
}

impl AssignmentSink for CountingStore {
    fn assign_store(&self, assignments: &[Assignment]) -> EngineResult<()> {
        self.write_sizes.borrow_mut().push(assignments.len());
        self.inner.assign_store(assignments)
    }
}
