//! Shared primitive types used across the engine.

/// Identifier of a company, the partitioning scope of every resolution.
pub type CompanyId = String;

/// Identifier of a physical or online store.
pub type StoreId = String;

/// Identifier of a customer record.
pub type CustomerId = String;

/// Identifier of an order.
pub type OrderId = String;

/// A phone number exactly as stored. No normalization is applied.
pub type Phone = String;
