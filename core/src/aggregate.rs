//! Order aggregation — per phone, per store totals of qualifying orders.

use crate::{
    grouping::PhoneGroups,
    model::{Order, Store, StoreType},
    types::{Phone, StoreId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Completed-order totals for one (phone, store) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreAggregate {
    pub store_id: StoreId,
    pub store_type: StoreType,
    pub total_orders: u64,
    /// Sum of order totals. Sign is taken as-is.
    pub total_value: f64,
}

/// phone → store id → aggregate. Every grouped phone has an entry,
/// possibly empty.
pub type PhoneStoreAggregates = BTreeMap<Phone, BTreeMap<StoreId, StoreAggregate>>;

/// Fold orders into per-phone, per-store aggregates.
///
/// An order is skipped when it is not completed, has no store, its store
/// is not among `stores`, or its customer is not in `groups`. Linear in
/// the number of orders.
pub fn aggregate_orders(
    stores: &[Store],
    orders: &[Order],
    groups: &PhoneGroups,
) -> PhoneStoreAggregates {
    let mut aggregates: PhoneStoreAggregates = PhoneStoreAggregates::new();
    let mut phone_by_customer: HashMap<&str, &str> = HashMap::new();
    for (phone, customer_ids) in groups {
        for customer_id in customer_ids {
            phone_by_customer.insert(customer_id.as_str(), phone.as_str());
        }
        aggregates.insert(phone.clone(), BTreeMap::new());
    }

    let store_types: HashMap<&str, StoreType> = stores
        .iter()
        .map(|s| (s.store_id.as_str(), s.store_type))
        .collect();

    for order in orders {
        if !order.counts_toward_champion() {
            continue;
        }
        let Some(store_id) = order.store_id.as_deref() else {
            continue;
        };
        let (Some(phone), Some(store_type)) = (
            phone_by_customer.get(order.customer_id.as_str()),
            store_types.get(store_id),
        ) else {
            continue;
        };

        let per_store = aggregates.entry((*phone).to_string()).or_default();
        let aggregate = per_store
            .entry(store_id.to_string())
            .or_insert_with(|| StoreAggregate {
                store_id: store_id.to_string(),
                store_type: *store_type,
                total_orders: 0,
                total_value: 0.0,
            });
        aggregate.total_orders += 1;
        aggregate.total_value += order.total;
    }

    aggregates
}
