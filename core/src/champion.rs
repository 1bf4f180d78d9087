//! Champion selection — one winning store per phone group.
//!
//! POLICY (applied to each phone independently):
//!   1. If any store in the group is a show room, only show rooms compete.
//!   2. Most completed orders wins.
//!   3. Equal orders: highest total value wins.
//!   4. Equal orders and value: lowest store id wins.
//!   5. No eligible store: no champion for that phone.

use crate::{
    aggregate::{PhoneStoreAggregates, StoreAggregate},
    types::{Phone, StoreId},
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// phone → winning aggregate. Phones without a champion are absent.
pub type Champions = BTreeMap<Phone, StoreAggregate>;

pub fn select_champions(aggregates: &PhoneStoreAggregates) -> Champions {
    aggregates
        .iter()
        .filter_map(|(phone, per_store)| {
            select_for_phone(per_store).map(|winner| (phone.clone(), winner.clone()))
        })
        .collect()
}

/// Pick the champion among one phone's stores.
pub fn select_for_phone(per_store: &BTreeMap<StoreId, StoreAggregate>) -> Option<&StoreAggregate> {
    let show_room_only = per_store.values().any(|a| a.store_type.is_show_room());

    per_store
        .values()
        .filter(|a| !show_room_only || a.store_type.is_show_room())
        .fold(None, |best: Option<&StoreAggregate>, candidate| match best {
            Some(current) if rank(candidate, current) != Ordering::Greater => Some(current),
            _ => Some(candidate),
        })
}

/// Orders first, then value. Store id order is left to iteration.
fn rank(a: &StoreAggregate, b: &StoreAggregate) -> Ordering {
    a.total_orders.cmp(&b.total_orders).then_with(|| {
        a.total_value
            .partial_cmp(&b.total_value)
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoreType;

    fn agg(id: &str, store_type: StoreType, orders: u64, value: f64) -> StoreAggregate {
        StoreAggregate {
            store_id: id.into(),
            store_type,
            total_orders: orders,
            total_value: value,
        }
    }

    fn phone_of(aggs: Vec<StoreAggregate>) -> BTreeMap<StoreId, StoreAggregate> {
        aggs.into_iter().map(|a| (a.store_id.clone(), a)).collect()
    }

    #[test]
    fn order_count_beats_value() {
        let per_store = phone_of(vec![
            agg("s-a", StoreType::Physical, 2, 150.0),
            agg("s-b", StoreType::Physical, 1, 500.0),
        ]);
        assert_eq!(select_for_phone(&per_store).unwrap().store_id, "s-a");
    }

    #[test]
    fn equal_orders_fall_back_to_value() {
        let per_store = phone_of(vec![
            agg("s-a", StoreType::ECommerce, 3, 90.0),
            agg("s-b", StoreType::ECommerce, 3, 120.0),
        ]);
        assert_eq!(select_for_phone(&per_store).unwrap().store_id, "s-b");
    }

    #[test]
    fn full_tie_goes_to_lowest_store_id() {
        let per_store = phone_of(vec![
            agg("s-c", StoreType::Physical, 2, 80.0),
            agg("s-a", StoreType::Physical, 2, 80.0),
            agg("s-b", StoreType::Physical, 2, 80.0),
        ]);
        assert_eq!(select_for_phone(&per_store).unwrap().store_id, "s-a");
    }

    #[test]
    fn show_room_overrides_larger_totals() {
        let per_store = phone_of(vec![
            agg("s-a", StoreType::Physical, 5, 1000.0),
            agg("s-b", StoreType::ShowRoom, 3, 10.0),
        ]);
        let winner = select_for_phone(&per_store).unwrap();
        assert_eq!(winner.store_id, "s-b");
        assert_eq!(winner.store_type, StoreType::ShowRoom);
    }

    #[test]
    fn show_rooms_compete_among_themselves() {
        let per_store = phone_of(vec![
            agg("s-a", StoreType::ShowRoom, 1, 900.0),
            agg("s-b", StoreType::ShowRoom, 2, 10.0),
            agg("s-c", StoreType::ECommerce, 9, 10.0),
        ]);
        assert_eq!(select_for_phone(&per_store).unwrap().store_id, "s-b");
    }

    #[test]
    fn negative_values_still_rank() {
        let per_store = phone_of(vec![
            agg("s-a", StoreType::Physical, 1, -20.0),
            agg("s-b", StoreType::Physical, 1, -5.0),
        ]);
        assert_eq!(select_for_phone(&per_store).unwrap().store_id, "s-b");
    }

    #[test]
    fn phones_without_stores_have_no_champion() {
        let mut aggregates = PhoneStoreAggregates::new();
        aggregates.insert("phone-empty".into(), BTreeMap::new());
        aggregates.insert(
            "phone-one".into(),
            phone_of(vec![agg("s-a", StoreType::Physical, 1, 1.0)]),
        );
        let champions = select_champions(&aggregates);

        assert_eq!(champions.len(), 1);
        assert_eq!(champions["phone-one"].store_id, "s-a");
    }
}
