//! Phone grouping — partitions customers into phone groups.
//!
//! A phone group is the unit of resolution: every customer in it ends up
//! with the same champion store. Keys are compared byte for byte; callers
//! hand in canonical phone values.

use crate::{
    model::Customer,
    types::{CustomerId, Phone},
};
use std::collections::BTreeMap;

/// phone → customer ids sharing it, in input order.
pub type PhoneGroups = BTreeMap<Phone, Vec<CustomerId>>;

/// Group customers by phone. Customers without a phone are dropped.
pub fn group_by_phone<'a, I>(customers: I) -> PhoneGroups
where
    I: IntoIterator<Item = &'a Customer>,
{
    let mut groups = PhoneGroups::new();
    for customer in customers {
        let Some(phone) = customer.grouping_phone() else {
            continue;
        };
        groups
            .entry(phone.to_string())
            .or_default()
            .push(customer.customer_id.clone());
    }
    groups
}

/// Every customer id across all groups, group by group.
pub fn customer_ids(groups: &PhoneGroups) -> Vec<CustomerId> {
    groups.values().flatten().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, phone: Option<&str>) -> Customer {
        Customer {
            customer_id: id.into(),
            company_id: "co-1".into(),
            phone: phone.map(Into::into),
            store_id: None,
        }
    }

    #[test]
    fn customers_sharing_a_phone_land_in_one_group_in_input_order() {
        let customers = vec![
            customer("c-3", Some("5511900000001")),
            customer("c-1", Some("5511900000002")),
            customer("c-2", Some("5511900000001")),
        ];
        let groups = group_by_phone(&customers);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["5511900000001"], vec!["c-3", "c-2"]);
        assert_eq!(groups["5511900000002"], vec!["c-1"]);
    }

    #[test]
    fn missing_and_empty_phones_are_dropped() {
        let customers = vec![
            customer("c-1", None),
            customer("c-2", Some("")),
            customer("c-3", Some("31999990000")),
        ];
        let groups = group_by_phone(&customers);

        assert_eq!(groups.len(), 1);
        assert_eq!(customer_ids(&groups), vec!["c-3"]);
    }

    #[test]
    fn formatting_differences_are_not_normalized() {
        let customers = vec![
            customer("c-1", Some("+55 11 90000-0001")),
            customer("c-2", Some("5511900000001")),
        ];
        assert_eq!(group_by_phone(&customers).len(), 2);
    }
}
