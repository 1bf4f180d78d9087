//! Deterministic synthetic datasets.
//!
//! RULE: Generation never touches a platform RNG. Everything flows from
//! one seed through SynthRng, so the same seed always yields the same
//! companies, stores, customers, orders and ids.

use crate::{
    error::EngineResult,
    model::{Company, Customer, Order, OrderStatus, Store, StoreType},
    policy::FREE_PLAN,
    store::SqliteStore,
};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

/// A seeded RNG stream.
pub struct SynthRng {
    inner: Pcg64Mcg,
}

impl SynthRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Simplified Pareto draw. Most orders are small, a few are large.
    pub fn pareto(&mut self, x_min: f64, alpha: f64) -> f64 {
        let u = self.next_f64().max(1e-10);
        x_min * u.powf(-1.0 / alpha)
    }

    /// A v4 UUID built from this stream's bytes.
    pub fn uuid(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
    }

    /// Mobile-style number: two-digit area code, a 9, eight digits.
    pub fn phone(&mut self) -> String {
        let area = 31 + self.next_u64_below(69);
        let rest = 10_000_000 + self.next_u64_below(90_000_000);
        format!("{area}9{rest}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthConfig {
    pub companies: usize,
    pub stores_per_company: usize,
    pub customers_per_company: usize,
    /// Probability a new customer reuses an earlier customer's phone.
    pub shared_phone_rate: f64,
    /// Probability a customer has no phone at all.
    pub missing_phone_rate: f64,
    pub show_room_rate: f64,
    pub max_orders_per_customer: u64,
    pub completed_rate: f64,
    /// Probability an order was placed outside any store.
    pub storeless_order_rate: f64,
    pub free_plan_rate: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            companies: 3,
            stores_per_company: 4,
            customers_per_company: 200,
            shared_phone_rate: 0.15,
            missing_phone_rate: 0.05,
            show_room_rate: 0.2,
            max_orders_per_customer: 6,
            completed_rate: 0.7,
            storeless_order_rate: 0.05,
            free_plan_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub companies: Vec<Company>,
    pub stores: Vec<Store>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
}

impl Dataset {
    pub fn generate(seed: u64, config: &SynthConfig) -> Self {
        let mut rng = SynthRng::new(seed);
        let mut data = Dataset::default();

        for c in 0..config.companies {
            let company_id = rng.uuid();
            let plan = if rng.chance(config.free_plan_rate) {
                FREE_PLAN
            } else {
                "standard"
            };
            data.companies.push(Company {
                company_id: company_id.clone(),
                name: format!("Company {c:03}"),
                plan: plan.into(),
            });

            let first_store = data.stores.len();
            for _ in 0..config.stores_per_company {
                let store_type = if rng.chance(config.show_room_rate) {
                    StoreType::ShowRoom
                } else if rng.chance(0.5) {
                    StoreType::Physical
                } else {
                    StoreType::ECommerce
                };
                data.stores.push(Store {
                    store_id: rng.uuid(),
                    company_id: company_id.clone(),
                    store_type,
                });
            }
            let company_stores = first_store..data.stores.len();

            let mut phones: Vec<String> = Vec::new();
            for _ in 0..config.customers_per_company {
                let phone = if rng.chance(config.missing_phone_rate) {
                    None
                } else if !phones.is_empty() && rng.chance(config.shared_phone_rate) {
                    Some(phones[rng.next_u64_below(phones.len() as u64) as usize].clone())
                } else {
                    let p = rng.phone();
                    phones.push(p.clone());
                    Some(p)
                };
                let customer_id = rng.uuid();

                let n_orders = rng.next_u64_below(config.max_orders_per_customer + 1);
                for _ in 0..n_orders {
                    let storeless = rng.chance(config.storeless_order_rate);
                    let store_id = if company_stores.is_empty() || storeless {
                        None
                    } else {
                        let i = company_stores.start
                            + rng.next_u64_below(company_stores.len() as u64) as usize;
                        Some(data.stores[i].store_id.clone())
                    };
                    let status = if rng.chance(config.completed_rate) {
                        OrderStatus::Completed
                    } else {
                        match rng.next_u64_below(4) {
                            0 => OrderStatus::Pending,
                            1 => OrderStatus::Processing,
                            2 => OrderStatus::Canceled,
                            _ => OrderStatus::Refunded,
                        }
                    };
                    let total = (rng.pareto(20.0, 1.6) * 100.0).round() / 100.0;
                    data.orders.push(Order {
                        order_id: rng.uuid(),
                        company_id: Some(company_id.clone()),
                        customer_id: customer_id.clone(),
                        store_id,
                        status,
                        total,
                    });
                }

                data.customers.push(Customer {
                    customer_id,
                    company_id: company_id.clone(),
                    phone,
                    store_id: None,
                });
            }
        }
        data
    }

    /// Insert everything into a migrated store.
    pub fn load_into(&self, store: &SqliteStore) -> EngineResult<()> {
        for c in &self.companies {
            store.insert_company(c)?;
        }
        for s in &self.stores {
            store.insert_store(s)?;
        }
        for c in &self.customers {
            store.insert_customer(c)?;
        }
        for o in &self.orders {
            store.insert_order(o)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn same_seed_same_dataset() {
        let config = SynthConfig::default();
        let a = Dataset::generate(1234, &config);
        let b = Dataset::generate(1234, &config);

        assert_eq!(a.customers, b.customers);
        assert_eq!(a.orders, b.orders);
        assert_ne!(a.customers, Dataset::generate(1235, &config).customers);
    }

    #[test]
    fn generated_ids_are_valid_uuids() {
        let mut rng = SynthRng::new(7);
        for _ in 0..20 {
            assert!(Uuid::parse_str(&rng.uuid()).is_ok());
        }
    }

    #[test]
    fn phones_have_the_mobile_shape() {
        let mut rng = SynthRng::new(99);
        for _ in 0..50 {
            let phone = rng.phone();
            assert_eq!(phone.len(), 11, "unexpected phone {phone}");
            assert_eq!(&phone[2..3], "9");
        }
    }

    #[test]
    fn shared_phones_occur() {
        let config = SynthConfig {
            shared_phone_rate: 0.5,
            ..SynthConfig::default()
        };
        let data = Dataset::generate(42, &config);
        let groups = crate::grouping::group_by_phone(&data.customers);
        assert!(groups.values().any(|ids| ids.len() > 1));
    }
}
