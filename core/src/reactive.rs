//! Reactive resolution — recompute one phone group when an order arrives.
//!
//! Short-circuits, in order: order without company, customer without
//! phone, unknown company, blocked company. None of them is an error and
//! none of them reads stores or customers.
//!
//! The group is recomputed from the customer's full order history plus
//! the triggering order, which need not be persisted yet.

use crate::{
    engine::ChampionEngine,
    error::EngineResult,
    model::{Customer, Order},
    pipeline::resolve_scope,
    policy::EligibilityOracle,
    report::ReactiveOutcome,
    source::{AssignmentSink, ChampionSource},
};

impl<S, O> ChampionEngine<S, O>
where
    S: ChampionSource + AssignmentSink,
    O: EligibilityOracle,
{
    pub fn on_order_recorded(
        &self,
        order: &Order,
        customer: &Customer,
    ) -> EngineResult<ReactiveOutcome> {
        let Some(company_id) = order.company_id.as_deref().filter(|id| !id.is_empty()) else {
            return Ok(ReactiveOutcome::NoCompany);
        };
        let Some(phone) = customer.grouping_phone() else {
            return Ok(ReactiveOutcome::NoPhone);
        };

        let Some(company) = self.source.find_company(company_id)? else {
            log::debug!("reactive: order {} names unknown company {company_id}", order.order_id);
            return Ok(ReactiveOutcome::CompanyNotFound);
        };
        if self.oracle.is_blocked(&company)? {
            return Ok(ReactiveOutcome::Blocked);
        }

        let stores = self.source.list_stores(company_id)?;
        let mut customers = self
            .source
            .list_customers_by_phones(company_id, &[phone.to_string()], false)?;
        if !customers.iter().any(|c| c.customer_id == customer.customer_id) {
            customers.push(customer.clone());
        }

        let mut orders = self.source.list_orders_by_customer(&customer.customer_id)?;
        // The triggering order may already be persisted; count it once.
        orders.retain(|o| o.order_id != order.order_id);
        orders.push(order.clone());

        let scope = resolve_scope(&stores, &customers, &orders, self.config(), &self.source)?;
        log::info!(
            "reactive: order {} for customer {}: {} champions, {} customers assigned",
            order.order_id,
            customer.customer_id,
            scope.champions,
            scope.assignments
        );
        Ok(ReactiveOutcome::Resolved(scope))
    }
}
