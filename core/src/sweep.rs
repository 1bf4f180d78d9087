//! Batch sweep — resolves one page of unassigned phone groups per company.
//!
//! Per company, linear:
//!   eligibility → stores → page of unassigned phones → their customers
//!   → their completed orders → pipeline
//!
//! One invocation handles at most `page_size` phones per company. Only
//! phones with a qualifying order are paged, so each call makes progress.
//! Draining the backlog means calling again; the engine does not loop.

use crate::{
    engine::ChampionEngine,
    error::EngineResult,
    grouping::{customer_ids, group_by_phone},
    model::Company,
    pipeline::{resolve_scope, ScopeOutcome},
    policy::EligibilityOracle,
    report::{CompanyOutcome, SweepReport},
    source::{AssignmentSink, ChampionSource},
};

impl<S, O> ChampionEngine<S, O>
where
    S: ChampionSource + AssignmentSink,
    O: EligibilityOracle,
{
    /// Sweep every company once, sequentially.
    ///
    /// A failing company is logged and recorded in the report; the sweep
    /// moves on. Only a failure to list companies aborts the whole call.
    pub fn sweep(&self) -> EngineResult<SweepReport> {
        let companies = self.source.list_companies()?;
        let mut report = SweepReport::new();

        for company in &companies {
            let outcome = match self.sweep_company(company) {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::warn!("sweep: company {} failed: {e}", company.company_id);
                    CompanyOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            report.push(company.company_id.clone(), outcome);
        }

        log::info!(
            "sweep: {} companies, {} resolved, {} blocked, {} failed, {} assignments",
            companies.len(),
            report.resolved_count(),
            report.blocked_count(),
            report.failed_count(),
            report.assignment_count()
        );
        Ok(report)
    }

    /// Sweep a single company. Errors abort this company only; chunks
    /// already written stay written.
    pub fn sweep_company(&self, company: &Company) -> EngineResult<CompanyOutcome> {
        if self.oracle.is_blocked(company)? {
            log::debug!("sweep: company {} blocked", company.company_id);
            return Ok(CompanyOutcome::Blocked);
        }

        let company_id = company.company_id.as_str();
        let stores = self.source.list_stores(company_id)?;
        let phones = self
            .source
            .list_unassigned_customer_phones(company_id, self.config().effective_page_size())?;
        if phones.is_empty() {
            return Ok(CompanyOutcome::Resolved(ScopeOutcome::default()));
        }

        let customers = self
            .source
            .list_customers_by_phones(company_id, &phones, true)?;
        let ids = customer_ids(&group_by_phone(&customers));
        let orders = self.source.list_completed_orders(&ids)?;

        let scope = resolve_scope(&stores, &customers, &orders, self.config(), &self.source)?;
        log::info!(
            "sweep: company {company_id}: {} phones, {} champions, {} customers assigned",
            scope.phones,
            scope.champions,
            scope.assignments
        );
        Ok(CompanyOutcome::Resolved(scope))
    }
}
