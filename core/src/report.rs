//! Run reports returned by the orchestrators.

use crate::{pipeline::ScopeOutcome, types::CompanyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompanyOutcome {
    Blocked,
    Resolved(ScopeOutcome),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyReport {
    pub company_id: CompanyId,
    #[serde(flatten)]
    pub outcome: CompanyOutcome,
}

/// One sweep invocation across every company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub started_at: DateTime<Utc>,
    pub companies: Vec<CompanyReport>,
}

impl SweepReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            companies: Vec::new(),
        }
    }

    pub fn push(&mut self, company_id: CompanyId, outcome: CompanyOutcome) {
        self.companies.push(CompanyReport { company_id, outcome });
    }

    pub fn resolved_count(&self) -> usize {
        self.companies
            .iter()
            .filter(|c| matches!(c.outcome, CompanyOutcome::Resolved(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.companies
            .iter()
            .filter(|c| matches!(c.outcome, CompanyOutcome::Failed { .. }))
            .count()
    }

    pub fn blocked_count(&self) -> usize {
        self.companies
            .iter()
            .filter(|c| matches!(c.outcome, CompanyOutcome::Blocked))
            .count()
    }

    /// Assignments written across all resolved companies.
    pub fn assignment_count(&self) -> usize {
        self.companies
            .iter()
            .map(|c| match &c.outcome {
                CompanyOutcome::Resolved(scope) => scope.assignments,
                _ => 0,
            })
            .sum()
    }
}

impl Default for SweepReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the reactive path stopped, or what it wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReactiveOutcome {
    NoCompany,
    NoPhone,
    CompanyNotFound,
    Blocked,
    Resolved(ScopeOutcome),
}
