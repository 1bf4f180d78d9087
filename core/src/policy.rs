//! Eligibility oracles — decide whether a company takes part at all.
//!
//! A blocked company is a silent stop, never an error.

use crate::{error::EngineResult, model::Company, types::CompanyId};
use std::collections::HashSet;

pub trait EligibilityOracle {
    fn is_blocked(&self, company: &Company) -> EngineResult<bool>;
}

impl<T: EligibilityOracle + ?Sized> EligibilityOracle for &T {
    fn is_blocked(&self, company: &Company) -> EngineResult<bool> {
        (**self).is_blocked(company)
    }
}

/// Every company participates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl EligibilityOracle for AllowAll {
    fn is_blocked(&self, _company: &Company) -> EngineResult<bool> {
        Ok(false)
    }
}

/// Blocks an explicit set of company ids.
#[derive(Debug, Clone, Default)]
pub struct BlockList {
    blocked: HashSet<CompanyId>,
}

impl BlockList {
    pub fn new<I: IntoIterator<Item = CompanyId>>(ids: I) -> Self {
        Self {
            blocked: ids.into_iter().collect(),
        }
    }
}

impl EligibilityOracle for BlockList {
    fn is_blocked(&self, company: &Company) -> EngineResult<bool> {
        Ok(self.blocked.contains(&company.company_id))
    }
}

pub const FREE_PLAN: &str = "free";

/// Blocks companies on the free plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeTier;

impl EligibilityOracle for FreeTier {
    fn is_blocked(&self, company: &Company) -> EngineResult<bool> {
        Ok(company.plan.eq_ignore_ascii_case(FREE_PLAN))
    }
}

/// Blocked if either oracle blocks.
pub struct Either<A, B>(pub A, pub B);

impl<A: EligibilityOracle, B: EligibilityOracle> EligibilityOracle for Either<A, B> {
    fn is_blocked(&self, company: &Company) -> EngineResult<bool> {
        Ok(self.0.is_blocked(company)? || self.1.is_blocked(company)?)
    }
}
