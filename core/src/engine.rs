//! The resolution engine — owns the collaborators and the config for one
//! or more invocations.
//!
//! ENTRY POINTS:
//!   - sweep / sweep_company   batch pass over unassigned customers (sweep.rs)
//!   - on_order_recorded       reactive pass for one new order (reactive.rs)
//!
//! RULES:
//!   - Every entry point runs the same pipeline (pipeline.rs).
//!   - Nothing is cached between invocations; only customer.store_id persists.
//!   - Collaborator failures propagate; nothing is retried here.

use crate::{
    config::EngineConfig,
    error::EngineResult,
    policy::EligibilityOracle,
    source::{AssignmentSink, ChampionSource},
};

pub struct ChampionEngine<S, O> {
    pub source: S,
    pub oracle: O,
    config: EngineConfig,
}

impl<S, O> ChampionEngine<S, O>
where
    S: ChampionSource + AssignmentSink,
    O: EligibilityOracle,
{
    /// Build an engine. Fails on an invalid config.
    pub fn new(source: S, oracle: O, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            oracle,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
