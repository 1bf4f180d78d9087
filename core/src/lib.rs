//! Champion store resolution.
//!
//! Assigns every customer one primary store, derived from the completed
//! orders of all customers sharing their phone number within a company.

pub mod aggregate;
pub mod champion;
pub mod config;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod reactive;
pub mod report;
pub mod source;
pub mod store;
pub mod sweep;
pub mod synth;
pub mod types;
pub mod writer;
