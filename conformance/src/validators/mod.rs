//! Validators, one module per property group.
//!
//! Every validator has the signature
//! `fn validate(limits: &Limits) -> anyhow::Result<ConformanceReport>`.

pub mod families;
pub mod partitions;
pub mod pipeline;
pub mod store;
pub mod tableaux;
