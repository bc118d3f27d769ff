//! Fundctl - On-chain investment fund provisioning.
//!
//! This crate provisions a single fund instance on an Ethereum-style network:
//! it resolves a deployment configuration into a typed provisioning request,
//! delegates creation of the fund's governance wrapper, and then drives the
//! fixed sequence of setup transactions that attach the fund's functional
//! components (accounting, fees, participation, policy, shares, trading,
//! vault) to that wrapper, ending with a completion call.
//!
//! # Architecture
//!
//! - [`config`] - TOML configuration loading with env overrides for secrets
//! - [`deployment`] - the on-chain address registry (JSON)
//! - [`domain`] - value types: provisioning request, exchange identifiers,
//!   fixed-point unit conversions
//! - [`resolver`] - pure resolution of config + registry into a request
//! - [`chain`] - ports and the alloy-backed adapter for the chain boundary
//! - [`provision`] - the setup stage machine, sequencer and resume state
//! - [`app`] - run orchestration
//! - [`cli`] - command definitions and dispatch
//!
//! The sequencer issues exactly one transaction per stage and waits for the
//! configured confirmation depth before moving on. There is no automatic
//! rollback: a failed stage leaves everything before it committed on-chain,
//! and `fundctl resume` continues from the first unconfirmed stage.

pub mod app;
pub mod chain;
pub mod cli;
pub mod config;
pub mod deployment;
pub mod domain;
pub mod error;
pub mod provision;
pub mod resolver;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
