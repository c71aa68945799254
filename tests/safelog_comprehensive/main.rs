//! safelog Comprehensive Test Suite
//!
//! Tests for the serializer and logger guarantees, through the facade crate.
//!
//! ## Test Tier Structure
//!
//! - **Tier 1: Termination Invariants**
//!   Cyclic graphs finish with one sentinel per back-edge.
//!
//! - **Tier 2: Totality**
//!   Every input yields a string; hostile inputs fall back tier by tier.
//!
//! - **Tier 3: Logger Contract**
//!   One prefixed record per call on the right channel.
//!
//! - **Tier 4: Configuration**
//!   Loggers built from `safelog.toml`.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test safelog_comprehensive
//! ```

mod test_utils;

// Tier 1
mod termination_invariants;

// Tier 2
mod totality_tests;

// Tier 3
mod logger_contract;

// Tier 4
mod config_tests;
