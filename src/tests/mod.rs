//! Test modules for the Aero router.
//!
//! Crate-level tests that span several modules: configuration loading,
//! error reporting, and route tables built from configuration. Tests for
//! the radix tree itself live next to it in
//! `data_structures::radix_tree::tests`.

pub mod config_tests;
pub mod test_utils;

pub use test_utils::{route_path_strategy, TestFixture};
