//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory repository and provider implementations for mocking I/O
//! - A builder for `AppState` wired to those mocks

mod app_state_builder;
mod billing_mocks;

pub use app_state_builder::*;
pub use billing_mocks::*;
pub use factories::*;
pub use rate_limit_mocks::*;
