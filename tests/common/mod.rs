//! Common test utilities and helpers.
//!
//! This module provides shared functionality for integration tests:
//! - PDF fixture builders (plain and password-protected)
//! - Custom assertions on resolution outcomes

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
