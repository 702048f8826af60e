//! Tests for the registration coordinator.

pub mod mocks;

mod flow_tests;
