//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Partial application tests
//! - View/model conversion tests
//! - Number/min/max validation tests
//! - Focus/blur mediator scenarios
//! - Event wiring and deferred selection tests

#[cfg(test)]
mod binding_tests;
#[cfg(test)]
mod mediator_tests;
