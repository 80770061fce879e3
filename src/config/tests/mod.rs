//! Config module tests
//!
//! - Config loading and validation tests
