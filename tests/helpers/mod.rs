//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Negotiator
//! application: a mock negotiation backend and conversation drivers.

#![allow(dead_code)]

pub mod backend_mock;
pub mod conversation;

pub use backend_mock::*;
pub use conversation::*;
