//! Unit tests for xdocker
//!
//! These tests use scripted port implementations and run fast without
//! network I/O.

mod helpers;
mod property_tests;
mod registry_tests;
mod session_tests;
