//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod grammar_helpers;
pub mod sql_grammar;
