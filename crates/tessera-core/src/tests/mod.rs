//! Unit tests for `tessera_core` types.

mod config_tests;
