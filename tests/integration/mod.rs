//! Integration tests

mod batch_execute_tests;
