//! Core functionality for the driver
//!
//! This module contains the batch execution engine and result normalization.

pub mod batch;
pub mod errors;
pub mod result;
