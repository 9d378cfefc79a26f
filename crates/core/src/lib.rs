//! Domain building blocks for the assets service.
//!
//! Everything in this crate is free of I/O: the error taxonomy, shared type
//! aliases, pagination normalization and acquisition-date handling.

pub mod dates;
pub mod error;
pub mod pagination;
pub mod types;
