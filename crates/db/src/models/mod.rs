//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and the `Deserialize` input DTO accepted from clients.

pub mod asset;
