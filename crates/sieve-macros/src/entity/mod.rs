//! Implementation of the `#[derive(Entity)]` macro.
//!
//! This module provides derive macro support for sieve entities, generating
//! the field registry, the accessor and field constants from struct
//! annotations.

pub(crate) mod attrs;
mod derive;

pub use derive::entity_derive_impl;
