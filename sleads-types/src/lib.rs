//! Core type definitions for the Sleads CMS client.
//!
//! This crate defines the fundamental, host-agnostic types used throughout
//! the SDK:
//! - `Field` and `FetchedField` content records (display and wire shapes)
//! - `FetchKey` page + split-variant derivation
//!
//! Anything that talks to the network or a cache belongs in the other
//! crates, not here.

mod fetch_key;
mod field;

pub use fetch_key::FetchKey;
pub use field::{Field, FetchedField, FieldValue, LanguageValues};
