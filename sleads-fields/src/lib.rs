//! Pure field logic for the Sleads CMS client.
//!
//! This crate provides the two functions sitting between the wire and the
//! live field collection:
//!
//! - [`transform`] resolves fetched fields against a language selection
//! - [`merge`] reconciles a previous collection with a fresh one
//!
//! Both are total and deterministic, with no I/O. `merge` is idempotent
//! over repeated application of the same incoming set:
//! `merge(merge(A, B), B) == merge(A, B)`, which keeps the collection
//! stable no matter how often a refresh re-delivers the same data.

mod merge;
mod transform;

pub use merge::merge;
pub use transform::{transform, DEFAULT_LANGUAGE};
