//! Provides input/output functionality for structure files.
//!
//! Structures are exchanged through the plain-text checkpoint format
//! ([`chk`]); the [`traits::StructureFile`] trait gives every format the same
//! reader/writer API and path helpers.

pub mod chk;
pub mod traits;
