//! Stages of the atom-type reassignment.
//!
//! Each stage works on owned copies of the per-atom element numbers and labels
//! and reads connectivity from the untouched input structure.

pub mod donor_conversion;
pub mod linker_context;
