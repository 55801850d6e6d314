//! # Framework Module
//!
//! Chemistry-specific knowledge about the TP-PA covalent organic framework:
//! how its repeat cell is partitioned into node and linker units
//! ([`layout`]), and the fixed relabelling tables used when node units are
//! converted from the keto-enamine (TP) to the imine (TPB) form ([`tables`]).
//!
//! The tables are literal data and are reproduced entry by entry; nothing in
//! them is derived at runtime.

pub mod layout;
pub mod tables;

#[cfg(test)]
pub(crate) mod fixtures;
