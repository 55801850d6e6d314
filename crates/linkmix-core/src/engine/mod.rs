//! # Engine Module
//!
//! The atom-type reassignment that turns a TP-PA framework into a mixed
//! TP/TPB framework.
//!
//! ## Overview
//!
//! A reassignment runs in two stages over owned copies of the per-atom data:
//!
//! 1. **Donor conversion** ([`tasks::donor_conversion`]) relabels every atom of
//!    the selected node units with its imine-form counterpart.
//! 2. **Linker retyping** ([`tasks::linker_context`]) reads the node family on
//!    each side of every linking unit and relabels the unit from the decision
//!    table, marking amine hydrogens that no longer exist for deletion.
//!
//! The marked atoms are then dropped and a new structure is assembled
//! ([`reassign`]). The input is never modified.
//!
//! - **Error Handling** ([`error`]) - [`error::ReassignError`] distinguishes bad
//!   targets, unexpected chemistry and internal table faults.
//! - **Progress Monitoring** ([`progress`]) - optional callbacks for front ends.

pub mod error;
pub mod progress;
pub mod reassign;
pub mod tasks;
