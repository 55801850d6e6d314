//! # linkmix
//!
//! Builds mixed-linker covalent organic framework structures. A stacked
//! TP-PA framework is generated from a single-layer cell, a subset of its
//! keto-enamine (TP) nodes is converted to imine (TPB) nodes, and every
//! bridging diamine (PA) unit is retyped according to the nodes it joins.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Immutable structure model, checkpoint file
//!   I/O, the framework layout and the literal retyping tables.
//!
//! - **[`engine`]: The Transform.** The atom-type reassignment itself, its
//!   error taxonomy and progress reporting. Pure: no I/O, no global state.
//!
//! - **[`workflows`]: The Public API.** Stacking construction, seeded scenario
//!   planning, batch generation and layer extraction, composed from the two
//!   layers below.

pub mod core;
pub mod engine;
pub mod workflows;
