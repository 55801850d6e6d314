//! # Workflows Module
//!
//! End-to-end procedures built on the reassignment engine.
//!
//! - **Stacking** ([`stacking`]) - builds the offset-stacked multilayer from a
//!   single-layer framework cell.
//! - **Scenario planning** ([`scenarios`]) - seeded, reproducible selection of
//!   the donor units to convert.
//! - **Generation** ([`generate`]) - converts a stacked framework once per
//!   scenario.
//! - **Layer extraction** ([`layers`]) - cuts selected bonded layers out of a
//!   stacked structure.
//!
//! Every input path, seed and parameter is passed in explicitly; nothing here
//! reads global state.

pub mod error;
pub mod generate;
pub mod layers;
pub mod scenarios;
pub mod stacking;
