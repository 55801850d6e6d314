//! # Core Module
//!
//! Stateless building blocks for mixed-linker framework construction.
//!
//! - **Structure model** ([`models`]) - atoms, bonds and the periodic cell, with
//!   the pure transforms (subsystem, supercell, translation) that every later
//!   stage composes.
//! - **File I/O** ([`io`]) - the text checkpoint format used to exchange
//!   structures with the force-field toolchain.
//! - **Framework knowledge** ([`framework`]) - the repeat-unit layout of the
//!   TP-PA framework and the static retyping tables.
//! - **Utilities** ([`utils`]) - unit conversions and small geometric helpers.

pub mod framework;
pub mod io;
pub mod models;
pub mod utils;
