//! # Core Models Module
//!
//! Data structures describing an atomistic framework: the immutable
//! [`structure::Structure`] snapshot, its periodic [`cell::Cell`], and the
//! [`topology::Bond`] connectivity records.
//!
//! ## Usage
//!
//! ```ignore
//! use linkmix::core::models::{structure::Structure, topology::Bond};
//! use nalgebra::Point3;
//!
//! let system = Structure::new(
//!     vec![8, 1],
//!     vec![Point3::origin(), Point3::new(1.8, 0.0, 0.0)],
//!     vec!["O_W".into(), "H_W".into()],
//!     vec![Bond::new(0, 1)],
//!     None,
//! )?;
//! let hydrogen_only = system.subsystem(&[1])?;
//! ```

pub mod cell;
pub mod structure;
pub mod topology;
