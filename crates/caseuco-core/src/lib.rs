//! Core types and trait definitions for the CASE/UCO mapping engine.
//!
//! Two models live here side by side: the JSON-LD object graph ([`node`],
//! [`facet`]) and the forensic record model ([`record`], [`payload`]). The
//! [`store::RecordStore`] trait is the only seam to a record backend.
//!
//! This crate is free of logging and I/O; the mapping crate and the binary
//! depend on it.

pub mod error;
pub mod event;
pub mod facet;
pub mod memory;
pub mod node;
pub mod payload;
pub mod record;
pub mod store;

pub use error::{Error, Result};
