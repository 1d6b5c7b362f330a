#![forbid(unsafe_code)]

//! Core: geometry shared by the tabgrid layout engine and its hosts.
//!
//! # Role in tabgrid
//! `tabgrid-core` holds the value types every other crate speaks in:
//! container sizes, split orientations, clamped flex fractions and the
//! integer pixel rectangles handed back to the host for positioning.
//!
//! # How it fits in the system
//! `tabgrid-layout` builds region trees out of these types and pushes
//! resolved sizes to chart surfaces. Nothing here knows about panes,
//! templates or drag state.

pub mod geometry;

pub use geometry::{Axis, Fraction, Orientation, PixelRect, Size};
