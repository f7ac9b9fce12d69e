//! Common types and utilities for the tsz-pick crates.
//!
//! This crate provides the pieces every other crate leans on:
//! - Position types and the UTF-16 `LineMap` (`Position`, `LineMap`)
//! - Bitmask-to-name resolution (`FlagSummary`, `flag_names`)
//! - Output bounds shared by the fact aggregator

// Position/line-map conversion in UTF-16 code units
pub mod position;
pub use position::{LineMap, Position, byte_offset_of, utf16_offset_of};

// Flag-name resolution for opaque bitmasks
pub mod flags;
pub use flags::{FlagSummary, flag_names};

// Centralized output bounds
pub mod limits;
