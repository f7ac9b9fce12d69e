//! Bitmask-to-name resolution.
//!
//! Checker flag enumerations mix single-bit constants with composite aliases
//! (`Literal`, `Nullable`, `Variable`, ...). Only the single-bit constants name
//! an individual fact about a value, so composites never appear in a summary.

use rustc_hash::FxHashSet;
use serde::Serialize;

/// A raw flag mask together with the names of the bits it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlagSummary {
    pub flags: u32,
    pub names: Vec<String>,
}

impl FlagSummary {
    /// Resolve `flags` against a `(name, value)` table.
    pub fn resolve(flags: u32, table: &[(&str, u32)]) -> Self {
        Self {
            flags,
            names: flag_names(flags, table),
        }
    }
}

/// Names of every single-bit constant in `table` that is set in `mask`,
/// sorted. When the table carries several names for one bit, the first
/// listed wins.
pub fn flag_names(mask: u32, table: &[(&str, u32)]) -> Vec<String> {
    let mut seen_bits = FxHashSet::default();
    let mut names: Vec<String> = table
        .iter()
        .filter(|(_, value)| value.is_power_of_two() && mask & value != 0)
        .filter(|(_, value)| seen_bits.insert(*value))
        .map(|(name, _)| (*name).to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}
