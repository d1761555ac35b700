//! Linear unit conversion into feet

use crate::types::Unit;

/// Millimeters in one foot
pub const MM_PER_FOOT: f64 = 304.8;

/// Convert a linear dimension into feet.
///
/// Negative input is passed through unchanged; range checks belong to the caller.
pub fn to_canonical(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::LengthFeet => value,
        Unit::LengthMillimeter => value / MM_PER_FOOT,
    }
}
