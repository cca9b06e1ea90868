use crate::core::grid::round_to;
use crate::domain::model::{Recommendation, WornGirth};
use std::f64::consts::PI;

/// Share of the combined diameter left after the sleeve wall gives under wear.
pub const COMPRESSION_FACTOR: f64 = 0.9;

/// Estimated circumference of a sleeve while worn.
///
/// The wall (external minus opening diameter) sits on top of the user's
/// diameter and compresses by 10%, but never below the sleeve's own
/// external diameter.
pub fn worn_girth(
    recommended: Recommendation,
    external_diameter: f64,
    user_diameter: f64,
) -> WornGirth {
    let Some(opening) = recommended.diameter() else {
        return WornGirth::NotApplicable;
    };

    let wall_thickness = external_diameter - opening;
    let total_diameter = wall_thickness + user_diameter;
    let compressed = total_diameter * COMPRESSION_FACTOR;
    let effective = compressed.max(external_diameter);

    WornGirth::Circumference(round_to(effective * PI, 2))
}
