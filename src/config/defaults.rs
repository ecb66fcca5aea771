//! Default values for configuration fields.
//!
//! Kept in one place so serde field defaults and `Default` impls
//! cannot drift apart.

pub(super) fn footprint_forward() -> f32 {
    0.4
}

pub(super) fn footprint_backward() -> f32 {
    -0.6
}

pub(super) fn footprint_width() -> f32 {
    0.5
}

pub(super) fn penalty_backwards() -> f32 {
    2.5
}

pub(super) fn penalty_turn() -> f32 {
    5.0
}

pub(super) fn turning_straight() -> f32 {
    0.7
}
