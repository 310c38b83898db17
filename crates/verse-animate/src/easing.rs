// Easing curves on normalized progress.
//
// Quadratic curves: ease-out is the reversed ease-in, ease-in-out is the
// ease-in mirrored around the midpoint. Input is clamped to [0, 1] and the
// endpoints map exactly to 0 and 1.

pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Decelerating: fast start, slow finish.
pub fn ease_out(t: f64) -> f64 {
    1.0 - ease_in(1.0 - t)
}

/// Slow start and finish, fastest at the midpoint.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        ease_in(2.0 * t) / 2.0
    } else {
        (2.0 - ease_in(2.0 * (1.0 - t))) / 2.0
    }
}
