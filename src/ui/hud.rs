// One-line readout of the fuzzy controller

use crate::fuzzy::Inference;

/// e.g. `x_diff  -120 left | y_diff   15 close | left_slow -> v  -84 / 120`
pub fn fuzzy_hud(trace: &Inference, max_speed: f32) -> String {
    let output = trace
        .dominant_velocity()
        .map_or("none", |term| term.name());

    format!(
        "x_diff {:>5.0} {} | y_diff {:>4.0} {} | {} -> v {:>4.0} / {:.0}",
        trace.x_diff,
        trace.dominant_x().name(),
        trace.y_diff,
        trace.dominant_y().name(),
        output,
        trace.velocity,
        max_speed
    )
}
