//! Frame timing for the game loop

use std::time::{Duration, Instant};

/// Frame budget for a target frame rate (a rate of 0 is treated as 1 FPS)
pub fn frame_duration(target_fps: u64) -> Duration {
    Duration::from_secs_f64(1.0 / target_fps.max(1) as f64)
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Call at the end of each game loop iteration: sleeps for whatever is left
/// of `frame_duration` since `frame_start`.
pub fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}
