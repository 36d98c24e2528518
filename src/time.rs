use std::sync::{atomic::Ordering, LazyLock, Mutex};
use std::time::Instant;

use atomic_float::AtomicF32;

static CLOCK_START: LazyLock<Instant> = LazyLock::new(Instant::now);
static FRAME_START: Mutex<Option<Instant>> = Mutex::new(None);
// Seconds the previous frame took. Stays at 1.0 until a frame has finished.
static FRAME_SECONDS: LazyLock<AtomicF32> = LazyLock::new(|| AtomicF32::new(1.0));

/// Pins the clock origin and opens the first frame.
#[cfg_attr(not(feature = "window"), allow(unused))]
pub(crate) fn start_clock() {
    LazyLock::force(&CLOCK_START);
    if let Ok(mut frame_start) = FRAME_START.lock() {
        *frame_start = Some(Instant::now());
    }
}

/// Closes the current frame, records its duration and opens the next one.
#[cfg_attr(not(feature = "window"), allow(unused))]
pub(crate) fn finish_frame() {
    let now = Instant::now();
    let Ok(mut frame_start) = FRAME_START.lock() else {
        return;
    };
    if let Some(previous) = frame_start.replace(now) {
        FRAME_SECONDS.store(now.duration_since(previous).as_secs_f32(), Ordering::Release);
    }
}

/// Seconds since the clock started.
pub fn elapsed_time() -> f32 {
    CLOCK_START.elapsed().as_secs_f32()
}

pub fn delta_time() -> f32 {
    FRAME_SECONDS.load(Ordering::Acquire)
}

/// Fraction of a repeating `period` that climbs from 0 to 1 over the first
/// half and falls back to 0 over the second.
pub fn ping_pong(t: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let fraction = (t / period).rem_euclid(1.0);
    if fraction > 0.5 {
        (1.0 - fraction) * 2.0
    } else {
        fraction * 2.0
    }
}
