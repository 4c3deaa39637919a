//! Frame pacing

use std::time::{Duration, Instant};

/// Longest frame delta handed to the simulation (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Blocks until the next frame is due and reports the elapsed time
pub trait FramePacer {
    /// Seconds since the previous call
    fn wait(&mut self) -> f32;
}

/// Sleeps to hold a fixed frame rate
#[derive(Debug)]
pub struct FixedRate {
    frame: Duration,
    last: Instant,
}

impl FixedRate {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: Instant::now(),
        }
    }
}

impl FramePacer for FixedRate {
    fn wait(&mut self) -> f32 {
        let due = self.last + self.frame;
        let now = Instant::now();
        if now < due {
            std::thread::sleep(due - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DT)
    }
}

/// Never sleeps; every frame takes exactly `dt`
#[derive(Debug, Clone, Copy)]
pub struct Unpaced {
    pub dt: f32,
}

impl Unpaced {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl FramePacer for Unpaced {
    fn wait(&mut self) -> f32 {
        self.dt
    }
}
