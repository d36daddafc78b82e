//! Host frame clock.
use std::{
    thread,
    time::{Duration, Instant},
};

/// Paces the host loop at a fixed frame rate.
///
/// Works with the yielding cooperative pattern of the interpreter:
/// time elapses while the VM runs a frame's worth of instructions, and
/// the remainder of the frame interval is spent here.
pub struct FrameClock {
    mark: Instant,
    interval: Duration,
}

impl FrameClock {
    pub fn for_frequency(hz: u64) -> Self {
        let interval = if hz == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / hz)
        };
        Self {
            mark: Instant::now(),
            interval,
        }
    }

    /// Set the clock state back to zero.
    pub fn reset(&mut self) {
        self.mark = Instant::now();
    }

    /// Block the current thread until the next frame boundary.
    pub fn wait(&mut self) {
        loop {
            if self.mark.elapsed() < self.interval {
                // Sleep does not have enough resolution, and causes
                // the clock to run at 30 FPS.
                //
                // Spinning a loop causes high CPU usage and fan madness.
                //
                // Yielding in a loop is the best alternative.
                thread::yield_now();
            } else {
                // Reset back to zero, rather than trying to catch up.
                //
                // If the VM was paused for debugging, and a large
                // amount of time has elapsed until it is resumed,
                // it should simply continue at the next cycle running
                // at its usual speed.
                self.reset();
                return;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_frame_interval() {
        let clock = FrameClock::for_frequency(60);
        assert_eq!(clock.interval.as_millis(), 16);
    }
}
