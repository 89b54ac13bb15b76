//! Geometric scroll decay
//!
//! `next = offset - offset / speed`, so every frame covers the same fraction
//! of what is left. Once the next value would fall below `min_step` it snaps
//! to `0.0` and the sequence ends.

/// Lazy, finite sequence of offsets converging to the top
#[derive(Clone, Debug)]
pub struct ScrollDecay {
    current: f64,
    speed: f64,
    min_step: f64,
}

impl ScrollDecay {
    /// Decay starting at `from` (not itself yielded)
    ///
    /// `speed` below 1 is raised to 1, which jumps straight to the top.
    pub fn new(from: f64, speed: f64, min_step: f64) -> Self {
        Self {
            current: from.max(0.0),
            speed: speed.max(1.0),
            min_step: min_step.max(f64::MIN_POSITIVE),
        }
    }

    /// Offset most recently yielded (or the start offset)
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.current <= 0.0
    }

    /// Single decay step from `offset`
    pub fn step(offset: f64, speed: f64, min_step: f64) -> f64 {
        let next = offset - offset / speed;
        if next < min_step {
            0.0
        } else {
            next
        }
    }
}

impl Iterator for ScrollDecay {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.is_finished() {
            return None;
        }
        self.current = Self::step(self.current, self.speed, self.min_step);
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_finished() {
            (0, Some(0))
        } else {
            (1, None)
        }
    }
}

impl std::iter::FusedIterator for ScrollDecay {}
