//! Animation scheduler
//!
//! Owns the scroll animation and advances it one step per frame. Only one
//! animation is in flight at a time; frame callbacks carry the id of the
//! animation that scheduled them so a stale chain stops on its own.
//!
//! The animation ends when the viewport is observed at the top, not when the
//! decay sequence runs out: hosts that ease towards a written offset get the
//! final `0.0` re-written each frame until they arrive, bounded by
//! [`MAX_SETTLE_FRAMES`].

use slotmap::{new_key_type, SlotMap};

use crate::decay::ScrollDecay;

new_key_type! {
    pub struct AnimationId;
}

/// Frames spent re-writing the top offset before giving up on the host
pub const MAX_SETTLE_FRAMES: u32 = 120;

/// Tuning shared by every animation the scheduler starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayConfig {
    pub speed: f64,
    pub min_step: f64,
    /// Largest frame-to-frame increase of the observed offset that is not
    /// treated as the user scrolling down
    pub takeover_tolerance: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            min_step: 1.0,
            takeover_tolerance: 1.0,
        }
    }
}

/// Result of asking for a new animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StartOutcome {
    /// New animation; apply `first` now and step `id` on the next frame
    Started { id: AnimationId, first: f64 },
    /// An animation is already running; nothing to do
    AlreadyRunning(AnimationId),
    /// Viewport is already at the top
    AtTop,
}

/// What a frame step asks the host to do
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStep {
    /// Write the offset and request another frame
    Continue(f64),
    /// Write nothing; the animation is over
    Stopped(StopReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The viewport is at the top
    ReachedTop,
    /// The observed offset moved away from the top
    Interrupted,
    /// The host never reported the top after the sequence finished
    Stalled,
    /// The animation is no longer the current one
    Stale,
}

#[derive(Clone, Debug)]
struct ScrollAnimation {
    decay: ScrollDecay,
    last_observed: f64,
    frames: u32,
    settle_frames: u32,
}

/// The animation scheduler that steps the active scroll animation
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, ScrollAnimation>,
    active: Option<AnimationId>,
    config: DecayConfig,
}

impl AnimationScheduler {
    pub fn new(config: DecayConfig) -> Self {
        Self {
            animations: SlotMap::with_key(),
            active: None,
            config,
        }
    }

    /// Start scrolling to the top from `offset`
    ///
    /// The first step is taken immediately so a click moves the page in the
    /// same task it was handled in.
    pub fn start(&mut self, offset: f64) -> StartOutcome {
        if let Some(id) = self.active {
            tracing::trace!(?id, "scroll animation already running");
            return StartOutcome::AlreadyRunning(id);
        }
        if offset <= 0.0 {
            return StartOutcome::AtTop;
        }

        let mut decay = ScrollDecay::new(offset, self.config.speed, self.config.min_step);
        let first = decay.next().unwrap_or(0.0);
        let id = self.animations.insert(ScrollAnimation {
            decay,
            last_observed: offset,
            frames: 0,
            settle_frames: 0,
        });
        self.active = Some(id);
        tracing::debug!(?id, from = offset, "scroll animation started");
        StartOutcome::Started { id, first }
    }

    /// Advance animation `id` given the offset the host observes now
    pub fn step(&mut self, id: AnimationId, observed: f64) -> FrameStep {
        if self.active != Some(id) {
            return FrameStep::Stopped(StopReason::Stale);
        }
        let config = self.config;
        let Some(animation) = self.animations.get_mut(id) else {
            self.active = None;
            return FrameStep::Stopped(StopReason::Stale);
        };

        if observed <= 0.0 {
            let frames = animation.frames;
            self.finish(id, StopReason::ReachedTop);
            tracing::trace!(?id, frames, "scroll animation reached top");
            return FrameStep::Stopped(StopReason::ReachedTop);
        }
        // A host easing towards the written offset only lowers it; a rise
        // means the user scrolled down.
        if observed > animation.last_observed + config.takeover_tolerance {
            tracing::debug!(
                ?id,
                observed,
                previous = animation.last_observed,
                "manual scroll during animation"
            );
            self.finish(id, StopReason::Interrupted);
            return FrameStep::Stopped(StopReason::Interrupted);
        }
        animation.last_observed = observed;
        animation.frames += 1;

        if animation.decay.is_finished() {
            animation.settle_frames += 1;
            if animation.settle_frames > MAX_SETTLE_FRAMES {
                self.finish(id, StopReason::Stalled);
                return FrameStep::Stopped(StopReason::Stalled);
            }
            return FrameStep::Continue(0.0);
        }

        // The user scrolled up past the sequence: continue from there rather
        // than pulling the page back down.
        if observed < animation.decay.current() - config.takeover_tolerance {
            tracing::trace!(?id, observed, "resuming decay from user offset");
            animation.decay = ScrollDecay::new(observed, config.speed, config.min_step);
        }

        let next = animation.decay.next().unwrap_or(0.0);
        tracing::trace!(?id, frame = animation.frames, offset = next, "scroll step");
        FrameStep::Continue(next)
    }

    /// Cancel the running animation, if any
    pub fn cancel(&mut self) -> Option<AnimationId> {
        let id = self.active?;
        self.finish(id, StopReason::Interrupted);
        Some(id)
    }

    fn finish(&mut self, id: AnimationId, reason: StopReason) {
        self.animations.remove(id);
        if self.active == Some(id) {
            self.active = None;
        }
        tracing::debug!(?id, ?reason, "scroll animation stopped");
    }

    /// Check if an animation is still active
    pub fn has_active_animation(&self) -> bool {
        self.active.is_some()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(DecayConfig::default())
    }
}
