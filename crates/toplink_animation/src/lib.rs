//! Toplink Animation System
//!
//! Smooth scroll-to-top as a lazy, finite sequence of offsets.
//!
//! # Features
//!
//! - **Scroll Decay**: each step removes a fixed fraction of the remaining distance
//! - **Deterministic Termination**: sub-step offsets snap to the top
//! - **Single Flight**: at most one scroll animation runs at a time
//! - **Interruptible**: a manual scroll mid-animation hands control back to the user

pub mod decay;
pub mod scheduler;

pub use decay::ScrollDecay;
pub use scheduler::{
    AnimationId, AnimationScheduler, DecayConfig, FrameStep, StartOutcome, StopReason,
    MAX_SETTLE_FRAMES,
};
