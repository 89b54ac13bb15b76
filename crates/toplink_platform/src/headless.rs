//! In-memory host
//!
//! A page with a scroll offset and a few elements, plus a frame queue that
//! only advances when told to. Paired with [`toplink_core::EventDispatcher`]
//! as the event source, it runs the widget deterministically without a
//! browser.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use toplink_core::LinkSnapshot;

use crate::error::{PlatformError, Result};
use crate::{FrameCallback, FrameScheduler, Page};

/// Nominal frame interval used for timestamps (60 Hz)
const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Simulated page
#[derive(Clone, Debug, Default)]
pub struct HeadlessPage {
    offset: f64,
    max_offset: Option<f64>,
    round_offsets: bool,
    elements: Vec<(String, LinkSnapshot)>,
    scroll_writes: Vec<f64>,
    element_writes: usize,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with the given id
    pub fn with_element(mut self, id: impl Into<String>, snapshot: LinkSnapshot) -> Self {
        self.elements.push((id.into(), snapshot));
        self
    }

    /// Clamp written offsets to `[0, max]` like a document of finite height
    pub fn with_max_offset(mut self, max: f64) -> Self {
        self.max_offset = Some(max);
        self
    }

    /// Round written offsets to whole pixels like most browsers report them
    pub fn with_rounding(mut self) -> Self {
        self.round_offsets = true;
        self
    }

    /// Move the viewport as a user would, without recording a widget write
    pub fn user_scroll_to(&mut self, offset: f64) {
        self.offset = self.clamp(offset);
    }

    pub fn element(&self, id: &str) -> Option<&LinkSnapshot> {
        self.elements
            .iter()
            .find(|(element_id, _)| element_id == id)
            .map(|(_, snapshot)| snapshot)
    }

    /// Take element `id` out of the document
    pub fn remove_element(&mut self, id: &str) -> Option<LinkSnapshot> {
        let index = self.elements.iter().position(|(element_id, _)| element_id == id)?;
        Some(self.elements.remove(index).1)
    }

    /// Offsets written through [`Page::set_scroll_offset`], after clamping
    pub fn scroll_writes(&self) -> &[f64] {
        &self.scroll_writes
    }

    /// Number of element updates that changed something
    pub fn element_writes(&self) -> usize {
        self.element_writes
    }

    fn clamp(&self, offset: f64) -> f64 {
        let mut offset = offset.max(0.0);
        if let Some(max) = self.max_offset {
            offset = offset.min(max);
        }
        if self.round_offsets {
            offset = offset.round();
        }
        offset
    }
}

impl Page for HeadlessPage {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = self.clamp(offset);
        self.scroll_writes.push(self.offset);
    }

    fn link(&self, id: &str) -> Option<LinkSnapshot> {
        self.element(id).cloned()
    }

    fn update_link(&mut self, id: &str, next: &LinkSnapshot) -> Result<()> {
        let Some((_, snapshot)) = self.elements.iter_mut().find(|(element_id, _)| element_id == id)
        else {
            return Err(PlatformError::ElementUpdate {
                id: id.to_string(),
                reason: "element not in document".to_string(),
            });
        };
        // Inline style is owned by the page author; only classes are written.
        if snapshot.classes != next.classes {
            snapshot.classes = next.classes.clone();
            self.element_writes += 1;
        }
        Ok(())
    }
}

/// Frame queue advanced manually
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct HeadlessFrames {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
    clock: Rc<Cell<f64>>,
    frames_run: Rc<Cell<u64>>,
}

impl HeadlessFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }

    /// Run one frame: every callback queued before it starts
    ///
    /// Callbacks requested while the frame runs wait for the next one.
    /// Returns how many callbacks ran.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        if batch.is_empty() {
            return 0;
        }

        let timestamp = self.clock.get() + FRAME_INTERVAL_MS;
        self.clock.set(timestamp);
        self.frames_run.set(self.frames_run.get() + 1);

        let count = batch.len();
        for callback in batch {
            callback(timestamp);
        }
        count
    }

    /// Run frames until nothing is queued or `max_frames` have run
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.run_frame() > 0 {
            frames += 1;
        }
        if frames == max_frames && self.pending() > 0 {
            tracing::warn!(max_frames, pending = self.pending(), "frame queue still busy");
        }
        frames
    }
}

impl FrameScheduler for HeadlessFrames {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        self.queue.borrow_mut().push_back(callback);
        Ok(())
    }
}

impl std::fmt::Debug for HeadlessFrames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessFrames")
            .field("pending", &self.pending())
            .field("frames_run", &self.frames_run.get())
            .finish()
    }
}
