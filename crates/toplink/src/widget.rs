//! The scroll-to-top widget
//!
//! Pure decisions come from [`toplink_core::view`] and
//! [`toplink_animation`]; this type only reads a snapshot from the [`Page`],
//! derives the next one, and writes back what changed.

use toplink_animation::{AnimationId, AnimationScheduler, DecayConfig, FrameStep, StartOutcome};
use toplink_core::{LinkSnapshot, ViewState, Visibility, WidgetConfig};
use toplink_platform::Page;

/// "Back to top" link state and behaviour
pub struct ScrollTopWidget {
    config: WidgetConfig,
    scheduler: AnimationScheduler,
}

impl ScrollTopWidget {
    pub fn new(config: WidgetConfig) -> Self {
        let scheduler = AnimationScheduler::new(DecayConfig {
            speed: config.scroll_speed,
            min_step: config.min_step,
            takeover_tolerance: config.takeover_tolerance,
        });
        Self { config, scheduler }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Show the link when scrolled, hide it at the top
    ///
    /// Returns the resulting visibility, `None` if the page has no link.
    pub fn on_scroll<P: Page + ?Sized>(&self, page: &mut P) -> Option<Visibility> {
        let state = page.view_state(&self.config.link_id);
        if state.link.is_none() {
            tracing::trace!(id = %self.config.link_id, "no link element, scroll ignored");
            return None;
        }
        let next = state.after_scroll(&self.config);
        self.commit(page, &state, &next);
        next.visibility(&self.config)
    }

    /// Remove the shown class. Returns whether anything changed.
    pub fn set_hidden<P: Page + ?Sized>(&self, page: &mut P) -> bool {
        self.update(page, |link, config| link.hidden(config))
    }

    /// Add the shown class unless an inline `display` override forbids it.
    /// Returns whether anything changed.
    pub fn set_shown<P: Page + ?Sized>(&self, page: &mut P) -> bool {
        self.update(page, |link, config| link.shown(config))
    }

    /// Drop the one-shot transition class. Returns whether it was present.
    pub fn on_transition_end<P: Page + ?Sized>(&self, page: &mut P) -> bool {
        self.update(page, |link, config| link.transition_finished(config))
    }

    /// Begin the smooth scroll and apply its first step
    ///
    /// Returns the animation to step on the next frame, or `None` when
    /// there is nothing to do (already at the top, or an animation is
    /// already running).
    pub fn start_scroll_to_top<P: Page + ?Sized>(&mut self, page: &mut P) -> Option<AnimationId> {
        match self.scheduler.start(page.scroll_offset()) {
            StartOutcome::Started { id, first } => {
                page.set_scroll_offset(first);
                Some(id)
            }
            StartOutcome::AlreadyRunning(_) | StartOutcome::AtTop => None,
        }
    }

    /// Apply one frame of animation `id`. Returns whether another frame is needed.
    pub fn step_scroll<P: Page + ?Sized>(&mut self, id: AnimationId, page: &mut P) -> bool {
        match self.scheduler.step(id, page.scroll_offset()) {
            FrameStep::Continue(offset) => {
                page.set_scroll_offset(offset);
                true
            }
            FrameStep::Stopped(reason) => {
                tracing::trace!(?id, ?reason, "scroll animation ended");
                false
            }
        }
    }

    pub fn cancel_scroll(&mut self) {
        self.scheduler.cancel();
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.has_active_animation()
    }

    fn update<P, F>(&self, page: &mut P, f: F) -> bool
    where
        P: Page + ?Sized,
        F: FnOnce(&LinkSnapshot, &WidgetConfig) -> LinkSnapshot,
    {
        let state = page.view_state(&self.config.link_id);
        let next = state.map_link(|link| f(link, &self.config));
        self.commit(page, &state, &next)
    }

    fn commit<P: Page + ?Sized>(&self, page: &mut P, prev: &ViewState, next: &ViewState) -> bool {
        let Some(link) = next.link.as_ref() else {
            return false;
        };
        if prev.link.as_ref() == Some(link) {
            return false;
        }

        if let Err(err) = page.update_link(&self.config.link_id, link) {
            tracing::warn!(%err, "failed to update link presentation");
            return false;
        }
        if prev.visibility(&self.config) != next.visibility(&self.config) {
            tracing::debug!(
                offset = next.offset,
                visibility = ?next.visibility(&self.config),
                "link visibility changed"
            );
        }
        true
    }
}

impl Default for ScrollTopWidget {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}
