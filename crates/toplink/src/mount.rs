//! Wiring the widget to a host
//!
//! [`mount`] subscribes the widget to the page's scroll and ready events. On
//! ready it looks up the link and binds its click and transition-end events.
//! The smooth scroll re-requests a frame after every step until the
//! animation ends.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use toplink_animation::AnimationId;
use toplink_core::{Event, EventKind, EventTarget, Visibility};
use toplink_platform::{EventSource, FrameScheduler, Page, PlatformError, Result};

use crate::widget::ScrollTopWidget;

thread_local! {
    static PAGE_MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Run a page-wide mount at most once per thread
///
/// The slot is only claimed when `f` succeeds, so a failed mount can be
/// retried.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn mount_once<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    if PAGE_MOUNTED.with(Cell::get) {
        return Err(PlatformError::AlreadyMounted);
    }
    let mounted = f()?;
    PAGE_MOUNTED.with(|flag| flag.set(true));
    Ok(mounted)
}

/// A widget attached to a page and a frame scheduler
pub struct MountedWidget<P, F> {
    widget: RefCell<ScrollTopWidget>,
    page: Rc<RefCell<P>>,
    frames: F,
    link_bound: Cell<bool>,
}

/// Attach `widget` to a host
///
/// Handlers hold the returned handle, so the widget lives as long as the
/// event source keeps them.
pub fn mount<P, E, F>(
    widget: ScrollTopWidget,
    page: Rc<RefCell<P>>,
    events: &E,
    frames: F,
) -> Result<Rc<MountedWidget<P, F>>>
where
    P: Page + 'static,
    E: EventSource + Clone + 'static,
    F: FrameScheduler + 'static,
{
    let mounted = Rc::new(MountedWidget {
        widget: RefCell::new(widget),
        page,
        frames,
        link_bound: Cell::new(false),
    });

    let this = Rc::clone(&mounted);
    events.subscribe(
        EventTarget::Window,
        EventKind::Scroll,
        Rc::new(move |_: &mut Event| {
            this.on_scroll();
        }),
    )?;

    let this = Rc::clone(&mounted);
    let source = events.clone();
    events.subscribe(
        EventTarget::Document,
        EventKind::Ready,
        Rc::new(move |_: &mut Event| {
            if let Err(err) = this.on_ready(&source) {
                tracing::warn!(%err, "failed to bind scroll-to-top link");
            }
        }),
    )?;

    tracing::debug!(id = %mounted.link_id(), "scroll-to-top widget mounted");
    Ok(mounted)
}

impl<P, F> MountedWidget<P, F>
where
    P: Page + 'static,
    F: FrameScheduler + 'static,
{
    pub fn link_id(&self) -> String {
        self.widget.borrow().config().link_id.clone()
    }

    pub fn page(&self) -> &Rc<RefCell<P>> {
        &self.page
    }

    pub fn is_animating(&self) -> bool {
        self.widget.borrow().is_animating()
    }

    pub fn is_link_bound(&self) -> bool {
        self.link_bound.get()
    }

    pub fn on_scroll(&self) -> Option<Visibility> {
        let widget = self.widget.borrow();
        let mut page = self.page.borrow_mut();
        widget.on_scroll(&mut *page)
    }

    pub fn on_transition_end(&self) -> bool {
        let widget = self.widget.borrow();
        let mut page = self.page.borrow_mut();
        widget.on_transition_end(&mut *page)
    }

    /// Bind the link's events if it exists. Returns whether it was found.
    pub fn on_ready<E>(self: &Rc<Self>, events: &E) -> Result<bool>
    where
        E: EventSource,
    {
        if self.link_bound.get() {
            return Ok(true);
        }

        let (id, sync) = {
            let widget = self.widget.borrow();
            (widget.config().link_id.clone(), widget.config().sync_on_ready)
        };
        if self.page.borrow().link(&id).is_none() {
            tracing::trace!(%id, "no link element in document");
            return Ok(false);
        }

        let this = Rc::clone(self);
        events.subscribe(
            EventTarget::element(id.as_str()),
            EventKind::Click,
            Rc::new(move |event: &mut Event| {
                event.prevent_default();
                this.smooth_scroll_to_top();
            }),
        )?;

        let this = Rc::clone(self);
        events.subscribe(
            EventTarget::element(id.as_str()),
            EventKind::TransitionEnd,
            Rc::new(move |_: &mut Event| {
                this.on_transition_end();
            }),
        )?;

        self.link_bound.set(true);
        tracing::debug!(%id, "scroll-to-top link bound");

        if sync {
            self.on_scroll();
        }
        Ok(true)
    }

    /// Start the animation unless one is running
    pub fn smooth_scroll_to_top(self: &Rc<Self>) {
        let next = {
            let mut widget = self.widget.borrow_mut();
            let mut page = self.page.borrow_mut();
            widget.start_scroll_to_top(&mut *page)
        };
        if let Some(id) = next {
            self.schedule_step(id);
        }
    }

    fn schedule_step(self: &Rc<Self>, id: AnimationId) {
        let this = Rc::clone(self);
        let requested = self
            .frames
            .request_frame(Box::new(move |_timestamp| this.run_step(id)));

        if let Err(err) = requested {
            tracing::warn!(%err, "cannot schedule scroll frame, stopping animation");
            self.widget.borrow_mut().cancel_scroll();
        }
    }

    fn run_step(self: &Rc<Self>, id: AnimationId) {
        let more = {
            let mut widget = self.widget.borrow_mut();
            let mut page = self.page.borrow_mut();
            widget.step_scroll(id, &mut *page)
        };
        if more {
            self.schedule_step(id);
        }
    }
}
