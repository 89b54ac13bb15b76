//! End-to-end behaviour on the headless host
//!
//! Each test mounts the widget, fires page events through the dispatcher,
//! and advances frames by hand.

use std::cell::RefCell;
use std::rc::Rc;

use toplink::{mount, MountedWidget, ScrollTopWidget};
use toplink_core::{ClassList, EventDispatcher, EventKind, EventTarget, LinkSnapshot, WidgetConfig};
use toplink_platform::{HeadlessFrames, HeadlessPage, Page, Result};

struct Harness {
    page: Rc<RefCell<HeadlessPage>>,
    events: EventDispatcher,
    frames: HeadlessFrames,
    mounted: Rc<MountedWidget<HeadlessPage, HeadlessFrames>>,
}

impl Harness {
    fn new(page: HeadlessPage) -> Self {
        Self::with_config(page, WidgetConfig::default())
    }

    fn with_config(page: HeadlessPage, config: WidgetConfig) -> Self {
        let page = Rc::new(RefCell::new(page));
        let events = EventDispatcher::new();
        let frames = HeadlessFrames::new();
        let mounted = mount(
            ScrollTopWidget::new(config),
            page.clone(),
            &events,
            frames.clone(),
        )
        .unwrap();
        events.emit(EventKind::Ready, EventTarget::Document);
        Self {
            page,
            events,
            frames,
            mounted,
        }
    }

    fn user_scroll(&self, offset: f64) {
        self.page.borrow_mut().user_scroll_to(offset);
        self.events.emit(EventKind::Scroll, EventTarget::Window);
    }

    fn click(&self) -> bool {
        self.events
            .emit(EventKind::Click, EventTarget::element("top-link"))
            .default_prevented
    }

    fn offset(&self) -> f64 {
        self.page.borrow().scroll_offset()
    }

    fn classes(&self) -> ClassList {
        self.page.borrow().element("top-link").unwrap().classes.clone()
    }
}

fn standard_page() -> HeadlessPage {
    HeadlessPage::new()
        .with_max_offset(10_000.0)
        .with_element(
            "top-link",
            LinkSnapshot::new(ClassList::parse("top-link-transition")),
        )
}

#[test]
fn link_appears_when_scrolled_and_hides_at_top() {
    let h = Harness::new(standard_page());
    assert!(!h.classes().contains("shown"));

    h.user_scroll(1.0);
    assert!(h.classes().contains("shown"));

    h.user_scroll(2_400.0);
    assert!(h.classes().contains("shown"));

    h.user_scroll(0.0);
    assert!(!h.classes().contains("shown"));
}

#[test]
fn click_prevents_navigation_and_scrolls_to_top() {
    let h = Harness::new(standard_page());
    h.user_scroll(100.0);

    assert!(h.click());
    assert_eq!(h.offset(), 90.0);

    // 43 frames write the rest of the sequence, one more observes the top.
    let frames = h.frames.run_until_idle(1_000);
    assert_eq!(h.offset(), 0.0);
    assert_eq!(frames, 44);
    assert!(!h.mounted.is_animating());

    let writes = h.page.borrow().scroll_writes().to_vec();
    assert_eq!(writes.len(), 44);
    assert!((writes[1] - 81.0).abs() < 1e-9);
    assert!((writes[2] - 72.9).abs() < 1e-9);
    for pair in writes.windows(2) {
        assert!(pair[1] < pair[0]);
    }
}

#[test]
fn one_step_per_frame() {
    let h = Harness::new(standard_page());
    h.user_scroll(5_000.0);
    h.click();

    for expected_writes in 2..=5 {
        assert_eq!(h.frames.pending(), 1);
        h.frames.run_frame();
        assert_eq!(h.page.borrow().scroll_writes().len(), expected_writes);
    }
}

#[test]
fn rapid_clicks_run_a_single_animation() {
    let h = Harness::new(standard_page());
    h.user_scroll(3_000.0);

    assert!(h.click());
    assert!(h.click());
    assert!(h.click());

    // Only the first click wrote an offset and queued a frame.
    assert_eq!(h.page.borrow().scroll_writes().len(), 1);
    assert_eq!(h.frames.pending(), 1);

    h.frames.run_until_idle(1_000);
    assert_eq!(h.offset(), 0.0);
}

#[test]
fn click_after_animation_ends_starts_again() {
    let h = Harness::new(standard_page());
    h.user_scroll(400.0);
    h.click();
    h.frames.run_until_idle(1_000);

    h.user_scroll(800.0);
    h.click();
    assert!(h.mounted.is_animating());
    h.frames.run_until_idle(1_000);
    assert_eq!(h.offset(), 0.0);
}

#[test]
fn click_at_top_only_prevents_navigation() {
    let h = Harness::new(standard_page());

    assert!(h.click());
    assert_eq!(h.frames.pending(), 0);
    assert!(h.page.borrow().scroll_writes().is_empty());
}

#[test]
fn manual_scroll_cancels_animation() {
    let h = Harness::new(standard_page());
    h.user_scroll(6_000.0);
    h.click();
    h.frames.run_frame();
    h.frames.run_frame();

    h.user_scroll(7_500.0);
    let before = h.page.borrow().scroll_writes().len();
    h.frames.run_until_idle(1_000);

    assert_eq!(h.offset(), 7_500.0);
    assert_eq!(h.page.borrow().scroll_writes().len(), before);
    assert!(!h.mounted.is_animating());
}

#[test]
fn host_rounding_does_not_stall_the_animation() {
    let h = Harness::new(standard_page().with_rounding());
    h.user_scroll(1_234.0);
    h.click();

    let frames = h.frames.run_until_idle(1_000);
    assert!(frames < 1_000);
    assert_eq!(h.offset(), 0.0);
}

#[test]
fn scroll_events_during_animation_track_visibility() {
    let h = Harness::new(standard_page());
    h.user_scroll(200.0);
    h.click();

    while h.frames.run_frame() > 0 {
        h.events.emit(EventKind::Scroll, EventTarget::Window);
        if h.offset() > 0.0 {
            assert!(h.classes().contains("shown"));
        }
    }
    assert!(!h.classes().contains("shown"));
}

#[test]
fn transition_end_removes_one_shot_class_once() {
    let h = Harness::new(standard_page());
    h.user_scroll(50.0);

    h.events
        .emit(EventKind::TransitionEnd, EventTarget::element("top-link"));
    assert_eq!(h.classes(), ClassList::parse("shown"));

    let writes = h.page.borrow().element_writes();
    h.events
        .emit(EventKind::TransitionEnd, EventTarget::element("top-link"));
    assert_eq!(h.page.borrow().element_writes(), writes);
}

#[test]
fn inline_display_link_never_shown() {
    let page = HeadlessPage::new().with_element(
        "top-link",
        LinkSnapshot::new(ClassList::new()).with_inline_display("inline"),
    );
    let h = Harness::new(page);

    for offset in [10.0, 300.0, 0.0, 90.0] {
        h.user_scroll(offset);
        assert!(!h.classes().contains("shown"));
    }
}

#[test]
fn page_without_link_ignores_everything() {
    let h = Harness::new(HeadlessPage::new());
    h.user_scroll(700.0);

    let event = h
        .events
        .emit(EventKind::Click, EventTarget::element("top-link"));
    assert!(!event.default_prevented);
    assert_eq!(h.frames.pending(), 0);
    assert_eq!(h.page.borrow().element_writes(), 0);
}

#[test]
fn custom_names_and_speed_from_toml() {
    let config = WidgetConfig::from_toml_str(
        r#"
        link_id = "back-to-top"
        shown_class = "visible"
        scroll_speed = 2.0
        "#,
    )
    .unwrap();
    let page = HeadlessPage::new().with_element("back-to-top", LinkSnapshot::default());
    let h = Harness::with_config(page, config);

    h.page.borrow_mut().user_scroll_to(64.0);
    h.events.emit(EventKind::Scroll, EventTarget::Window);
    assert!(h
        .page
        .borrow()
        .element("back-to-top")
        .unwrap()
        .classes
        .contains("visible"));

    h.events
        .emit(EventKind::Click, EventTarget::element("back-to-top"));
    assert_eq!(h.offset(), 32.0);
    h.frames.run_until_idle(100);
    // 64 -> 32 -> 16 -> 8 -> 4 -> 2 -> 1 -> 0
    assert_eq!(h.page.borrow().scroll_writes().len(), 7);
    assert_eq!(h.offset(), 0.0);
}

#[test]
fn link_removed_after_ready_is_left_alone() {
    let h = Harness::new(standard_page());
    assert!(h.mounted.is_link_bound());
    h.page.borrow_mut().remove_element("top-link");

    h.user_scroll(900.0);
    assert_eq!(h.page.borrow().element_writes(), 0);

    // The bound click still scrolls; only the presentation is gone.
    assert!(h.click());
    h.frames.run_until_idle(1_000);
    assert_eq!(h.offset(), 0.0);
    assert_eq!(h.page.borrow().element_writes(), 0);
}

/// A host that eases toward each requested offset, like a browser page with
/// CSS `scroll-behavior: smooth`
struct EasingPage {
    offset: f64,
    target: f64,
    link: LinkSnapshot,
}

impl EasingPage {
    fn new(offset: f64) -> Self {
        Self {
            offset,
            target: offset,
            link: LinkSnapshot::default(),
        }
    }

    /// Cover 30% of the remaining distance, settling on whole pixels
    fn ease(&mut self) {
        self.offset += (self.target - self.offset) * 0.3;
        if (self.target - self.offset).abs() < 0.5 {
            self.offset = self.target;
        }
    }
}

impl Page for EasingPage {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.target = offset;
    }

    fn link(&self, id: &str) -> Option<LinkSnapshot> {
        (id == "top-link").then(|| self.link.clone())
    }

    fn update_link(&mut self, _id: &str, next: &LinkSnapshot) -> Result<()> {
        self.link = next.clone();
        Ok(())
    }
}

#[test]
fn host_easing_each_write_still_reaches_top() {
    let page = Rc::new(RefCell::new(EasingPage::new(2_000.0)));
    let events = EventDispatcher::new();
    let frames = HeadlessFrames::new();
    let mounted = mount(ScrollTopWidget::default(), page.clone(), &events, frames.clone()).unwrap();
    events.emit(EventKind::Ready, EventTarget::Document);

    assert!(events
        .emit(EventKind::Click, EventTarget::element("top-link"))
        .default_prevented);

    for _ in 0..500 {
        page.borrow_mut().ease();
        frames.run_frame();
    }
    assert_eq!(page.borrow().scroll_offset().round(), 0.0);
    assert!(!mounted.is_animating());
    assert_eq!(frames.pending(), 0);
}
