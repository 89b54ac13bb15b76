//! View-state snapshots
//!
//! The widget never mutates the page directly. A host reads a [`ViewState`],
//! the widget derives the next one with the pure transitions here, and the
//! host writes back only what changed.

use smallvec::SmallVec;

use crate::config::WidgetConfig;

/// Visibility of the scroll-to-top link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

impl Visibility {
    /// Visibility implied by a viewport offset.
    ///
    /// Only an offset of exactly zero is the top. A negative overscroll
    /// offset shows the link like any other non-zero offset.
    pub fn for_offset(offset: f64) -> Self {
        if offset == 0.0 {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }
}

/// Ordered set of class names on an element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: SmallVec<[String; 4]>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace separated `class` attribute value
    pub fn parse(value: &str) -> Self {
        let mut list = Self::new();
        for class in value.split_whitespace() {
            list.add(class);
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class, returning `false` if it was already present
    pub fn add(&mut self, class: &str) -> bool {
        if self.contains(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class, returning `false` if it was absent
    pub fn remove(&mut self, class: &str) -> bool {
        match self.classes.iter().position(|c| c == class) {
            Some(index) => {
                self.classes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Classes to add and remove to turn `self` into `next`
    pub fn diff<'a>(&'a self, next: &'a ClassList) -> (Vec<&'a str>, Vec<&'a str>) {
        let added = next.iter().filter(|c| !self.contains(c)).collect();
        let removed = self.iter().filter(|c| !next.contains(c)).collect();
        (added, removed)
    }
}

impl<'a> FromIterator<&'a str> for ClassList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::new();
        for class in iter {
            list.add(class);
        }
        list
    }
}

/// Presentation state of the link element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkSnapshot {
    pub classes: ClassList,
    /// Inline `style.display` value, `None` when unset
    pub inline_display: Option<String>,
}

impl LinkSnapshot {
    pub fn new(classes: ClassList) -> Self {
        Self {
            classes,
            inline_display: None,
        }
    }

    pub fn with_inline_display(mut self, display: impl Into<String>) -> Self {
        self.inline_display = Some(display.into());
        self
    }

    pub fn is_shown(&self, config: &WidgetConfig) -> bool {
        self.classes.contains(&config.shown_class)
    }

    /// Whether the inline display override forbids the shown treatment
    pub fn display_suppressed(&self, config: &WidgetConfig) -> bool {
        self.inline_display
            .as_deref()
            .is_some_and(|display| display.trim().eq_ignore_ascii_case(&config.suppressed_display))
    }

    pub fn hidden(&self, config: &WidgetConfig) -> LinkSnapshot {
        let mut next = self.clone();
        next.classes.remove(&config.shown_class);
        next
    }

    pub fn shown(&self, config: &WidgetConfig) -> LinkSnapshot {
        let mut next = self.clone();
        if !self.display_suppressed(config) {
            next.classes.add(&config.shown_class);
        }
        next
    }

    pub fn with_visibility(&self, visibility: Visibility, config: &WidgetConfig) -> LinkSnapshot {
        match visibility {
            Visibility::Hidden => self.hidden(config),
            Visibility::Shown => self.shown(config),
        }
    }

    /// Drop the one-shot transition class
    pub fn transition_finished(&self, config: &WidgetConfig) -> LinkSnapshot {
        let mut next = self.clone();
        next.classes.remove(&config.transition_class);
        next
    }
}

/// Snapshot of everything the widget reads from the page
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub offset: f64,
    /// `None` when the page has no link element
    pub link: Option<LinkSnapshot>,
}

impl ViewState {
    pub fn new(offset: f64, link: Option<LinkSnapshot>) -> Self {
        Self { offset, link }
    }

    pub fn visibility(&self, config: &WidgetConfig) -> Option<Visibility> {
        self.link.as_ref().map(|link| {
            if link.is_shown(config) {
                Visibility::Shown
            } else {
                Visibility::Hidden
            }
        })
    }

    /// State after observing the current offset
    pub fn after_scroll(&self, config: &WidgetConfig) -> ViewState {
        self.map_link(|link| link.with_visibility(Visibility::for_offset(self.offset), config))
    }

    pub fn map_link(&self, f: impl FnOnce(&LinkSnapshot) -> LinkSnapshot) -> ViewState {
        ViewState {
            offset: self.offset,
            link: self.link.as_ref().map(f),
        }
    }
}
