//! Decides the visibility of the "more below" scroll hint and the
//! stickiness of the primary action button from the rendered content's
//! height versus the viewport. Pure decision state; the TUI loop feeds it
//! triggers and geometry.

/// Rows from the top within which the hint may show.
pub const TOP_THRESHOLD: usize = 2;

/// Geometry of the content region as measured by the renderer. Content
/// rows are counted with the action button in normal flow, so the sticky
/// decision cannot oscillate with its own layout change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub content_rows: usize,
    pub viewport_rows: usize,
    pub scroll_offset: usize,
}

impl Geometry {
    pub fn scrollable(&self) -> bool {
        self.content_rows > self.viewport_rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Scroll,
    Resize,
    ImageLoaded,
    ScreenBuilt,
    SettleCheck,
}

#[derive(Debug)]
pub struct ScrollAffordances {
    hint_armed: bool,
    hint_visible: bool,
    sticky: bool,
    dirty: bool,
}

impl ScrollAffordances {
    pub fn new() -> Self {
        Self {
            hint_armed: true,
            hint_visible: false,
            sticky: false,
            dirty: true,
        }
    }

    /// Reset for a freshly built screen: the hint is re-armed and the next
    /// recomputation runs unconditionally.
    pub fn rearm(&mut self) {
        *self = Self::new();
    }

    /// Request recomputation. A dirty flag, not a queue: triggers within
    /// one loop iteration coalesce into a single recompute. Returns whether
    /// the flag was newly set.
    pub fn mark_dirty(&mut self, _trigger: Trigger) -> bool {
        let fresh = !self.dirty;
        self.dirty = true;
        fresh
    }

    /// Recompute both decisions from current geometry. No-op unless dirty.
    pub fn recompute(&mut self, geometry: &Geometry) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let scrollable = geometry.scrollable();
        self.sticky = scrollable;

        // Scrolling past the threshold disarms the hint for this screen:
        // it must not reappear when the user returns near the top.
        if geometry.scroll_offset >= TOP_THRESHOLD {
            self.hint_armed = false;
        }
        self.hint_visible =
            scrollable && self.hint_armed && geometry.scroll_offset < TOP_THRESHOLD;
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Scroll distance applied when the hint is activated: a nudge of
    /// roughly 70% of one viewport height, not a jump to the bottom.
    pub fn nudge(viewport_rows: usize) -> usize {
        (viewport_rows * 7 / 10).max(1)
    }
}

impl Default for ScrollAffordances {
    fn default() -> Self {
        Self::new()
    }
}
