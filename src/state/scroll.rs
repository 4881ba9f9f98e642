#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Distance from the bottom edge, in CSS pixels, still treated as "at bottom".
pub const DEFAULT_BOTTOM_THRESHOLD: f64 = 50.0;

/// Scroll geometry of one message container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Gap between the visible bottom edge and the end of the content.
    pub fn distance_from_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    pub fn is_at_bottom(&self, threshold: f64) -> bool {
        self.distance_from_bottom() < threshold
    }
}

/// Whether new messages pull the view down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollMode {
    #[default]
    AutoFollow,
    ManualOverride,
}

/// What the host should do after a scroll event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollReaction {
    /// (Re)arm the settle timer; any earlier one is superseded.
    ArmSettle,
    /// User came back to the bottom; auto-follow is on again.
    Resumed,
    Unchanged,
}

/// Global auto-scroll policy shared by all channel containers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollPolicy {
    mode: ScrollMode,
    threshold: f64,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_THRESHOLD)
    }
}

impl ScrollPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { mode: ScrollMode::AutoFollow, threshold }
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn auto_scroll_enabled(&self) -> bool {
        self.mode == ScrollMode::AutoFollow
    }

    pub fn manual_scroll_active(&self) -> bool {
        self.mode == ScrollMode::ManualOverride
    }

    pub fn is_at_bottom(&self, metrics: &ScrollMetrics) -> bool {
        metrics.is_at_bottom(self.threshold)
    }

    /// Handle a user scroll on a container.
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> ScrollReaction {
        if !self.is_at_bottom(metrics) {
            self.mode = ScrollMode::ManualOverride;
            return ScrollReaction::ArmSettle;
        }
        if self.manual_scroll_active() {
            self.mode = ScrollMode::AutoFollow;
            return ScrollReaction::Resumed;
        }
        ScrollReaction::Unchanged
    }

    /// Settle timer fired; resume only if the container sits at the bottom now.
    pub fn on_settle(&mut self, metrics: &ScrollMetrics) -> bool {
        if self.is_at_bottom(metrics) {
            self.mode = ScrollMode::AutoFollow;
            return true;
        }
        false
    }
}
