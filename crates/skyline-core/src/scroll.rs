use crate::sections::{SectionLayout, SectionState};
use crate::shared::{latest, Latest, Publisher};

/// Raw scroll geometry of the journey container, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub scroll_extent: f64,
    pub viewport_extent: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, scroll_extent: f64, viewport_extent: f64) -> Self {
        Self {
            offset,
            scroll_extent,
            viewport_extent,
        }
    }

    /// Normalized scroll position in [0, 1].
    ///
    /// A container that cannot scroll (`scroll_extent <= viewport_extent`) and
    /// non-finite input both map to 0.
    pub fn progress(&self) -> f32 {
        let range = self.scroll_extent - self.viewport_extent;
        if !range.is_finite() || range <= 0.0 || !self.offset.is_finite() {
            return 0.0;
        }
        (self.offset / range).clamp(0.0, 1.0) as f32
    }
}

/// Clamp an arbitrary value into [0, 1]; NaN becomes 0.
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Sole writer of the progress-derived [`SectionState`].
pub struct ScrollTracker {
    layout: SectionLayout,
    state: Publisher<SectionState>,
}

impl ScrollTracker {
    /// Build a tracker and a reader for the state it publishes. The initial
    /// state is the one for progress 0.
    pub fn new(layout: SectionLayout) -> (Self, Latest<SectionState>) {
        let (state, reader) = latest(layout.resolve(0.0));
        (Self { layout, state }, reader)
    }

    /// Handle one scroll event. Same metrics in, same state out.
    pub fn on_scroll(&self, metrics: ScrollMetrics) -> SectionState {
        let resolved = self.layout.resolve(metrics.progress());
        self.state.publish(resolved);
        resolved
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    pub fn current(&self) -> SectionState {
        self.state.current()
    }
}
