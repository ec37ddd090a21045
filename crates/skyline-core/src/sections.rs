use crate::config::ConfigError;
use crate::constants::{INTRO_VISIBLE_BELOW, JOURNEY_FINISHED_ABOVE, PANEL_REVEAL_MARGIN};
use crate::scroll::clamp_progress;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionThresholds {
    /// Intro copy is shown while progress is strictly below this.
    pub intro_visible_below: f32,
    /// Journey counts as finished while progress is strictly above this.
    pub journey_finished_above: f32,
    /// Extra reveal window around each lead panel band, in band widths.
    pub panel_reveal_margin: f32,
}

impl Default for SectionThresholds {
    fn default() -> Self {
        Self {
            intro_visible_below: INTRO_VISIBLE_BELOW,
            journey_finished_above: JOURNEY_FINISHED_ABOVE,
            panel_reveal_margin: PANEL_REVEAL_MARGIN,
        }
    }
}

impl SectionThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !unit(self.intro_visible_below) {
            return Err(ConfigError::InvalidThreshold {
                name: "intro_visible_below",
                value: self.intro_visible_below,
            });
        }
        if !unit(self.journey_finished_above) {
            return Err(ConfigError::InvalidThreshold {
                name: "journey_finished_above",
                value: self.journey_finished_above,
            });
        }
        if !self.panel_reveal_margin.is_finite() || self.panel_reveal_margin < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "panel_reveal_margin",
                value: self.panel_reveal_margin,
            });
        }
        Ok(())
    }
}

/// Which band a progress value falls in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Intro,
    Panel(usize),
    Content(usize),
    Contact,
}

/// Everything the overlay and the scene need to know about one scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionState {
    pub progress: f32,
    pub section: Section,
    /// Active content item; `None` outside the content band.
    pub active: Option<usize>,
    pub show_intro: bool,
    pub journey_finished: bool,
}

/// `1 + panels + items + 1` equal half-open bands; the last one is closed so
/// progress 1.0 lands in contact.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    lead_panels: usize,
    content_count: usize,
    thresholds: SectionThresholds,
}

impl SectionLayout {
    /// Layout with no lead panels: `content_count + 2` bands.
    pub fn new(content_count: usize) -> Result<Self, ConfigError> {
        if content_count == 0 {
            return Err(ConfigError::NoContentItems);
        }
        Ok(Self {
            lead_panels: 0,
            content_count,
            thresholds: SectionThresholds::default(),
        })
    }

    pub fn with_lead_panels(mut self, lead_panels: usize) -> Self {
        self.lead_panels = lead_panels;
        self
    }

    pub fn with_thresholds(mut self, thresholds: SectionThresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        self.thresholds = thresholds;
        Ok(self)
    }

    pub fn lead_panels(&self) -> usize {
        self.lead_panels
    }

    pub fn content_count(&self) -> usize {
        self.content_count
    }

    pub fn thresholds(&self) -> &SectionThresholds {
        &self.thresholds
    }

    pub fn band_count(&self) -> usize {
        self.lead_panels + self.content_count + 2
    }

    pub fn band_width(&self) -> f32 {
        1.0 / self.band_count() as f32
    }

    /// Start of band `index`; `band_start(band_count())` is 1.0.
    pub fn band_start(&self, index: usize) -> f32 {
        if index >= self.band_count() {
            1.0
        } else {
            index as f32 * self.band_width()
        }
    }

    /// Half-open `[start, end)` range covered by the content items.
    pub fn content_band(&self) -> (f32, f32) {
        let first = 1 + self.lead_panels;
        (
            self.band_start(first),
            self.band_start(first + self.content_count),
        )
    }

    pub fn content_item_width(&self) -> f32 {
        let (start, end) = self.content_band();
        (end - start) / self.content_count as f32
    }

    pub fn show_intro(&self, progress: f32) -> bool {
        clamp_progress(progress) < self.thresholds.intro_visible_below
    }

    pub fn journey_finished(&self, progress: f32) -> bool {
        clamp_progress(progress) > self.thresholds.journey_finished_above
    }

    pub fn active_index(&self, progress: f32) -> Option<usize> {
        let p = clamp_progress(progress);
        let (start, end) = self.content_band();
        if p < start || p >= end {
            return None;
        }
        let raw = ((p - start) / self.content_item_width()).floor();
        Some((raw.max(0.0) as usize).min(self.content_count - 1))
    }

    pub fn section_at(&self, progress: f32) -> Section {
        let p = clamp_progress(progress);
        if let Some(index) = self.active_index(p) {
            return Section::Content(index);
        }
        let (start, _) = self.content_band();
        if p >= start {
            return Section::Contact;
        }
        let band = ((p / self.band_width()).floor().max(0.0) as usize).min(self.lead_panels);
        match band {
            0 => Section::Intro,
            k => Section::Panel(k - 1),
        }
    }

    /// Lead panel `panel` is revealed inside its band, widened by the reveal
    /// margin: the start moves down by `margin` of its own offset, the end
    /// moves up by `margin` band widths.
    pub fn panel_visible(&self, panel: usize, progress: f32) -> bool {
        if panel >= self.lead_panels {
            return false;
        }
        let p = clamp_progress(progress);
        let margin = self.thresholds.panel_reveal_margin;
        let start = self.band_start(1 + panel) * (1.0 - margin);
        let end = self.band_start(2 + panel) + margin * self.band_width();
        p >= start && p < end
    }

    pub fn resolve(&self, progress: f32) -> SectionState {
        let p = clamp_progress(progress);
        SectionState {
            progress: p,
            section: self.section_at(p),
            active: self.active_index(p),
            show_intro: self.show_intro(p),
            journey_finished: self.journey_finished(p),
        }
    }
}
