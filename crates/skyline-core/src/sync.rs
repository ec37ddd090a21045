//! Per-frame application of scroll and lighting state to the renderer.

use crate::camera_path::{CameraPath, CameraPose};
use crate::constants::{
    GLOW_BASE, GLOW_PULSE_AMPLITUDE, GLOW_PULSE_RATE, GLOW_SMOOTHING_PER_FRAME,
};
use crate::lighting::LightingSnapshot;
use crate::sections::SectionState;
use crate::shared::Latest;

/// The only way scene state reaches the renderer.
pub trait SceneTarget {
    /// False until the surface and pipelines exist.
    fn is_ready(&self) -> bool;
    fn apply_camera(&mut self, pose: CameraPose);
    fn apply_glow(&mut self, slot: usize, intensity: f32);
    fn apply_lighting(&mut self, lighting: &LightingSnapshot);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowTuning {
    /// Fraction of the remaining distance covered each frame.
    pub smoothing: f32,
    pub base: f32,
    pub pulse_amplitude: f32,
    /// Radians per second.
    pub pulse_rate: f32,
}

impl Default for GlowTuning {
    fn default() -> Self {
        Self {
            smoothing: GLOW_SMOOTHING_PER_FRAME,
            base: GLOW_BASE,
            pulse_amplitude: GLOW_PULSE_AMPLITUDE,
            pulse_rate: GLOW_PULSE_RATE,
        }
    }
}

impl GlowTuning {
    /// Pulsing full glow when lit, dark otherwise. The item index offsets the
    /// phase so neighbours do not pulse in lockstep.
    pub fn target(&self, lit: bool, elapsed: f32, index: usize) -> f32 {
        if lit {
            self.base + self.pulse_amplitude * (elapsed * self.pulse_rate + index as f32).sin()
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Skipped,
    Applied,
}

pub struct SceneSync {
    path: CameraPath,
    tuning: GlowTuning,
    glow: Vec<f32>,
    sections: Latest<SectionState>,
    lighting: Latest<LightingSnapshot>,
}

impl SceneSync {
    pub fn new(
        path: CameraPath,
        item_count: usize,
        tuning: GlowTuning,
        sections: Latest<SectionState>,
        lighting: Latest<LightingSnapshot>,
    ) -> Self {
        Self {
            path,
            tuning,
            glow: vec![0.0; item_count],
            sections,
            lighting,
        }
    }

    /// Current displayed glow per content item.
    pub fn glow(&self) -> &[f32] {
        &self.glow
    }

    pub fn path(&self) -> &CameraPath {
        &self.path
    }

    pub fn frame<T: SceneTarget + ?Sized>(&mut self, target: &mut T, elapsed: f32) -> FrameOutcome {
        if !target.is_ready() {
            return FrameOutcome::Skipped;
        }
        let state = self.sections.get();
        let lighting = self.lighting.get();

        target.apply_camera(self.path.sample(state.progress));

        let smoothing = self.tuning.smoothing;
        for (i, current) in self.glow.iter_mut().enumerate() {
            let lit = state.journey_finished || state.active == Some(i);
            let goal = self.tuning.target(lit, elapsed, i);
            *current += (goal - *current) * smoothing;
            target.apply_glow(i, *current);
        }

        target.apply_lighting(&lighting);
        FrameOutcome::Applied
    }
}
