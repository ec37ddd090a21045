use crate::config::ConfigError;
use crate::scroll::clamp_progress;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One control point of the camera trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vec3,
    pub target: Vec3,
}

impl Waypoint {
    pub fn new(position: [f32; 3], target: [f32; 3]) -> Self {
        Self {
            position: Vec3::from(position),
            target: Vec3::from(target),
        }
    }
}

/// Camera eye and look-at point for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Piecewise linear camera trajectory over an ordered waypoint list.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPath {
    waypoints: Vec<Waypoint>,
}

impl CameraPath {
    /// Needs at least two waypoints, all finite.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints(waypoints.len()));
        }
        if let Some(index) = waypoints
            .iter()
            .position(|w| !w.position.is_finite() || !w.target.is_finite())
        {
            return Err(ConfigError::NonFiniteWaypoint(index));
        }
        Ok(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Segment index and blend factor for `progress`.
    ///
    /// The segment is clamped to `len - 2` so `progress == 1.0` resolves to the
    /// last segment at factor 1.0 rather than past the end.
    pub fn segment_at(&self, progress: f32) -> (usize, f32) {
        let spans = (self.waypoints.len() - 1) as f32;
        let scaled = clamp_progress(progress) * spans;
        let segment = (scaled.floor() as usize).min(self.waypoints.len() - 2);
        (segment, scaled - segment as f32)
    }

    pub fn sample(&self, progress: f32) -> CameraPose {
        let (segment, t) = self.segment_at(progress);
        let from = &self.waypoints[segment];
        let to = &self.waypoints[segment + 1];
        CameraPose {
            eye: lerp_exact(from.position, to.position, t),
            target: lerp_exact(from.target, to.target, t),
        }
    }
}

/// `a * (1 - t) + b * t`: returns `a` at 0 and `b` at 1 without rounding drift.
#[inline]
pub fn lerp_exact(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}
