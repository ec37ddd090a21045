//! Camera description shared with the web frontend.
//!
//! Kept free of platform APIs; the renderer turns it into matrices and the
//! scene synchronizer moves it along the scroll path.

use crate::camera_path::CameraPose;
use crate::constants::{
    CAMERA_FOV_DEG, CAMERA_FOV_WIDE_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, WIDE_ASPECT_THRESHOLD,
};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(pose: CameraPose, aspect: f32) -> Self {
        let mut camera = Self {
            eye: pose.eye,
            target: pose.target,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        camera.set_aspect(aspect);
        camera
    }

    /// Update the aspect ratio and pick the matching field of view.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            return;
        }
        self.aspect = aspect;
        self.fovy_radians = fov_for_aspect(aspect).to_radians();
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Vertical field of view in degrees; narrower on wide screens.
#[inline]
pub fn fov_for_aspect(aspect: f32) -> f32 {
    if aspect > WIDE_ASPECT_THRESHOLD {
        CAMERA_FOV_WIDE_DEG
    } else {
        CAMERA_FOV_DEG
    }
}
