//! Camera description, world-to-screen projection, and the drift-in easing.
//!
//! These types intentionally avoid referencing platform-specific APIs; the
//! host renderer builds its matrices from the same `Camera` the picker uses,
//! so both agree on what is under the pointer.

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

/// Output viewport in pixels.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

/// A projected point: pixel coordinates plus normalized depth.
///
/// `depth` is 0 at the near plane and 1 at the far plane; values outside
/// \[0, 1\] mean the point lies outside the visible frustum.
#[derive(Clone, Copy, Debug)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Project a world-space point to pixel coordinates plus normalized depth.
    ///
    /// Returns `None` for points behind the camera or when the projection
    /// produces non-finite values (e.g. a NaN position).
    pub fn project_to_screen(&self, world: Vec3, viewport: Viewport) -> Option<ScreenPoint> {
        let clip = self.projection_matrix() * self.view_matrix() * world.extend(1.0);
        if !clip.is_finite() || clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x * 0.5 + 0.5) * viewport.width;
        let y = (0.5 - ndc.y * 0.5) * viewport.height;
        if !x.is_finite() || !y.is_finite() || !ndc.z.is_finite() {
            return None;
        }
        Some(ScreenPoint { x, y, depth: ndc.z })
    }
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Time-based drift of the camera eye from a start distance to a target
/// distance along -Z of the orbit, with ease-out-cubic shaping.
#[derive(Clone, Debug)]
pub struct CameraDrift {
    start_distance: f32,
    target_distance: f32,
    started_ms: u64,
    duration_ms: u64,
}

impl CameraDrift {
    pub fn new(start_distance: f32, target_distance: f32, now_ms: u64, duration_ms: u64) -> Self {
        Self {
            start_distance,
            target_distance,
            started_ms: now_ms,
            duration_ms: duration_ms.max(1),
        }
    }

    /// Eye distance at `now_ms`; clamps to the target once the drift is done.
    pub fn eye_distance(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let k = ease_out_cubic(t);
        self.start_distance + (self.target_distance - self.start_distance) * k
    }

    pub fn is_complete(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= self.duration_ms
    }
}
