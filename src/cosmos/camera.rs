//! Perspective camera and the opening camera journey

use glam::{Mat4, Vec2, Vec3};

/// Perspective camera looking down -z from its position
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Yaw (radians)
    pub rotation_y: f32,
    /// Vertical field of view (degrees)
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels
    pub viewport: (f32, f32),
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 1000.0),
            rotation_y: 0.0,
            fov_deg: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
            viewport: (1.0, 1.0),
        };
        camera.resize(width, height);
        camera
    }

    /// Track a new viewport size
    pub fn resize(&mut self, width: f32, height: f32) {
        let width = width.max(1.0);
        let height = height.max(1.0);
        self.viewport = (width, height);
        self.aspect = width / height;
    }

    pub fn view(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.rotation_y)).inverse()
    }

    fn perspective(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.perspective() * self.view()
    }

    /// Freeze the camera's matrices for one frame of drawing
    pub fn projection(&self) -> Projection {
        let view = self.view();
        Projection {
            view,
            view_projection: self.perspective() * view,
            viewport: self.viewport,
            near: self.near,
            far: self.far,
            focal_px: self.viewport.1 / (2.0 * (self.fov_deg.to_radians() * 0.5).tan()),
        }
    }

    /// Project a single world point; see [`Projection::project`]
    pub fn project(&self, world: Vec3) -> Option<(Vec2, f32)> {
        self.projection().project(world)
    }

    /// Pixel size of a world-space length seen at `depth`
    pub fn pixel_scale(&self, depth: f32) -> f32 {
        self.projection().pixel_scale(depth)
    }
}

/// Camera matrices computed once and reused for every point of a frame
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    view: Mat4,
    view_projection: Mat4,
    viewport: (f32, f32),
    near: f32,
    far: f32,
    focal_px: f32,
}

impl Projection {
    /// Project a world point to pixel coordinates (origin top-left)
    ///
    /// Returns the screen position and the view-space distance, or `None`
    /// if the point is behind the camera or outside the depth range.
    pub fn project(&self, world: Vec3) -> Option<(Vec2, f32)> {
        let depth = -self.view.transform_point3(world).z;
        if depth < self.near || depth > self.far {
            return None;
        }

        let clip = self.view_projection * world.extend(1.0);
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        let (w, h) = self.viewport;
        Some((
            Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h),
            depth,
        ))
    }

    pub fn pixel_scale(&self, depth: f32) -> f32 {
        self.focal_px / depth.max(self.near)
    }
}

fn power2_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

fn power1_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

fn power2_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Progress of a tween running from `start` for `duration` seconds
fn progress(elapsed: f32, start: f32, duration: f32) -> f32 {
    ((elapsed - start) / duration).clamp(0.0, 1.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Scripted opening: fly in, swing around once, settle on the photo
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraJourney;

impl CameraJourney {
    /// Total length of the journey (seconds)
    pub const DURATION: f32 = 9.0;

    /// Camera z and yaw `elapsed` seconds into the journey
    pub fn sample(&self, elapsed: f32) -> (f32, f32) {
        let approach = power2_out(progress(elapsed, 0.0, 3.0));
        let swing = power1_in_out(progress(elapsed, 0.0, 6.0));
        let glide = power2_in_out(progress(elapsed, 3.0, 4.0));
        let focus = power2_in_out(progress(elapsed, 7.0, 2.0));

        let z = if elapsed < 3.0 {
            lerp(1000.0, 300.0, approach)
        } else if elapsed < 7.0 {
            lerp(300.0, 150.0, glide)
        } else {
            lerp(150.0, 100.0, focus)
        };
        let yaw = swing * std::f32::consts::TAU;
        (z, yaw)
    }

    /// Move `camera` to where the journey puts it at `elapsed`
    pub fn apply(&self, camera: &mut Camera, elapsed: f32) {
        let (z, yaw) = self.sample(elapsed);
        camera.position = Vec3::new(0.0, 0.0, z);
        camera.rotation_y = crate::wrap_angle(yaw);
    }
}
