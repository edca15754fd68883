//! Orbit camera for the volume view.

use glam::Vec3;

/// Elevation limit in degrees, short of the poles.
const MAX_ELEVATION: f32 = 89.0;

/// A camera orbiting a centre point, Z up.
///
/// Angles are in degrees. The defaults give a three-quarter view from
/// above at distance 10 with a 60° horizontal field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub center: Vec3,
    /// Distance from the centre.
    pub distance: f32,
    /// Angle above the XY plane.
    pub elevation: f32,
    /// Angle around Z, measured from +X.
    pub azimuth: f32,
    /// Horizontal field of view.
    pub fov: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            distance: 10.0,
            elevation: 30.0,
            azimuth: 45.0,
            fov: 60.0,
        }
    }
}

/// A ray in world space.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl OrbitCamera {
    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let elev = self.elevation.to_radians();
        let azim = self.azimuth.to_radians();
        self.center
            + self.distance
                * Vec3::new(elev.cos() * azim.cos(), elev.cos() * azim.sin(), elev.sin())
    }

    /// Rotate around the centre.
    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(360.0);
        self.elevation = (self.elevation + delta_elevation).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Scale the distance by `0.999^delta`; positive deltas move closer.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * 0.999_f32.powf(delta)).max(1e-3);
    }

    /// Primary ray through the centre of pixel `(px, py)` of a
    /// `width` × `height` image, row 0 at the top.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ray(&self, px: usize, py: usize, width: usize, height: usize) -> Ray {
        let origin = self.position();
        let forward = (self.center - origin).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Z).normalize_or(Vec3::X);
        let up = right.cross(forward);

        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let tan_half = (self.fov.to_radians() * 0.5).tan();
        let ndc_x = 2.0 * (px as f32 + 0.5) / w - 1.0;
        let ndc_y = 1.0 - 2.0 * (py as f32 + 0.5) / h;

        let direction =
            (forward + right * (ndc_x * tan_half) + up * (ndc_y * tan_half * h / w)).normalize();
        Ray { origin, direction }
    }
}
