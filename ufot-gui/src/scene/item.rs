//! RGBA volume placed in world space.

use glam::{Mat4, Vec3};
use ndarray::Array4;

/// An RGBA voxel grid with a model transform.
///
/// Voxel `(x, y, z)` occupies the unit cube `[x, x+1] × [y, y+1] × [z, z+1]`
/// in local coordinates, so the whole item spans `[0, dims]`.
#[derive(Debug, Clone)]
pub struct VolumeItem {
    data: Array4<u8>,
    slice_density: usize,
    transform: Mat4,
}

impl VolumeItem {
    /// Wrap an `(x, y, z, 4)` RGBA array.
    ///
    /// `slice_density` is the number of samples taken per voxel along a ray
    /// and is raised to at least 1.
    #[must_use]
    pub fn new(data: Array4<u8>, slice_density: usize) -> Self {
        Self {
            data,
            slice_density: slice_density.max(1),
            transform: Mat4::IDENTITY,
        }
    }

    /// Voxel grid extent as `(x, y, z)`.
    #[must_use]
    pub fn dims(&self) -> (usize, usize, usize) {
        let (x, y, z, _) = self.data.dim();
        (x, y, z)
    }

    /// Samples per voxel.
    #[must_use]
    pub fn slice_density(&self) -> usize {
        self.slice_density
    }

    /// Local-to-world transform.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Translate in world space, after any existing transform.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.transform = Mat4::from_translation(Vec3::new(x, y, z)) * self.transform;
    }

    /// Scale the item.
    ///
    /// With `local` the scale applies in item coordinates before the
    /// existing transform, otherwise about the world origin after it.
    pub fn scale(&mut self, x: f32, y: f32, z: f32, local: bool) {
        let scale = Mat4::from_scale(Vec3::new(x, y, z));
        self.transform = if local {
            self.transform * scale
        } else {
            scale * self.transform
        };
    }

    /// Upper corner of the local bounding box.
    #[must_use]
    pub fn local_extent(&self) -> Vec3 {
        let (x, y, z) = self.dims();
        Vec3::new(
            crate::util::usize_to_f32(x),
            crate::util::usize_to_f32(y),
            crate::util::usize_to_f32(z),
        )
    }

    /// World-space corners of the bounding box, as `(min, max)`.
    #[must_use]
    pub fn world_bounds(&self) -> (Vec3, Vec3) {
        let extent = self.local_extent();
        let mut lo = Vec3::splat(f32::INFINITY);
        let mut hi = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { 0.0 } else { extent.x },
                if i & 2 == 0 { 0.0 } else { extent.y },
                if i & 4 == 0 { 0.0 } else { extent.z },
            );
            let world = self.transform.transform_point3(corner);
            lo = lo.min(world);
            hi = hi.max(world);
        }
        (lo, hi)
    }

    /// Nearest voxel at a local position, or `None` outside the grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn sample(&self, local: Vec3) -> Option<[u8; 4]> {
        if local.x < 0.0 || local.y < 0.0 || local.z < 0.0 {
            return None;
        }
        let (dx, dy, dz) = self.dims();
        let (x, y, z) = (local.x as usize, local.y as usize, local.z as usize);
        if x >= dx || y >= dy || z >= dz {
            return None;
        }
        Some([
            self.data[[x, y, z, 0]],
            self.data[[x, y, z, 1]],
            self.data[[x, y, z, 2]],
            self.data[[x, y, z, 3]],
        ])
    }
}
