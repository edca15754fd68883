//! CPU ray casting of volume items.
//!
//! Each pixel's ray is marched through every item it hits, compositing
//! samples front to back over a black background. Rows are rendered in
//! parallel.

use glam::Vec3;
use rayon::prelude::*;

use super::camera::{OrbitCamera, Ray};
use super::item::VolumeItem;

/// Accumulated opacity at which a ray stops marching.
const OPAQUE: f32 = 0.99;

/// Render `items` into an RGBA8 buffer of `width * height * 4` bytes.
#[must_use]
pub fn render(items: &[VolumeItem], camera: &OrbitCamera, width: usize, height: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; width * height * 4];
    if width == 0 || height == 0 {
        return pixels;
    }

    pixels
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, out) in row.chunks_exact_mut(4).enumerate() {
                let ray = camera.ray(px, py, width, height);
                let color = trace(items, &ray);
                out.copy_from_slice(&[
                    crate::util::f32_to_u8(color.x * 255.0),
                    crate::util::f32_to_u8(color.y * 255.0),
                    crate::util::f32_to_u8(color.z * 255.0),
                    255,
                ]);
            }
        });
    pixels
}

/// Premultiplied colour and opacity along one ray.
#[derive(Debug, Clone, Copy, Default)]
struct Accum {
    color: Vec3,
    alpha: f32,
}

fn trace(items: &[VolumeItem], ray: &Ray) -> Vec3 {
    // Items are composited nearest first by their entry distance.
    let mut hits: Vec<(f32, f32, &VolumeItem, Ray)> = items
        .iter()
        .filter_map(|item| {
            let inverse = item.transform().inverse();
            let local = Ray {
                origin: inverse.transform_point3(ray.origin),
                direction: inverse.transform_vector3(ray.direction),
            };
            let (t0, t1) = intersect_box(&local, item.local_extent())?;
            Some((t0, t1, item, local))
        })
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut acc = Accum::default();
    for (t0, t1, item, local) in hits {
        march(item, &local, t0, t1, &mut acc);
        if acc.alpha >= OPAQUE {
            break;
        }
    }
    acc.color
}

fn march(item: &VolumeItem, ray: &Ray, t0: f32, t1: f32, acc: &mut Accum) {
    let speed = ray.direction.length();
    if speed <= f32::EPSILON {
        return;
    }
    // `t` is in world units along the ray; local steps are 1/density voxels.
    let dt = 1.0 / (crate::util::usize_to_f32(item.slice_density()) * speed);
    let mut t = t0 + dt * 0.5;
    while t < t1 {
        if let Some([r, g, b, a]) = item.sample(ray.origin + ray.direction * t) {
            let alpha = f32::from(a) / 255.0;
            if alpha > 0.0 {
                let color = Vec3::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0;
                let weight = (1.0 - acc.alpha) * alpha;
                acc.color += color * weight;
                acc.alpha += weight;
                if acc.alpha >= OPAQUE {
                    return;
                }
            }
        }
        t += dt;
    }
}

/// Slab test against the box `[0, extent]`. Returns the clipped `(near, far)`
/// ray parameters, with `near >= 0`.
fn intersect_box(ray: &Ray, extent: Vec3) -> Option<(f32, f32)> {
    let inv = ray.direction.recip();
    let a = (Vec3::ZERO - ray.origin) * inv;
    let b = (extent - ray.origin) * inv;
    let near = a.min(b).max_element().max(0.0);
    let far = a.max(b).min_element();
    (near.is_finite() && far.is_finite() && near < far).then_some((near, far))
}
