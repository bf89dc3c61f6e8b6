// This file is part of OpenFA.
//
// OpenFA is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenFA is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenFA.  If not, see <http://www.gnu.org/licenses/>.
//! Shared ray/rotation math for the five wheel variants (spec.md §4.3.3).
//! Every variant places `2*rays` nodes around the axle: half attached to
//! `axis1` (the "outer" ring), half to `axis2` (the "inner" ring),
//! interleaved at `pi/rays` radian steps so consecutive nodes alternate
//! rings around the circle.
use nalgebra::{Rotation3, Unit, Vector3};
use std::f32::consts::PI;

/// Picks an arbitrary unit vector perpendicular to `axis`, scaled to unit
/// length. Falls back to the world X axis when `axis` is close to parallel
/// with world Y, so the cross product never degenerates.
pub fn perpendicular(axis: &Unit<Vector3<f32>>) -> Vector3<f32> {
    let y = Vector3::y();
    let seed = if axis.dot(&y).abs() > 0.999 { Vector3::x() } else { y };
    axis.cross(&seed).normalize()
}

/// The axle's unit direction, `axis2 - axis1` normalized. Callers are
/// responsible for ordering `axis1`/`axis2` per the `axis1.z < axis2.z`
/// invariant before calling this.
pub fn axis_direction(axis1: Vector3<f32>, axis2: Vector3<f32>) -> Unit<Vector3<f32>> {
    Unit::new_normalize(axis2 - axis1)
}

/// One ring-pair position for ray index `i` of `num_rays`: the outer-ring
/// point (attached logically to `axis1`) and the inner-ring point (attached
/// to `axis2`), each offset from its axis node by `radius` along a vector
/// that rotates by `pi/num_rays` every half-step.
pub fn ray_points(
    axis1: Vector3<f32>,
    axis2: Vector3<f32>,
    axis: &Unit<Vector3<f32>>,
    ray_vector: Vector3<f32>,
    radius: f32,
    i: u32,
    num_rays: u32,
) -> (Vector3<f32>, Vector3<f32>) {
    let step = PI / num_rays as f32;
    let outer_angle = 2.0 * i as f32 * step;
    let inner_angle = (2 * i + 1) as f32 * step;
    let outer = axis1 + Rotation3::from_axis_angle(axis, outer_angle) * ray_vector * radius;
    let inner = axis2 + Rotation3::from_axis_angle(axis, inner_angle) * ray_vector * radius;
    (outer, inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_is_actually_perpendicular() {
        let axis = Unit::new_normalize(Vector3::new(0.0, 0.0, 1.0));
        let perp = perpendicular(&axis);
        assert!(perp.dot(&axis).abs() < 1e-5);
        assert!((perp.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ray_points_lie_at_radius_from_their_axis_node() {
        let axis1 = Vector3::new(0.0, 0.0, -0.5);
        let axis2 = Vector3::new(0.0, 0.0, 0.5);
        let axis = axis_direction(axis1, axis2);
        let ray_vector = perpendicular(&axis);
        let (outer, inner) = ray_points(axis1, axis2, &axis, ray_vector, 0.4, 0, 8);
        assert!(((outer - axis1).norm() - 0.4).abs() < 1e-4);
        assert!(((inner - axis2).norm() - 0.4).abs() < 1e-4);
    }

    #[test]
    fn consecutive_rays_are_evenly_spaced() {
        let axis1 = Vector3::new(0.0, 0.0, -0.5);
        let axis2 = Vector3::new(0.0, 0.0, 0.5);
        let axis = axis_direction(axis1, axis2);
        let ray_vector = perpendicular(&axis);
        let (outer0, _) = ray_points(axis1, axis2, &axis, ray_vector, 0.4, 0, 8);
        let (outer1, _) = ray_points(axis1, axis2, &axis, ray_vector, 0.4, 1, 8);
        let v0 = (outer0 - axis1).normalize();
        let v1 = (outer1 - axis1).normalize();
        let angle = v0.dot(&v1).clamp(-1.0, 1.0).acos();
        assert!((angle - 2.0 * PI / 8.0).abs() < 1e-4);
    }
}
