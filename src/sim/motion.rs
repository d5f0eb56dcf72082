//! Spherical surface motion
//!
//! Entities move by projecting their desired direction onto the tangent
//! plane at their current radial, stepping, then re-projecting onto the
//! sphere. Orientation is kept continuous by pre-multiplying the shortest-arc
//! rotation between the old and new radials: re-deriving "up" from scratch
//! each frame twists the model around its own axis, the incremental
//! correction does not.

use glam::{Quat, Vec3};
use rand::Rng;

use crate::{project_onto_tangent, random_unit_vector};

/// Result of one surface step
#[derive(Debug, Clone, Copy)]
pub struct SurfaceStep {
    /// New position, exactly on the sphere of the requested radius
    pub pos: Vec3,
    /// New radial (unit)
    pub radial: Vec3,
    /// Shortest-arc rotation from the old radial to the new one;
    /// pre-multiply into the entity orientation
    pub correction: Quat,
}

/// Advance a surface-bound entity along `direction` and re-project it onto
/// the sphere of radius `surface_radius`.
///
/// `direction` should already lie in the tangent plane, but any radial
/// component is harmless: the re-projection cancels it.
pub fn step_on_surface(
    pos: Vec3,
    direction: Vec3,
    speed: f32,
    dt: f32,
    surface_radius: f32,
) -> SurfaceStep {
    let old_radial = pos.normalize_or(Vec3::Y);
    let moved = pos + direction * speed * dt;
    let radial = moved.normalize_or(old_radial);
    SurfaceStep {
        pos: radial * surface_radius,
        radial,
        correction: Quat::from_rotation_arc(old_radial, radial),
    }
}

/// Pursuit direction along the surface: aim at `target`, projected onto the
/// tangent plane at `radial`. When the projection degenerates (target at the
/// antipode, or directly above/below), substitute a random tangent direction
/// so the entity always makes progress.
pub fn chase_direction(from: Vec3, target: Vec3, radial: Vec3, rng: &mut impl Rng) -> Vec3 {
    let mut dir = project_onto_tangent((target - from).normalize_or_zero(), radial);
    while dir.length() < 0.01 {
        dir = project_onto_tangent(random_unit_vector(rng), radial);
    }
    dir.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_step_lands_on_sphere() {
        let pos = Vec3::new(0.0, 40.5, 0.0);
        let step = step_on_surface(pos, Vec3::Z, 8.0, 1.0 / 60.0, 40.5);
        assert!((step.pos.length() - 40.5).abs() < 1e-4);
    }

    #[test]
    fn test_correction_maps_old_radial_to_new() {
        let pos = Vec3::new(0.0, 40.5, 0.0);
        let step = step_on_surface(pos, Vec3::X, 8.0, 0.5, 40.5);
        let rotated = step.correction * Vec3::Y;
        assert!(rotated.distance(step.radial) < 1e-4);
    }

    #[test]
    fn test_zero_direction_is_stationary() {
        let pos = Vec3::new(0.0, 40.5, 0.0);
        let step = step_on_surface(pos, Vec3::ZERO, 8.0, 1.0 / 60.0, 40.5);
        assert!(step.pos.distance(pos) < 1e-5);
        assert!((step.correction.to_scaled_axis()).length() < 1e-5);
    }

    #[test]
    fn test_chase_direction_is_tangent_and_toward_target() {
        let mut rng = Pcg32::seed_from_u64(1);
        let radial = Vec3::Y;
        let from = Vec3::new(0.0, 40.5, 0.0);
        let target = Vec3::new(10.0, 38.0, 0.0);
        let dir = chase_direction(from, target, radial, &mut rng);
        assert!(dir.dot(radial).abs() < 1e-5);
        assert!(dir.x > 0.9);
    }

    #[test]
    fn test_chase_direction_antipode_falls_back_to_random_tangent() {
        let mut rng = Pcg32::seed_from_u64(2);
        let radial = Vec3::Y;
        let from = Vec3::new(0.0, 40.5, 0.0);
        // Target directly below: projection of the pursuit vector is zero
        let target = Vec3::new(0.0, -40.5, 0.0);
        let dir = chase_direction(from, target, radial, &mut rng);
        assert!((dir.length() - 1.0).abs() < 1e-4);
        assert!(dir.dot(radial).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_step_preserves_surface_radius(
            px in -1.0f32..1.0,
            py in -1.0f32..1.0,
            pz in -1.0f32..1.0,
            dx in -1.0f32..1.0,
            dy in -1.0f32..1.0,
            dz in -1.0f32..1.0,
            speed in 0.0f32..50.0,
            radius in 10.0f32..60.0,
        ) {
            let p = Vec3::new(px, py, pz);
            prop_assume!(p.length() > 0.1);
            let pos = p.normalize() * radius;
            let dir = Vec3::new(dx, dy, dz);
            let step = step_on_surface(pos, dir, speed, 1.0 / 60.0, radius);
            prop_assert!((step.pos.length() - radius).abs() < radius * 1e-5);
            // The correction takes the old radial onto the new one
            let old_radial = pos.normalize();
            prop_assert!((step.correction * old_radial).distance(step.radial) < 1e-3);
        }
    }
}
