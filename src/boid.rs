/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows four rules:
 * 1. Alignment: Steer towards the average heading of neighbors
 * 2. Cohesion: Steer towards the average position of neighbors
 * 3. Separation: Avoid crowding close neighbors
 * 4. Edge avoidance: Seek the bounds center when near the volume boundary
 *
 * A tick is two phases, always in this order: movement (velocity and
 * position update from neighbor influence) then fix_to_bounds (hard
 * containment correction). Both mutate only this boid's own state, so
 * updates are safe to run in parallel across boids once neighbor lists
 * have been snapshotted.
 */

use glam::Vec3;

use crate::bounds::Bounds;
use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub id: usize,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Boid {
    pub fn new(id: usize, position: Vec3, velocity: Vec3) -> Self {
        Self {
            id,
            position,
            velocity,
        }
    }

    // Update velocity and position from neighbor influence. Neighbors are
    // addressed as indices into a snapshot of the whole flock taken before
    // any boid moved this tick; the boid itself is excluded by id.
    //
    // Speed is constant by design: the combined rule output is folded into
    // the velocity, which is then renormalized to max_speed. Only the
    // heading changes.
    pub fn movement(
        &mut self,
        flock: &[Boid],
        neighbor_indices: &[usize],
        bounds: &Bounds,
        params: &SimulationParams,
        delta_time: f32,
    ) {
        let mut alignment = Vec3::ZERO;
        let mut cohesion = Vec3::ZERO;
        let mut separation = Vec3::ZERO;
        let mut count = 0;

        for &i in neighbor_indices {
            let other = &flock[i];
            if other.id == self.id {
                continue;
            }

            alignment += other.velocity;
            cohesion += other.position;

            // Push away from neighbors closer than the separation distance
            let toward_other = other.position - self.position;
            if toward_other.length() < params.separation_distance {
                separation -= toward_other.normalize_or_zero();
            }

            count += 1;
        }

        if count > 0 {
            alignment = (alignment / count as f32).normalize_or_zero() * params.max_speed;
            cohesion = (cohesion / count as f32).normalize_or_zero() * params.max_speed;
            separation = separation.normalize_or_zero() * params.max_speed;
        }

        // Steer back toward the center once the boid passes 90% of the
        // half-extent on any axis. The result is a direction scaled to
        // max_speed, not a magnitude weighted by how many axes triggered.
        let mut seek_center = Vec3::ZERO;
        let offset = self.position - bounds.center();
        let limit = bounds.extents() * 0.9;
        if offset.x.abs() > limit.x || offset.y.abs() > limit.y || offset.z.abs() > limit.z {
            seek_center = (bounds.center() - self.position).normalize_or_zero() * params.max_speed;
        }

        let previous_velocity = self.velocity;
        self.velocity += (alignment * params.alignment_weight
            + cohesion * params.cohesion_weight
            + separation * params.separation_weight
            + seek_center * params.avoid_edges_weight)
            * delta_time;

        // Renormalize to the fixed speed. A zero resultant (all-zero
        // weight configurations) cannot be normalized; keep the previous
        // velocity instead of propagating NaN.
        self.velocity = match self.velocity.try_normalize() {
            Some(direction) => direction * params.max_speed,
            None => previous_velocity,
        };

        // Explicit Euler integration, single substep
        self.position += self.velocity * delta_time;
    }

    // Hard containment correction: a no-op while the position is inside
    // the bounds. A boid that escaped is snapped, per axis, to re-enter
    // from the opposite face at `margin` fraction of the box size inside
    // it, so it reappears visibly inside the volume instead of exactly on
    // the boundary (which would immediately re-trigger edge avoidance).
    pub fn fix_to_bounds(&mut self, bounds: &Bounds, margin: f32) {
        if bounds.contains(self.position, true) {
            return;
        }

        let min = bounds.min();
        let max = bounds.max();
        let size = bounds.size();

        if self.position.x >= max.x {
            self.position.x = min.x + margin * size.x;
        } else if self.position.x <= min.x {
            self.position.x = max.x - margin * size.x;
        }

        if self.position.y >= max.y {
            self.position.y = min.y + margin * size.y;
        } else if self.position.y <= min.y {
            self.position.y = max.y - margin * size.y;
        }

        if self.position.z >= max.z {
            self.position.z = min.z + margin * size.z;
        } else if self.position.z <= min.z {
            self.position.z = max.z - margin * size.z;
        }
    }
}
