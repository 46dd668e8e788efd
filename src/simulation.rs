/*
 * Simulation Module
 *
 * This module drives the per-tick update of the whole flock. A tick runs
 * in two strictly ordered phases so per-boid updates stay independent:
 *
 * 1. Read phase: snapshot the flock and gather every boid's neighbor
 *    list from the grid as it stood at the end of the previous tick.
 * 2. Mutate phase: run movement + fix_to_bounds for every boid against
 *    the snapshot, optionally in parallel chunks, then clear and rebuild
 *    the grid from the new positions.
 *
 * Because each boid reads only the snapshot and writes only its own
 * state, the parallel and sequential paths produce identical results.
 */

use glam::Vec3;
use rand::Rng;
use rayon::prelude::*;

use crate::boid::Boid;
use crate::bounds::Bounds;
use crate::error::ConfigError;
use crate::params::SimulationParams;
use crate::spatial_grid::SpatialGrid;

pub struct Simulation {
    bounds: Bounds,
    params: SimulationParams,
    boids: Vec<Boid>,
    grid: SpatialGrid<usize>,
}

impl Simulation {
    // Create a simulation with `params.num_boids` boids spawned at
    // uniform random positions inside the bounds, each with a random
    // heading at max_speed.
    pub fn new(bounds: Bounds, params: SimulationParams) -> Result<Self, ConfigError> {
        // Reject a bad volume before sampling spawn positions; an empty
        // range would panic inside the sampler instead of reporting the
        // configuration error.
        let size = bounds.size();
        if size.x < 0.0 || size.y < 0.0 || size.z < 0.0 {
            return Err(ConfigError::NegativeBoundsSize(size.x, size.y, size.z));
        }

        let mut rng = rand::thread_rng();
        let min = bounds.min();
        let max = bounds.max();

        let boids = (0..params.num_boids)
            .map(|id| {
                let position = Vec3::new(
                    rng.gen_range(min.x..=max.x),
                    rng.gen_range(min.y..=max.y),
                    rng.gen_range(min.z..=max.z),
                );
                let heading = Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                )
                .try_normalize()
                .unwrap_or(Vec3::X);

                Boid::new(id, position, heading * params.max_speed)
            })
            .collect();

        Self::from_boids(bounds, params, boids)
    }

    // Create a simulation from an explicit population, for embedders that
    // spawn their own boids and for deterministic tests.
    pub fn from_boids(
        bounds: Bounds,
        params: SimulationParams,
        boids: Vec<Boid>,
    ) -> Result<Self, ConfigError> {
        let grid = SpatialGrid::new(bounds, params.grid_density)?;

        let mut simulation = Self {
            bounds,
            params,
            boids,
            grid,
        };
        simulation.rebuild_grid();

        log::info!(
            "simulation created: {} boids, grid density {}",
            simulation.boids.len(),
            simulation.params.grid_density
        );

        Ok(simulation)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    // Behavior tunables (weights, distances, speed, toggles) may change
    // between ticks, e.g. from a UI. `num_boids` and `grid_density` are
    // construction-only: the population and the grid are fixed once the
    // simulation exists, and editing them here has no effect.
    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    // Read access for the renderer after a tick completes
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn grid(&self) -> &SpatialGrid<usize> {
        &self.grid
    }

    // Advance the simulation by `delta_time` seconds.
    pub fn step(&mut self, delta_time: f32) {
        // Read phase: neighbor lists against the pre-tick snapshot
        let snapshot = self.boids.clone();
        let neighbor_lists: Vec<Vec<usize>> = snapshot
            .iter()
            .map(|boid| {
                if self.params.enable_spatial_grid {
                    self.neighbors_via_grid(boid, &snapshot)
                } else {
                    self.neighbors_via_scan(boid, &snapshot)
                }
            })
            .collect();

        // Mutate phase
        let bounds = self.bounds;
        let params = self.params;
        if self.params.enable_parallel {
            // Process boids in parallel chunks to reduce synchronization
            // overhead; chunk size derived from the available threads
            let chunk_size = (self.boids.len() / rayon::current_num_threads()).max(1);

            self.boids
                .par_chunks_mut(chunk_size)
                .enumerate()
                .for_each(|(chunk_index, chunk)| {
                    for (offset, boid) in chunk.iter_mut().enumerate() {
                        let i = chunk_index * chunk_size + offset;
                        boid.movement(&snapshot, &neighbor_lists[i], &bounds, &params, delta_time);
                        boid.fix_to_bounds(&bounds, params.edge_margin);
                    }
                });
        } else {
            for (i, boid) in self.boids.iter_mut().enumerate() {
                boid.movement(&snapshot, &neighbor_lists[i], &bounds, &params, delta_time);
                boid.fix_to_bounds(&bounds, params.edge_margin);
            }
        }

        // Rebuild the grid from the post-tick positions, strictly after
        // every boid finished integrating
        self.rebuild_grid();
    }

    // Candidate set from the block of bins around the boid's own bin,
    // widened to as many rings as it takes to span the sense distance
    // when bins are smaller than it, then filtered by actual distance.
    // Every boid an exhaustive scan would find is in some bin of that
    // block, so the grid search never drops an in-range neighbor. A boid
    // momentarily outside the bounds gets no neighbors this tick; edge
    // avoidance and fix_to_bounds pull it back in.
    pub fn neighbors_via_grid(&self, boid: &Boid, snapshot: &[Boid]) -> Vec<usize> {
        let Ok(bin_index) = self.grid.world_pos_to_bin_index(boid.position) else {
            return Vec::new();
        };
        let Some((ix, iy, iz)) = self.grid.bin_index_to_coords(bin_index) else {
            return Vec::new();
        };

        let d = self.grid.density() as i64;
        let (rx, ry, rz) = reach_in_bins(self.params.sense_distance, self.grid.bin_size(), d);
        let (ix, iy, iz) = (ix as i64, iy as i64, iz as i64);

        let mut neighbors = Vec::new();
        for dz in -rz..=rz {
            let nz = iz + dz;
            if nz < 0 || nz >= d {
                continue;
            }
            for dy in -ry..=ry {
                let ny = iy + dy;
                if ny < 0 || ny >= d {
                    continue;
                }
                for dx in -rx..=rx {
                    let nx = ix + dx;
                    if nx < 0 || nx >= d {
                        continue;
                    }

                    let Some(items) = self.grid.bin((nx + ny * d + nz * d * d) as usize) else {
                        continue;
                    };
                    for &other_index in items {
                        let other = &snapshot[other_index];
                        if other.id == boid.id {
                            continue;
                        }
                        if boid.position.distance(other.position) <= self.params.sense_distance {
                            neighbors.push(other_index);
                        }
                    }
                }
            }
        }
        neighbors
    }

    // Exhaustive O(n^2) fallback, kept for small populations and as the
    // reference the grid path is tested against
    pub fn neighbors_via_scan(&self, boid: &Boid, snapshot: &[Boid]) -> Vec<usize> {
        snapshot
            .iter()
            .enumerate()
            .filter(|(_, other)| {
                other.id != boid.id
                    && boid.position.distance(other.position) <= self.params.sense_distance
            })
            .map(|(i, _)| i)
            .collect()
    }

    // Advances the grid to the positions most recently written by the
    // mutate phase.
    fn rebuild_grid(&mut self) {
        self.grid.clear();
        for (i, boid) in self.boids.iter().enumerate() {
            match self.grid.world_pos_to_bin_index(boid.position) {
                Ok(bin_index) => self.grid.add_to_bin(bin_index, i),
                Err(error) => {
                    // fix_to_bounds keeps boids inside, so this indicates
                    // an edge-of-volume precision problem worth surfacing
                    log::debug!("boid {} not indexed into grid: {}", boid.id, error);
                }
            }
        }
    }
}

// Bin rings needed per axis for a block search to cover the full sense
// radius; one ring suffices when a bin is at least as large as the
// radius. A degenerate zero-size axis falls back to scanning the whole
// axis.
fn reach_in_bins(sense_distance: f32, bin_size: Vec3, density: i64) -> (i64, i64, i64) {
    let reach = |bin: f32| -> i64 {
        let rings = (sense_distance / bin).ceil();
        if rings.is_finite() {
            (rings as i64).clamp(1, density)
        } else {
            density
        }
    };
    (
        reach(bin_size.x),
        reach(bin_size.y),
        reach(bin_size.z),
    )
}
