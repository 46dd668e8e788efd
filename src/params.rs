/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the boid simulation. The tunables are
 * population-wide: every boid reads the same values each tick. They are
 * carried as an explicit configuration value passed into each update
 * rather than as process-wide state, so multiple independently tuned
 * populations can run side by side.
 */

// Parameters for the simulation, shared by the whole population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub max_speed: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub avoid_edges_weight: f32,
    // Neighbors closer than this push the boid away
    pub separation_distance: f32,
    // Radius within which other boids count as neighbors
    pub sense_distance: f32,
    // Fraction of the box size a corrected boid re-enters inside the
    // boundary, so containment does not immediately re-trigger edge
    // avoidance
    pub edge_margin: f32,
    // Bins per axis of the spatial grid (total bins = density^3)
    pub grid_density: usize,
    // Performance settings
    pub enable_parallel: bool,
    pub enable_spatial_grid: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 1000,
            max_speed: 16.0,
            alignment_weight: 3.0,
            cohesion_weight: 1.0,
            separation_weight: 2.0,
            avoid_edges_weight: 2.0,
            separation_distance: 12.0,
            sense_distance: 32.0,
            edge_margin: 0.1,
            grid_density: 16,
            enable_parallel: true,
            enable_spatial_grid: true,
        }
    }
}
