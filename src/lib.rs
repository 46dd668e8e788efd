/*
 * 3D Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the boid simulation core.
 * The crate is headless: it owns the flocking behavior, the bounded
 * simulation volume, and the uniform spatial grid used for neighbor
 * lookups. Rendering, cameras, and UI belong to the embedding
 * application, which reads boid positions and velocities after each tick.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use bounds::Bounds;
pub use error::{ConfigError, GridError};
pub use params::SimulationParams;
pub use simulation::Simulation;
pub use spatial_grid::SpatialGrid;

// Define modules
pub mod boid;
pub mod bounds;
pub mod error;
pub mod params;
pub mod simulation;
pub mod spatial_grid;
