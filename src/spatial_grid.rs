/*
 * Spatial Grid Module
 *
 * This module defines the generic SpatialGrid struct for efficient
 * neighbor lookups. It partitions the simulation bounds into a
 * density x density x density lattice of uniform bins, allowing small
 * neighborhood queries instead of O(n^2) all-pairs scans.
 *
 * The grid knows nothing about boids: it stores any item type, so it can
 * be tested in isolation (e.g. with a bool-valued grid). Index-producing
 * operations report failures through Result values rather than panics;
 * callers on the per-frame path must check before indexing bins.
 */

use glam::Vec3;

use crate::bounds::Bounds;
use crate::error::{ConfigError, GridError};

pub struct SpatialGrid<T> {
    bins: Vec<Vec<T>>,
    bounds: Bounds,
    bin_size: Vec3,
    density: usize,
}

impl<T> SpatialGrid<T> {
    // Create a grid over the given bounds with `density` bins per axis.
    // Allocation is O(density^3); callers pick the density to balance
    // memory against expected occupancy (a handful of items per bin).
    pub fn new(bounds: Bounds, density: usize) -> Result<Self, ConfigError> {
        if density < 1 {
            return Err(ConfigError::InvalidDensity(density));
        }
        let size = bounds.size();
        if size.x < 0.0 || size.y < 0.0 || size.z < 0.0 {
            return Err(ConfigError::NegativeBoundsSize(size.x, size.y, size.z));
        }

        let bin_count = density * density * density;
        let mut bins = Vec::with_capacity(bin_count);
        for _ in 0..bin_count {
            bins.push(Vec::new());
        }

        log::debug!(
            "spatial grid created: density {} ({} bins), bin size {:?}",
            density,
            bin_count,
            size / density as f32
        );

        Ok(Self {
            bins,
            bounds,
            bin_size: size / density as f32,
            density,
        })
    }

    pub fn density(&self) -> usize {
        self.density
    }

    pub fn bin_size(&self) -> Vec3 {
        self.bin_size
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    // Read access to one bin's items; None when the index is out of range.
    pub fn bin(&self, bin_index: usize) -> Option<&[T]> {
        self.bins.get(bin_index).map(Vec::as_slice)
    }

    // Convert a world position to the row-major index of the bin that
    // contains it. Cell coordinates are centered so the grid spans
    // [0, density) per axis with the origin mapped near the middle bin.
    pub fn world_pos_to_bin_index(&self, pos: Vec3) -> Result<usize, GridError> {
        if !self.bounds.contains(pos, true) {
            return Err(GridError::OutOfBounds);
        }

        let half = self.density as f32 / 2.0;
        let rel = (pos - self.bounds.center()) / self.bin_size;
        let ix = (rel.x + half).floor() as i64;
        let iy = (rel.y + half).floor() as i64;
        let iz = (rel.z + half).floor() as i64;

        let d = self.density as i64;
        let index = ix + iy * d + iz * d * d;

        // A position on the extreme boundary can round to a coordinate of
        // exactly `density` (or -1). Checked per axis: a single overflowing
        // coordinate must not alias into a valid index on another row.
        if ix < 0 || iy < 0 || iz < 0 || ix >= d || iy >= d || iz >= d {
            return Err(GridError::IndexOutOfRange(index));
        }

        Ok(index as usize)
    }

    // Decompose a row-major bin index back into (ix, iy, iz) cell
    // coordinates; None when the index is out of range.
    pub fn bin_index_to_coords(&self, bin_index: usize) -> Option<(usize, usize, usize)> {
        if bin_index >= self.bins.len() {
            return None;
        }
        let d = self.density;
        Some((bin_index % d, (bin_index / d) % d, bin_index / (d * d)))
    }

    // Enumerate the indices of the 3x3x3 block of bins centered on
    // `bin_index`, optionally excluding the center bin itself. Candidate
    // cells are tested per axis, so bins on the outer ring of the grid
    // return the neighbors that exist rather than none at all.
    pub fn neighbor_bin_indices(&self, bin_index: usize, include_self: bool) -> Vec<usize> {
        let Some((ix, iy, iz)) = self.bin_index_to_coords(bin_index) else {
            return Vec::new();
        };

        let d = self.density as i64;
        let (ix, iy, iz) = (ix as i64, iy as i64, iz as i64);
        let mut indices = Vec::with_capacity(27);

        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if !include_self && dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }

                    let (nx, ny, nz) = (ix + dx, iy + dy, iz + dz);
                    if nx < 0 || ny < 0 || nz < 0 || nx >= d || ny >= d || nz >= d {
                        continue;
                    }

                    indices.push((nx + ny * d + nz * d * d) as usize);
                }
            }
        }

        indices
    }

    // Insert an item into a bin. A no-op (not an error) when the index is
    // out of range. Bins do not deduplicate; double-inserting stores the
    // item twice.
    pub fn add_to_bin(&mut self, bin_index: usize, item: T) {
        if let Some(bin) = self.bins.get_mut(bin_index) {
            bin.push(item);
        }
    }

    // Remove the first item in the bin comparing equal to `item`. A no-op
    // when the index is out of range or no item matches.
    pub fn remove_from_bin(&mut self, bin_index: usize, item: &T)
    where
        T: PartialEq,
    {
        if let Some(bin) = self.bins.get_mut(bin_index) {
            if let Some(pos) = bin.iter().position(|existing| existing == item) {
                bin.remove(pos);
            }
        }
    }

    // Empty every bin, keeping the allocations for the next rebuild.
    pub fn clear(&mut self) {
        for bin in &mut self.bins {
            bin.clear();
        }
    }

    // Minimum corner of a bin's axis-aligned sub-box, for diagnostics and
    // debug rendering.
    pub fn bin_min(&self, bin_index: usize) -> Option<Vec3> {
        let (ix, iy, iz) = self.bin_index_to_coords(bin_index)?;
        Some(
            self.bounds.min()
                + Vec3::new(
                    ix as f32 * self.bin_size.x,
                    iy as f32 * self.bin_size.y,
                    iz as f32 * self.bin_size.z,
                ),
        )
    }

    // Maximum corner of a bin's axis-aligned sub-box.
    pub fn bin_max(&self, bin_index: usize) -> Option<Vec3> {
        self.bin_min(bin_index).map(|min| min + self.bin_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn centered_bounds(size: f32) -> Bounds {
        Bounds::new(Vec3::ZERO, Vec3::splat(size))
    }

    #[test]
    fn construction_allocates_density_cubed_bins() {
        let grid: SpatialGrid<bool> = SpatialGrid::new(centered_bounds(200.0), 16).unwrap();
        assert_eq!(grid.bin_count(), 16 * 16 * 16);
        assert_eq!(grid.bin_size(), Vec3::splat(12.5));
    }

    #[test]
    fn construction_rejects_zero_density() {
        let result: Result<SpatialGrid<bool>, _> = SpatialGrid::new(centered_bounds(10.0), 0);
        assert_eq!(result.err(), Some(ConfigError::InvalidDensity(0)));
    }

    #[test]
    fn construction_rejects_negative_bounds_size() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::new(10.0, -1.0, 10.0));
        let result: Result<SpatialGrid<bool>, _> = SpatialGrid::new(bounds, 4);
        assert_eq!(
            result.err(),
            Some(ConfigError::NegativeBoundsSize(10.0, -1.0, 10.0))
        );
    }

    #[test]
    fn origin_maps_to_a_bin_that_brackets_it() {
        // Bounds size (10,10,10) at the origin with density 2 gives bin
        // size (5,5,5); the origin must land in a valid bin whose corners
        // bracket it componentwise.
        let grid: SpatialGrid<bool> = SpatialGrid::new(centered_bounds(10.0), 2).unwrap();
        assert_eq!(grid.bin_size(), Vec3::splat(5.0));

        let index = grid.world_pos_to_bin_index(Vec3::ZERO).unwrap();
        assert!(index < grid.bin_count());

        let min = grid.bin_min(index).unwrap();
        let max = grid.bin_max(index).unwrap();
        assert!(min.x <= 0.0 && min.y <= 0.0 && min.z <= 0.0);
        assert!(max.x >= 0.0 && max.y >= 0.0 && max.z >= 0.0);
    }

    #[test]
    fn outside_positions_report_out_of_bounds() {
        let grid: SpatialGrid<bool> = SpatialGrid::new(centered_bounds(100.0), 8).unwrap();
        for pos in [
            Vec3::new(51.0, 0.0, 0.0),
            Vec3::new(0.0, -50.1, 0.0),
            Vec3::new(0.0, 0.0, 1000.0),
            Vec3::splat(-51.0),
        ] {
            assert_eq!(
                grid.world_pos_to_bin_index(pos),
                Err(GridError::OutOfBounds)
            );
        }
    }

    #[test]
    fn random_interior_positions_round_trip_into_their_bin() {
        // Mirrors the source project's own diagnostic harness: a
        // bool-valued grid, random positions, and a containment check
        // against the computed bin's corners.
        let grid: SpatialGrid<bool> = SpatialGrid::new(centered_bounds(200.0), 16).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let pos = Vec3::new(
                rng.gen_range(-99.0_f32..99.0),
                rng.gen_range(-99.0_f32..99.0),
                rng.gen_range(-99.0_f32..99.0),
            );

            let index = grid
                .world_pos_to_bin_index(pos)
                .expect("interior position must map to a bin");
            let min = grid.bin_min(index).unwrap();
            let max = grid.bin_max(index).unwrap();

            assert!(pos.x >= min.x && pos.x <= max.x, "x out of bin at {pos:?}");
            assert!(pos.y >= min.y && pos.y <= max.y, "y out of bin at {pos:?}");
            assert!(pos.z >= min.z && pos.z <= max.z, "z out of bin at {pos:?}");
        }
    }

    #[test]
    fn interior_bin_has_full_neighborhood() {
        let grid: SpatialGrid<bool> = SpatialGrid::new(centered_bounds(100.0), 4).unwrap();
        // Cell (1,1,1) sits strictly inside a density-4 grid.
        let center = 1 + 4 + 16;
        assert_eq!(grid.neighbor_bin_indices(center, true).len(), 27);
        let without_self = grid.neighbor_bin_indices(center, false);
        assert_eq!(without_self.len(), 26);
        assert!(!without_self.contains(&center));
    }

    #[test]
    fn corner_bin_keeps_its_existing_neighbors() {
        // Bins on the outer ring still return the part of the 3x3x3 block
        // that exists: a corner cell has a 2x2x2 block.
        let grid: SpatialGrid<bool> = SpatialGrid::new(centered_bounds(100.0), 4).unwrap();
        assert_eq!(grid.neighbor_bin_indices(0, true).len(), 8);
        assert_eq!(grid.neighbor_bin_indices(0, false).len(), 7);
    }

    #[test]
    fn neighbor_indices_of_invalid_bin_are_empty() {
        let grid: SpatialGrid<bool> = SpatialGrid::new(centered_bounds(100.0), 4).unwrap();
        assert!(grid.neighbor_bin_indices(64, true).is_empty());
    }

    #[test]
    fn add_and_remove_ignore_out_of_range_indices() {
        let mut grid: SpatialGrid<u32> = SpatialGrid::new(centered_bounds(10.0), 2).unwrap();
        grid.add_to_bin(999, 7);
        grid.remove_from_bin(999, &7);
        assert!(grid.bin(999).is_none());
    }

    #[test]
    fn remove_deletes_first_match_only() {
        let mut grid: SpatialGrid<u32> = SpatialGrid::new(centered_bounds(10.0), 2).unwrap();
        grid.add_to_bin(3, 5);
        grid.add_to_bin(3, 5);
        grid.add_to_bin(3, 9);

        grid.remove_from_bin(3, &5);
        assert_eq!(grid.bin(3), Some(&[5, 9][..]));

        grid.remove_from_bin(3, &1);
        assert_eq!(grid.bin(3), Some(&[5, 9][..]));
    }

    #[test]
    fn clear_empties_every_bin() {
        let mut grid: SpatialGrid<u32> = SpatialGrid::new(centered_bounds(10.0), 2).unwrap();
        grid.add_to_bin(0, 1);
        grid.add_to_bin(7, 2);
        grid.clear();
        assert!(grid.bin(0).unwrap().is_empty());
        assert!(grid.bin(7).unwrap().is_empty());
    }
}
