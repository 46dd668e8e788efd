/*
 * Bounds Module
 *
 * This module defines the Bounds struct, an axis-aligned box describing
 * the simulation volume. It is a pure value type: constructed once per
 * simulation run and read-only thereafter. All other geometry (extents,
 * min/max corners) is derived from center and size on demand.
 */

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    center: Vec3,
    size: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    // Half the size on each axis
    pub fn extents(&self) -> Vec3 {
        self.size / 2.0
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents()
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents()
    }

    // Test whether a point lies within the box on all three axes,
    // against [min, max] when inclusive or (min, max) when not.
    pub fn contains(&self, point: Vec3, inclusive: bool) -> bool {
        let min = self.min();
        let max = self.max();

        if inclusive {
            point.x >= min.x
                && point.x <= max.x
                && point.y >= min.y
                && point.y <= max.y
                && point.z >= min.z
                && point.z <= max.z
        } else {
            point.x > min.x
                && point.x < max.x
                && point.y > min.y
                && point.y < max.y
                && point.z > min.z
                && point.z < max.z
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_geometry_from_center_and_size() {
        let bounds = Bounds::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(bounds.extents(), Vec3::new(5.0, 10.0, 15.0));
        assert_eq!(bounds.min(), Vec3::new(-4.0, -8.0, -12.0));
        assert_eq!(bounds.max(), Vec3::new(6.0, 12.0, 18.0));
    }

    #[test]
    fn contains_inclusive_admits_faces() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::splat(10.0));
        assert!(bounds.contains(Vec3::ZERO, true));
        assert!(bounds.contains(Vec3::new(5.0, 0.0, 0.0), true));
        assert!(bounds.contains(Vec3::new(-5.0, 5.0, -5.0), true));
        assert!(!bounds.contains(Vec3::new(5.1, 0.0, 0.0), true));
    }

    #[test]
    fn contains_exclusive_rejects_faces() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::splat(10.0));
        assert!(bounds.contains(Vec3::new(4.9, 4.9, 4.9), false));
        assert!(!bounds.contains(Vec3::new(5.0, 0.0, 0.0), false));
        assert!(!bounds.contains(Vec3::new(0.0, -5.0, 0.0), false));
    }

    #[test]
    fn contains_checks_every_axis() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::new(10.0, 2.0, 10.0));
        assert!(!bounds.contains(Vec3::new(0.0, 3.0, 0.0), true));
        assert!(bounds.contains(Vec3::new(4.0, 1.0, -4.0), true));
    }
}
