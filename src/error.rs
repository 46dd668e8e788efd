/*
 * Error Types Module
 *
 * This module defines the error types for the simulation core.
 * Grid index computation reports failures through values rather than
 * panics since it sits on the hot per-frame path; configuration problems
 * are rejected once, at construction time.
 */

use thiserror::Error;

// Failure modes of grid index computation. Callers must check the result
// before indexing bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    // The queried world position lies outside the configured bounds.
    #[error("position lies outside the grid bounds")]
    OutOfBounds,

    // The position is inside the bounds but floating rounding at the
    // extreme boundary pushed a cell coordinate outside [0, density).
    // Reported distinctly so callers can diagnose edge-of-volume
    // precision issues.
    #[error("computed bin index {0} falls outside the bin array")]
    IndexOutOfRange(i64),
}

// Invalid configuration values, rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid density must be at least 1, got {0}")]
    InvalidDensity(usize),

    #[error("bounds size must be non-negative on every axis, got ({0}, {1}, {2})")]
    NegativeBoundsSize(f32, f32, f32),
}
