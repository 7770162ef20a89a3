//! # Constants and type definitions for heliotraj
//!
//! The angular periods used by the wrap/unwrap logic, and the
//! type aliases shared by every module of the crate.
//!
//! ## Overview
//!
//! - Angular periods (full turn, half turn) in degrees
//! - Type aliases documenting the unit carried by a plain `f64`

// -------------------------------------------------------------------------------------------------
// Angular periods
// -------------------------------------------------------------------------------------------------

/// One full turn in degrees, the period of a Carrington longitude
pub const FULL_TURN: f64 = 360.0;

/// Half a turn in degrees.
///
/// Adjacent longitude samples further apart than this are treated as a wrap crossing.
pub const HALF_TURN: f64 = 180.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Heliocentric distance in solar radii
pub type SolarRadius = f64;
/// Modified Julian Date (days, UTC)
pub type MJD = f64;
/// Duration in days
pub type Days = f64;
