//! # Reference events
//!
//! The perihelion-relative axis measures longitudes against one *reference event*. Which
//! event applies to a panel is decided outside this crate; it is plugged in through the
//! [`ReferenceResolver`] trait, which receives the centre of the panel window explicitly.
//!
//! * Any `Fn(MJD) -> Option<MJD>` is a resolver.
//! * [`PerihelionCatalog`] resolves to the catalogued perihelion closest to the centre.
//!
//! Once the reference epoch is known, [`ReferenceEvent::resolve`] maps its longitude with
//! the same mapper, unwrapped, so that it is directly comparable with the panel series.
use std::cmp::Ordering;

use crate::constants::{Days, Degree, MJD};
use crate::heliotraj_errors::TrajectoryError;
use crate::mapper::TrajectoryMapper;
use crate::time::iso_to_mjd;
use crate::trajectory_table::Quantity;

/// Reference epoch and its unwrapped Carrington longitude (`NaN` if unresolved).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEvent {
    pub time: MJD,
    pub longitude: Degree,
}

impl ReferenceEvent {
    /// Map the longitude of `time` through `mapper` (`unwrap = true`).
    ///
    /// The longitude is `NaN` when the mapper is not loaded, has no longitude series, or
    /// `time` lies outside its coverage.
    pub fn resolve(mapper: &TrajectoryMapper, time: MJD) -> Self {
        let longitude = mapper
            .map_at(time, Quantity::Longitude, true)
            .unwrap_or(f64::NAN);
        ReferenceEvent { time, longitude }
    }

    pub fn is_resolved(&self) -> bool {
        self.longitude.is_finite()
    }
}

/// Finds the reference epoch for a panel centred on `center`.
pub trait ReferenceResolver {
    fn resolve(&self, center: MJD) -> Option<MJD>;
}

impl<F> ReferenceResolver for F
where
    F: Fn(MJD) -> Option<MJD>,
{
    fn resolve(&self, center: MJD) -> Option<MJD> {
        self(center)
    }
}

/// Sorted list of perihelion epochs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerihelionCatalog {
    epochs: Vec<MJD>,
}

impl PerihelionCatalog {
    /// Build a catalog; non-finite epochs are dropped and the rest sorted.
    pub fn new(mut epochs: Vec<MJD>) -> Self {
        epochs.retain(|t| t.is_finite());
        epochs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        PerihelionCatalog { epochs }
    }

    /// Build a catalog from ISO 8601 timestamps.
    pub fn from_iso<S: AsRef<str>>(dates: &[S]) -> Result<Self, TrajectoryError> {
        let epochs = dates
            .iter()
            .map(|d| iso_to_mjd(d.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(epochs))
    }

    pub fn epochs(&self) -> &[MJD] {
        &self.epochs
    }

    /// Catalogued epoch closest to `center` (earlier one on ties).
    pub fn nearest(&self, center: MJD) -> Option<MJD> {
        if center.is_nan() {
            return None;
        }
        let idx = self.epochs.partition_point(|&t| t < center);
        let before = idx.checked_sub(1).map(|i| self.epochs[i]);
        let after = self.epochs.get(idx).copied();
        match (before, after) {
            (Some(b), Some(a)) => Some(if center - b <= a - center { b } else { a }),
            (b, a) => b.or(a),
        }
    }

    /// Nearest epoch, provided it lies within `max_distance` days of `center`.
    pub fn nearest_within(&self, center: MJD, max_distance: Days) -> Option<MJD> {
        self.nearest(center)
            .filter(|t| (t - center).abs() <= max_distance)
    }
}

impl ReferenceResolver for PerihelionCatalog {
    fn resolve(&self, center: MJD) -> Option<MJD> {
        self.nearest(center)
    }
}
