//! Boiler physical characteristics.
//!
//! `BoilerCharacteristics` is supplied once at construction and is
//! immutable for the run — no dynamic reconfiguration mid-run. It can
//! be loaded from any external source (out of scope for this crate)
//! because it derives `Serialize`/`Deserialize`.

use heapless::Vec as HVec;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on the number of pumps a single boiler can have.
/// Sizes every fixed-capacity, pump-indexed collection in this crate.
pub const MAX_PUMPS: usize = 32;

/// Fixed sampling interval assumed by the hydraulic predictor, in
/// time-units.
pub const CYCLE: f64 = 5.0;

/// Size of the predictor's per-candidate table: one entry for every pump
/// count from 0 to `MAX_PUMPS` inclusive.
pub const MAX_CANDIDATES: usize = MAX_PUMPS + 1;

/// Immutable physical characteristics of one boiler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoilerCharacteristics {
    /// Drum capacity (volume units).
    capacity: f64,
    /// Minimal limit level — below this, water level is unsafe.
    minimal_limit_level: f64,
    /// Maximal limit level — above this, water level is unsafe.
    maximal_limit_level: f64,
    /// Minimal normal level — bottom of the routine operating band.
    minimal_normal_level: f64,
    /// Maximal normal level — top of the routine operating band.
    maximal_normal_level: f64,
    /// Maximal steam production rate (volume per cycle-unit).
    maximal_steam_rate: f64,
    /// Per-pump pumping capacity (volume per time-unit), length == pump count.
    pump_capacities: HVec<f64, MAX_PUMPS>,
}

impl BoilerCharacteristics {
    /// Construct and validate a new set of boiler characteristics.
    ///
    /// Rejects configurations that violate the data-model invariants:
    /// `minimal_normal_level > minimal_limit_level`,
    /// `maximal_normal_level < maximal_limit_level`,
    /// `minimal_normal_level <= maximal_normal_level`, at least one pump,
    /// and no more than [`MAX_PUMPS`].
    pub fn new(
        capacity: f64,
        minimal_limit_level: f64,
        maximal_limit_level: f64,
        minimal_normal_level: f64,
        maximal_normal_level: f64,
        maximal_steam_rate: f64,
        pump_capacities: Vec<f64>,
    ) -> Result<Self> {
        if pump_capacities.len() > MAX_PUMPS {
            return Err(Error::Config("pump count exceeds MAX_PUMPS"));
        }
        let pump_capacities =
            HVec::from_slice(&pump_capacities).expect("length checked against MAX_PUMPS above");
        let characteristics = Self {
            capacity,
            minimal_limit_level,
            maximal_limit_level,
            minimal_normal_level,
            maximal_normal_level,
            maximal_steam_rate,
            pump_capacities,
        };
        characteristics.validate()?;
        Ok(characteristics)
    }

    /// Re-check the data-model invariants. Called by [`new`](Self::new)
    /// and exposed so a harness that deserializes characteristics from
    /// an external source can validate before use.
    pub fn validate(&self) -> Result<()> {
        if self.pump_capacities.is_empty() {
            return Err(Error::Config("pump count must be at least 1"));
        }
        if self.minimal_normal_level <= self.minimal_limit_level {
            return Err(Error::Config(
                "minimal_normal_level must exceed minimal_limit_level",
            ));
        }
        if self.maximal_normal_level >= self.maximal_limit_level {
            return Err(Error::Config(
                "maximal_normal_level must be below maximal_limit_level",
            ));
        }
        if self.minimal_normal_level > self.maximal_normal_level {
            return Err(Error::Config(
                "minimal_normal_level must not exceed maximal_normal_level",
            ));
        }
        Ok(())
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn minimal_limit_level(&self) -> f64 {
        self.minimal_limit_level
    }

    pub fn maximal_limit_level(&self) -> f64 {
        self.maximal_limit_level
    }

    pub fn minimal_normal_level(&self) -> f64 {
        self.minimal_normal_level
    }

    pub fn maximal_normal_level(&self) -> f64 {
        self.maximal_normal_level
    }

    pub fn maximal_steam_rate(&self) -> f64 {
        self.maximal_steam_rate
    }

    pub fn number_of_pumps(&self) -> usize {
        self.pump_capacities.len()
    }

    pub fn pump_capacity(&self, i: usize) -> f64 {
        self.pump_capacities[i]
    }

    /// The ideal mid-point of the normal band (I5: always within
    /// `[minimal_normal_level, maximal_normal_level]`).
    pub fn normal_mid_level(&self) -> f64 {
        (self.minimal_normal_level + self.maximal_normal_level) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BoilerCharacteristics {
        BoilerCharacteristics::new(1000.0, 50.0, 800.0, 200.0, 600.0, 5.0, vec![10.0, 10.0])
            .unwrap()
    }

    #[test]
    fn normal_mid_level_is_band_midpoint() {
        let c = valid();
        assert_eq!(c.normal_mid_level(), 400.0);
    }

    #[test]
    fn rejects_empty_pump_list() {
        let result = BoilerCharacteristics::new(1000.0, 50.0, 800.0, 200.0, 600.0, 5.0, vec![]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn rejects_normal_band_outside_limit_envelope() {
        let result =
            BoilerCharacteristics::new(1000.0, 250.0, 800.0, 200.0, 600.0, 5.0, vec![10.0]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_inverted_normal_band() {
        let result =
            BoilerCharacteristics::new(1000.0, 50.0, 800.0, 600.0, 200.0, 5.0, vec![10.0]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_too_many_pumps() {
        let result = BoilerCharacteristics::new(
            1000.0,
            50.0,
            800.0,
            200.0,
            600.0,
            5.0,
            vec![10.0; MAX_PUMPS + 1],
        );
        assert!(result.is_err());
    }
}
