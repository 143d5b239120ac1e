//! Hydraulic predictor.
//!
//! For every candidate pump count produces the interval of plausible
//! post-cycle water levels, bracketed by the current steam reading
//! (optimistic bound) and the maximal rated steam production
//! (pessimistic bound).

use heapless::Vec as HVec;

use crate::config::{BoilerCharacteristics, MAX_CANDIDATES, CYCLE};

/// One candidate pump count's predicted post-cycle water-level interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub k: usize,
    pub hi: f64,
    pub lo: f64,
    pub mid: f64,
}

/// Predict the post-cycle water-level interval for every pump count
/// `k` from 0 to `characteristics.number_of_pumps()` inclusive.
///
/// Pump contribution for `k ≥ 1` is charged at `cap[k-1] * k` — the
/// last engaged pump's capacity times the count, not the sum of the
/// individual capacities. Kept bit-for-bit as the upstream protocol
/// defines it; see the predictor entry in the project's design notes.
pub fn predict(
    water_level: f64,
    steam_level: f64,
    characteristics: &BoilerCharacteristics,
) -> HVec<Candidate, MAX_CANDIDATES> {
    let mut candidates = HVec::new();
    for k in 0..=characteristics.number_of_pumps() {
        let contribution = if k == 0 {
            0.0
        } else {
            CYCLE * characteristics.pump_capacity(k - 1) * k as f64
        };
        let hi = water_level + contribution - CYCLE * steam_level;
        let lo = water_level + contribution - CYCLE * characteristics.maximal_steam_rate();
        let mid = (hi + lo) / 2.0;
        candidates
            .push(Candidate { k, hi, lo, mid })
            .expect("k is bounded by MAX_CANDIDATES");
    }
    candidates
}
