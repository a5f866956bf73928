//! First-order seismological estimates.
//!
//! These are deliberately simple deterministic models: good enough to
//! drive the affected-area collation and the map radius, not a substitute
//! for proper ground-motion modelling.

/// Raw magnitude readings as they arrive from the network, before
/// unification.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MagnitudeReadings {
    pub ml : Option<f64>,
    pub mb : Option<f64>,
    pub ms : Option<f64>,
    pub mw : Option<f64>,
}

/// Moment magnitude from a local (Richter) magnitude reading.
///
/// Below magnitude 6 local readings drift slightly under the moment
/// scale; at 6 and above they are taken as equivalent.
pub fn moment_from_local(ml: f64) -> f64 {
    if ml < 6.0 {
        ml + 0.01 * (6.0 - ml)
    } else {
        ml
    }
}

/// Moment magnitude from a body-wave magnitude reading.
pub fn moment_from_body_wave(mb: f64) -> f64 {
    0.9 * mb + 1.0
}

/// Moment magnitude from a surface-wave magnitude reading.
pub fn moment_from_surface_wave(ms: f64) -> f64 {
    ms + 0.65
}

/// Unifies a set of readings into a single moment magnitude.
///
/// A reported moment magnitude is used untouched. Otherwise the first
/// available reading in the order local, body wave, surface wave is
/// converted and truncated (not rounded) to two decimal places. Returns
/// `None` when no scale was reported at all.
pub fn unified_moment_magnitude(readings: MagnitudeReadings) -> Option<f64> {
    if let Some(mw) = readings.mw {
        return Some(mw);
    }
    let converted = if let Some(ml) = readings.ml {
        moment_from_local(ml)
    } else if let Some(mb) = readings.mb {
        moment_from_body_wave(mb)
    } else if let Some(ms) = readings.ms {
        moment_from_surface_wave(ms)
    } else {
        return None;
    };
    Some((converted * 100.0).trunc() / 100.0)
}

/// Estimated radius in meters within which an earthquake of moment
/// magnitude `mw` at `depth_km` is expected to be felt.
///
/// The radius grows by half an order of magnitude per magnitude step and
/// widens with focal depth, floored to whole meters.
pub fn estimate_radius_meters(mw: f64, depth_km: f64) -> u64 {
    let base_km = 10f64.powf(0.5 * mw - 1.8);
    let depth_gain = 1.0 + depth_km / 100.0;
    (base_km * depth_gain * 1000.0).floor() as u64
}
