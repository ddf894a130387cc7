//! The crowd level simulation.
//!
//! There is no sensor behind the gauge. Each tick moves the previous
//! percentage 10% of the way toward the target of the current daypart and
//! perturbs it with uniform noise in `[-5, +5]`:
//!
//! ```text
//! raw     = previous + (target - previous) * 0.1 + noise
//! percent = round(clamp(raw, 0, 100))
//! count   = round(percent / 100 * 200)
//! ```
//!
//! With the noise held at zero the update is a plain exponential
//! smoothing step: it converges on the target without overshooting it.

use chrono::{DateTime, FixedOffset, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::trace;
use vanclimb_types::{CrowdReading, Daypart};

use crate::clock::hour_of_day;

/// Fraction of the gap to the target closed on every tick.
pub const SMOOTHING_FACTOR: f64 = 0.1;

/// Noise is drawn from `[-NOISE_AMPLITUDE, NOISE_AMPLITUDE]`.
pub const NOISE_AMPLITUDE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Noise
// ---------------------------------------------------------------------------

/// A source of the per-tick noise term.
///
/// Samples must lie in `[-NOISE_AMPLITUDE, NOISE_AMPLITUDE]`. Values
/// outside that range, and non-finite values, are pulled back into it by
/// [`next_reading`].
pub trait NoiseSource {
    /// Draw the noise for one tick.
    fn sample(&mut self) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// Uniform noise over the closed interval, backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct UniformNoise<R = SmallRng> {
    rng: R,
}

impl UniformNoise<SmallRng> {
    /// Noise seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible noise from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, otherwise from entropy.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl<R: Rng> UniformNoise<R> {
    /// Wrap an existing generator.
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn sample(&mut self) -> f64 {
        self.rng.random_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE)
    }
}

/// Noise that is always the same value.
///
/// `FixedNoise::zero()` makes the simulation deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(f64);

impl FixedNoise {
    /// Constant noise, clamped into the allowed range.
    pub fn new(value: f64) -> Self {
        Self(clamp_noise(value))
    }

    /// No noise at all.
    pub const fn zero() -> Self {
        Self(0.0)
    }
}

impl NoiseSource for FixedNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

fn clamp_noise(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-NOISE_AMPLITUDE, NOISE_AMPLITUDE)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// The update step
// ---------------------------------------------------------------------------

/// The daypart in effect at `now`.
pub fn daypart_at(now: &DateTime<FixedOffset>) -> Daypart {
    Daypart::from_hour(hour_of_day(now))
}

/// The occupancy percentage the crowd is drifting toward at `now`.
pub fn target_percent(now: &DateTime<FixedOffset>) -> u8 {
    daypart_at(now).target_percent()
}

/// Compute the reading that follows `previous` at `now` for a given noise.
///
/// This is the whole simulation; [`CrowdSimulator::tick`] only adds the
/// noise draw. `updated_at` never moves backwards, even if the wall clock
/// does.
pub fn next_reading(
    previous: &CrowdReading,
    now: DateTime<FixedOffset>,
    noise: f64,
) -> CrowdReading {
    let target = f64::from(target_percent(&now));
    let current = f64::from(previous.percent.min(100));
    let raw = current + (target - current) * SMOOTHING_FACTOR + clamp_noise(noise);

    let updated_at = previous.updated_at.max(now.with_timezone(&Utc));
    CrowdReading::from_percent(round_percent(raw), updated_at)
}

/// Clamp to `[0, 100]` then round half away from zero.
// The clamped, rounded value always fits in a u8.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_percent(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// Applies the update step with noise drawn from a [`NoiseSource`].
#[derive(Debug, Clone)]
pub struct CrowdSimulator<N> {
    noise: N,
}

impl<N: NoiseSource> CrowdSimulator<N> {
    /// Create a simulator around a noise source.
    pub const fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Produce the next reading.
    pub fn tick(&mut self, previous: &CrowdReading, now: DateTime<FixedOffset>) -> CrowdReading {
        let noise = self.noise.sample();
        let next = next_reading(previous, now, noise);
        trace!(
            previous = previous.percent,
            percent = next.percent,
            daypart = daypart_at(&now).name(),
            noise,
            "crowd tick"
        );
        next
    }
}
