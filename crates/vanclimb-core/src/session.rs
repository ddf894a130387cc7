//! A crowd simulation scoped to one view.
//!
//! [`CrowdSession`] owns a periodic tokio task that replaces the current
//! reading once per tick. Readers get snapshots through a
//! [`watch`] channel, so each one sees either the old or the new reading
//! and never a partial update.
//!
//! The task lives exactly as long as the session value: dropping the
//! session aborts it, on every exit path. Each view creates its own
//! session; nothing here is process-global.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};
use uuid::Uuid;
use vanclimb_types::CrowdReading;

use crate::clock::WallClock;
use crate::config::CrowdConfig;
use crate::crowd::{CrowdSimulator, NoiseSource, UniformNoise};

/// Errors that can occur when starting or stopping a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A zero tick period would spin the task.
    #[error("tick period must be greater than zero")]
    ZeroPeriod,

    /// The tick task ended abnormally.
    #[error("crowd tick task failed: {message}")]
    Join {
        /// Description of the failure.
        message: String,
    },
}

/// A running crowd simulation owned by one view.
#[derive(Debug)]
pub struct CrowdSession {
    id: Uuid,
    period: Duration,
    readings: watch::Receiver<CrowdReading>,
    task: Option<JoinHandle<()>>,
}

impl CrowdSession {
    /// Start a session that ticks every `period`.
    ///
    /// The session starts from [`CrowdReading::seed`]; the first update
    /// lands one full period later. Must be called from within a tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ZeroPeriod`] if `period` is zero.
    pub fn spawn<C, N>(period: Duration, clock: C, noise: N) -> Result<Self, SessionError>
    where
        C: WallClock + 'static,
        N: NoiseSource + Send + 'static,
    {
        let seed = CrowdReading::seed(clock.now().with_timezone(&Utc));
        Self::spawn_from(period, clock, noise, seed)
    }

    /// Start a session from an explicit first reading.
    ///
    /// Used when a view reconnects and already shows a reading, so the
    /// gauge carries on from there instead of jumping back to the seed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ZeroPeriod`] if `period` is zero.
    pub fn spawn_from<C, N>(
        period: Duration,
        clock: C,
        noise: N,
        start: CrowdReading,
    ) -> Result<Self, SessionError>
    where
        C: WallClock + 'static,
        N: NoiseSource + Send + 'static,
    {
        if period.is_zero() {
            return Err(SessionError::ZeroPeriod);
        }

        let id = Uuid::now_v7();
        let (tx, readings) = watch::channel(start);
        let task = tokio::spawn(run_ticks(id, period, clock, CrowdSimulator::new(noise), tx));

        debug!(
            session_id = %id,
            period_ms = period.as_millis(),
            start_percent = start.percent,
            "crowd session started"
        );

        Ok(Self {
            id,
            period,
            readings,
            task: Some(task),
        })
    }

    /// Start a session from configuration, with uniform noise seeded from
    /// `crowd.noise_seed` when set.
    ///
    /// With `resume_percent` the session continues from that percentage
    /// (clamped to 100) instead of the seed reading.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ZeroPeriod`] if the configured tick interval
    /// is zero.
    pub fn from_config<C>(
        config: &CrowdConfig,
        clock: C,
        resume_percent: Option<u8>,
    ) -> Result<Self, SessionError>
    where
        C: WallClock + 'static,
    {
        let noise = UniformNoise::from_seed_option(config.noise_seed);
        match resume_percent {
            Some(percent) => {
                let start = CrowdReading::from_percent(percent, clock.now().with_timezone(&Utc));
                Self::spawn_from(config.tick_interval(), clock, noise, start)
            }
            None => Self::spawn(config.tick_interval(), clock, noise),
        }
    }

    /// Session identifier, for log correlation.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The tick period.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// The latest complete reading.
    pub fn current(&self) -> CrowdReading {
        *self.readings.borrow()
    }

    /// A receiver that is notified whenever the reading is replaced.
    pub fn subscribe(&self) -> watch::Receiver<CrowdReading> {
        self.readings.clone()
    }

    /// Whether the tick task is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the tick task and wait for it to wind down.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Join`] if the task panicked before it could
    /// be cancelled.
    pub async fn shutdown(mut self) -> Result<(), SessionError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        task.abort();
        let result = match task.await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(SessionError::Join {
                message: e.to_string(),
            }),
        };
        debug!(session_id = %self.id, "crowd session shut down");
        result
    }
}

impl Drop for CrowdSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(session_id = %self.id, "crowd session released");
        }
    }
}

/// Tick loop: one writer replacing the reading on a fixed period.
async fn run_ticks<C, N>(
    id: Uuid,
    period: Duration,
    clock: C,
    mut simulator: CrowdSimulator<N>,
    tx: watch::Sender<CrowdReading>,
) where
    C: WallClock,
    N: NoiseSource,
{
    let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let previous = *tx.borrow();
        let next = simulator.tick(&previous, clock.now());
        trace!(session_id = %id, percent = next.percent, count = next.count, "crowd reading");
        if tx.send(next).is_err() {
            // Every receiver is gone, including the session's own.
            debug!(session_id = %id, "no readers left, stopping crowd ticks");
            return;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone};

    use super::*;
    use crate::clock::FixedClock;
    use crate::crowd::FixedNoise;

    const PERIOD: Duration = Duration::from_millis(2500);

    fn evening() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 2, 3, 18, 0, 0)
            .unwrap()
    }

    fn deterministic_session() -> CrowdSession {
        CrowdSession::spawn(PERIOD, FixedClock::new(evening()), FixedNoise::zero()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn starts_from_seed() {
        let session = deterministic_session();
        let reading = session.current();
        assert_eq!(reading.percent, 42);
        assert_eq!(reading.count, 85);
        assert_eq!(reading.capacity, 200);
        assert!(session.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn first_update_after_one_period() {
        let session = deterministic_session();
        let mut rx = session.subscribe();
        let started = Instant::now();

        rx.changed().await.unwrap();
        assert!(started.elapsed() >= PERIOD);

        let reading = *rx.borrow_and_update();
        // 42 + (78 - 42) * 0.1 = 45.6
        assert_eq!(reading.percent, 46);
        assert_eq!(reading.count, 92);
        assert_eq!(session.current(), reading);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_ticking_toward_target() {
        let session = deterministic_session();
        let mut rx = session.subscribe();
        let mut last = session.current().percent;
        for _ in 0..10 {
            rx.changed().await.unwrap();
            let reading = *rx.borrow_and_update();
            assert!(reading.percent >= last);
            assert!(reading.percent <= 78);
            assert!(reading.is_consistent());
            last = reading.percent;
        }
        assert!(last > 42);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_changes_before_the_period_elapses() {
        let session = deterministic_session();
        let rx = session.subscribe();
        tokio::time::sleep(PERIOD.checked_sub(Duration::from_millis(1)).unwrap()).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(session.current().percent, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_releases_the_timer() {
        let session = deterministic_session();
        let mut rx = session.subscribe();
        drop(session);
        // The sender lives in the aborted task; once it is gone the
        // receiver reports the channel as closed.
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_is_clean() {
        let session = deterministic_session();
        let mut rx = session.subscribe();
        session.shutdown().await.unwrap();
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_are_independent() {
        let first = deterministic_session();
        let second = deterministic_session();
        assert_ne!(first.id(), second.id());

        let mut second_rx = second.subscribe();
        drop(first);

        second_rx.changed().await.unwrap();
        assert_eq!(second_rx.borrow_and_update().percent, 46);
        assert!(second.is_running());
    }

    #[tokio::test]
    async fn zero_period_is_rejected() {
        let clock = FixedClock::new(evening());
        let err = CrowdSession::spawn(Duration::ZERO, clock, FixedNoise::zero()).unwrap_err();
        assert!(matches!(err, SessionError::ZeroPeriod));
    }

    #[tokio::test(start_paused = true)]
    async fn from_config_uses_configured_period() {
        let config = CrowdConfig {
            tick_interval_ms: 1000,
            noise_seed: Some(5),
            utc_offset_minutes: None,
        };
        let session = CrowdSession::from_config(&config, FixedClock::new(evening()), None).unwrap();
        assert_eq!(session.period(), Duration::from_millis(1000));

        let mut rx = session.subscribe();
        let started = Instant::now();
        rx.changed().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert!(rx.borrow().is_consistent());
    }

    #[tokio::test(start_paused = true)]
    async fn resumed_session_continues_from_given_percent() {
        let config = CrowdConfig {
            noise_seed: Some(3),
            ..CrowdConfig::default()
        };
        let session =
            CrowdSession::from_config(&config, FixedClock::new(evening()), Some(78)).unwrap();
        let start = session.current();
        assert_eq!(start.percent, 78);
        assert_eq!(start.count, 156);

        let mut rx = session.subscribe();
        rx.changed().await.unwrap();
        let next = *rx.borrow_and_update();
        // Evening target is 78, so only the noise moves the gauge.
        assert!(next.percent.abs_diff(78) <= 5);
        assert!(next.is_consistent());
    }

    #[tokio::test(start_paused = true)]
    async fn resume_percent_is_clamped() {
        let start = CrowdReading::from_percent(250, evening().with_timezone(&Utc));
        let session =
            CrowdSession::spawn_from(PERIOD, FixedClock::new(evening()), FixedNoise::zero(), start)
                .unwrap();
        assert_eq!(session.current().percent, 100);
        assert_eq!(session.current().count, 200);
    }
}
