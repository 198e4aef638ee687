//! The per-ship control loop.
//!
//! One tokio task per ship.  Each iteration runs one pass of the ship's
//! mission tree, then sleeps until the next moment something can change:
//!
//! ```text
//! jitter ─► ┌─ mission? ── run_pass ─┐
//!           │                        ▼
//!           └──── sleep(next_wake) ◄─┘   (exits when shutdown flips)
//! ```
//!
//! Passes of one ship never overlap.  Nothing orders passes across ships.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::sync::watch;
use tracing::{debug, info, trace};

use st_api::{NavStatus, ShipSnapshot};
use st_core::{ControlConfig, FleetConfig, Timestamp, remaining};

use crate::Ship;
use crate::mission::run_pass;

/// How long to sleep after a pass.
///
/// The sooner of a pending arrival and a pending cooldown expiry, or
/// `idle_interval_ms` when neither is pending; always clamped to
/// `[min_sleep_ms, max_sleep_ms]`.
pub fn next_wake(state: &ShipSnapshot, now: Timestamp, cfg: &ControlConfig) -> Duration {
    let arrival = (state.nav.status == NavStatus::InTransit)
        .then(|| remaining(now, state.nav.route.arrival))
        .flatten();
    let cooldown = state.cooldown.expiration.and_then(|exp| remaining(now, exp));

    let wait = match (arrival, cooldown) {
        (Some(a), Some(c)) => a.min(c),
        (Some(d), None) | (None, Some(d)) => d,
        (None, None) => Duration::from_millis(cfg.idle_interval_ms),
    };
    let lo = Duration::from_millis(cfg.min_sleep_ms);
    let hi = Duration::from_millis(cfg.max_sleep_ms.max(cfg.min_sleep_ms));
    wait.clamp(lo, hi)
}

impl Ship {
    /// Drive this ship until `shutdown` becomes `true` (or its sender is
    /// dropped).
    pub async fn run(self: Arc<Self>, config: Arc<FleetConfig>, mut shutdown: watch::Receiver<bool>) {
        let cfg = &config.control;
        let jitter = match cfg.startup_jitter_ms {
            0 => 0,
            max => rand::thread_rng().gen_range(0..=max),
        };
        info!(ship = %self.symbol(), jitter_ms = jitter, "control loop starting");
        if !pause(Duration::from_millis(jitter), &mut shutdown).await {
            return;
        }

        loop {
            match self.mission() {
                Some(mission) => {
                    run_pass(&mission, &self).await;
                }
                None => debug!(ship = %self.symbol(), "idle: no mission"),
            }

            let wait = next_wake(&self.snapshot(), Utc::now(), cfg);
            trace!(ship = %self.symbol(), ?wait, "sleeping");
            if !pause(wait, &mut shutdown).await {
                break;
            }
        }
        info!(ship = %self.symbol(), "control loop stopped");
    }
}

/// Sleep for `wait`.  `false` if shutdown was requested meanwhile.
async fn pause(wait: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return false;
    }
    tokio::select! {
        _ = tokio::time::sleep(wait) => !*shutdown.borrow(),
        changed = shutdown.changed() => changed.is_ok() && !*shutdown.borrow(),
    }
}
