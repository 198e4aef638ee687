//! Wall-clock helpers.
//!
//! The remote world has no tick: arrivals and cooldowns are absolute UTC
//! timestamps.  The control loop only ever asks "how long until X", so that
//! is the one conversion provided here.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// An absolute UTC instant as reported by the remote API.
pub type Timestamp = DateTime<Utc>;

/// Time left from `now` until `deadline`, or `None` if it has passed.
pub fn remaining(now: Timestamp, deadline: Timestamp) -> Option<Duration> {
    (deadline - now).to_std().ok().filter(|d| !d.is_zero())
}
