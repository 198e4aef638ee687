//! Fleet configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! config file.  Sections are grouped by the subsystem that reads them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

// ── Planner ───────────────────────────────────────────────────────────────────

/// Cost model for the fuel-aware route planner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Fixed cost added to every drift hop.  Large enough that drifting is
    /// chosen only when no fuelled path exists.
    pub drift_penalty: u64,

    /// Credits charged per fuel block bought when refuelling.
    pub fuel_price_per_block: u64,

    /// Fuel units per purchasable block.  Markets sell fuel in 100-unit
    /// barrels.
    pub fuel_block_units: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            drift_penalty:        10_000,
            fuel_price_per_block: 72,
            fuel_block_units:     100,
        }
    }
}

// ── Control loop ──────────────────────────────────────────────────────────────

/// Sleep policy for each ship's control loop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Sleep between passes when neither an arrival nor a cooldown is pending.
    pub idle_interval_ms: u64,
    /// Lower bound on any sleep, so a just-expired timer cannot spin the loop.
    pub min_sleep_ms: u64,
    /// Upper bound on any sleep.
    pub max_sleep_ms: u64,
    /// Each loop waits a random `0..=startup_jitter_ms` before its first pass
    /// so a freshly started fleet does not burst the API rate limit.
    pub startup_jitter_ms: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            idle_interval_ms:  3_000,
            min_sleep_ms:      250,
            max_sleep_ms:      300_000,
            startup_jitter_ms: 3_000,
        }
    }
}

// ── Contracts ─────────────────────────────────────────────────────────────────

/// What `SetPurchaseFromContract` reports when no market exports the good.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingMarketPolicy {
    /// Report Failure so an enclosing Selector can try another branch.
    #[default]
    Fail,
    /// Report Running and look again next pass (the cache may fill in).
    Retry,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub missing_market: MissingMarketPolicy,
}

// ── Trading ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// Units bought per trade run.
    pub max_units_per_trade: u32,
    /// Market pairs with a smaller per-unit margin are ignored.
    pub min_gross_profit: i64,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self { max_units_per_trade: 20, min_gross_profit: 100 }
    }
}

// ── Extraction ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Goods jettisoned on sight even when some market imports them.
    pub jettison_always: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { jettison_always: vec!["QUARTZ_SAND".to_owned()] }
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Top-level configuration, typically loaded from a JSON file by the binary
/// and shared with every ship as an `Arc<FleetConfig>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub planner:    PlannerConfig,
    pub control:    ControlConfig,
    pub contract:   ContractConfig,
    pub trade:      TradeConfig,
    pub extraction: ExtractionConfig,
}

impl FleetConfig {
    /// Read and validate a JSON config file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let config: FleetConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the planner or control loop cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.planner.fuel_block_units == 0 {
            return Err(CoreError::Config("planner.fuel_block_units must be > 0".into()));
        }
        if self.control.min_sleep_ms > self.control.max_sleep_ms {
            return Err(CoreError::Config(format!(
                "control.min_sleep_ms ({}) exceeds control.max_sleep_ms ({})",
                self.control.min_sleep_ms, self.control.max_sleep_ms
            )));
        }
        if self.trade.max_units_per_trade == 0 {
            return Err(CoreError::Config("trade.max_units_per_trade must be > 0".into()));
        }
        Ok(())
    }
}
