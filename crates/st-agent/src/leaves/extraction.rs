//! Mining leaves.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use st_behavior::Status;

use super::Leaf;
use crate::error::{LeafError, LeafResult};
use crate::{Blackboard, Role};

/// Extract once, steered by `bb.survey` when it is still valid.
///
/// Always `Running` on success: the cooldown that follows gates the next
/// pass, so the tree is re-walked after it expires.
pub struct Extract;

#[async_trait]
impl Leaf for Extract {
    const NAME: &'static str = "Extract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        if bb.ship.is_cargo_full() {
            return Err(LeafError::precondition("cargo hold is full"));
        }
        if bb.ship.in_cooldown() {
            return Ok(Status::Running);
        }
        bb.ship.orbit().await?;
        let now = Utc::now();
        let survey = bb.survey.as_ref().filter(|s| s.expiration > now);
        bb.ship.extract(survey).await?;
        Ok(Status::Running)
    }
}

/// Survey the current waypoint; results go to `bb.new_surveys`.
pub struct SurveyWaypoint;

#[async_trait]
impl Leaf for SurveyWaypoint {
    const NAME: &'static str = "SurveyWaypoint";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        if bb.ship.in_cooldown() {
            return Ok(Status::Running);
        }
        bb.ship.orbit().await?;
        let surveys = bb.ship.survey().await?;
        bb.new_surveys.extend(surveys);
        Ok(Status::Success)
    }
}

/// Hand the first held good to a mission hauler waiting at the extraction
/// waypoint.
///
/// `Failure` when no hauler is available; `Running` after a transfer so the
/// next pass re-checks the hold.
pub struct TransferCargoToNearbyTransport;

#[async_trait]
impl Leaf for TransferCargoToNearbyTransport {
    const NAME: &'static str = "TransferCargoToNearbyTransport";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let mission = bb.require_mission()?;
        let wp = bb.require_extraction_waypoint()?.clone();
        let me = bb.ship.clone();

        let mut candidates = mission.roster().ships(Role::Hauler);
        candidates.extend(mission.roster().ships(Role::Transporter));
        let receiver = candidates.into_iter().find(|t| {
            !Arc::ptr_eq(t, &me) && t.is_at(&wp) && !t.in_transit() && !t.is_cargo_full()
        });
        let Some(receiver) = receiver else {
            return Err(LeafError::precondition("no transport available"));
        };

        let Some(good) = me.inventory_symbols().into_iter().next() else {
            return Err(LeafError::precondition("nothing to transfer"));
        };
        let moved = receiver.receive_transfer(&me, &good, 0).await?;
        debug!(to = %receiver.symbol(), %good, units = moved, "handed over cargo");
        Ok(Status::Running)
    }
}
