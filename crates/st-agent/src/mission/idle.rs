//! A parking spot for ships with nothing to do.

use crate::Services;
use crate::mission::{Mission, Roster};

/// Registers no trees, so every member runs the `Todo` placeholder.
pub struct IdleMission {
    services: Services,
    roster:   Roster,
}

impl IdleMission {
    pub fn new(services: Services) -> Self {
        Self { services, roster: Roster::new() }
    }
}

impl Mission for IdleMission {
    fn name(&self) -> &str {
        "idle"
    }

    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn services(&self) -> &Services {
        &self.services
    }
}
