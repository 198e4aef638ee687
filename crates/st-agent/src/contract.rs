//! Contract wrapper.
//!
//! The remote API owns a contract; the fleet only mirrors it.  Every remote
//! response (accept, deliver, fulfill) carries the full contract and
//! replaces the mirror wholesale via [`Contract::replace`].

use st_api::{ContractData, DeliverTerm};
use st_core::{Timestamp, TradeSymbol};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    data: ContractData,
}

impl Contract {
    pub fn new(data: ContractData) -> Self {
        Self { data }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn data(&self) -> &ContractData {
        &self.data
    }

    pub fn terms(&self) -> &[DeliverTerm] {
        &self.data.terms.deliver
    }

    pub fn is_accepted(&self) -> bool {
        self.data.accepted
    }

    pub fn is_fulfilled(&self) -> bool {
        self.data.fulfilled
    }

    /// Accept deadline while unaccepted, delivery deadline afterwards.
    pub fn expiration(&self) -> Timestamp {
        if self.data.accepted {
            self.data.terms.deadline
        } else {
            self.data.deadline_to_accept.unwrap_or(self.data.terms.deadline)
        }
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiration() <= now
    }

    /// Not fulfilled and not expired.
    pub fn is_active(&self, now: Timestamp) -> bool {
        !self.data.fulfilled && !self.is_expired(now)
    }

    /// Total payout: on acceptance plus on fulfillment.
    pub fn revenue(&self) -> i64 {
        let p = &self.data.terms.payment;
        p.on_accepted + p.on_fulfilled
    }

    /// Every delivery term has `units_fulfilled >= units_required`.
    pub fn terms_met(&self) -> bool {
        self.terms().iter().all(|d| d.remaining() == 0)
    }

    /// Units of `good` still to deliver (0 if `good` is not a term).
    pub fn remaining(&self, good: &str) -> u32 {
        self.terms()
            .iter()
            .filter(|d| d.trade_symbol == good)
            .map(DeliverTerm::remaining)
            .sum()
    }

    /// First term with units still to deliver.
    pub fn first_open_term(&self) -> Option<&DeliverTerm> {
        self.terms().iter().find(|d| d.remaining() > 0)
    }

    pub fn goods(&self) -> Vec<TradeSymbol> {
        self.terms().iter().map(|d| d.trade_symbol.clone()).collect()
    }

    pub fn requires(&self, good: &str) -> bool {
        self.terms().iter().any(|d| d.trade_symbol == good)
    }

    /// Orders two views of the same contract: accepted first, then total
    /// units delivered.  A view never moves backwards on the remote side.
    pub fn progress(&self) -> (bool, u32) {
        (self.data.accepted, self.terms().iter().map(|d| d.units_fulfilled).sum())
    }

    /// Overwrite with a fresh remote snapshot.
    pub fn replace(&mut self, data: ContractData) {
        self.data = data;
    }
}

impl From<ContractData> for Contract {
    fn from(data: ContractData) -> Self {
        Self::new(data)
    }
}
