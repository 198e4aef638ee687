//! Which ship plays which role, and the tree each role runs.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use st_behavior::Node;
use st_core::ShipSymbol;

use crate::leaves::{Todo, leaf};
use crate::mission::Role;
use crate::{Blackboard, Ship};

/// Role → tree table plus the ship assignments of one mission.
///
/// A ship holds at most one role; assigning it again moves it.  Trees are
/// registered at construction and shared by every ship in the role.
#[derive(Default)]
pub struct Roster {
    behaviors: FxHashMap<Role, Node<Blackboard>>,
    members:   RwLock<FxHashMap<ShipSymbol, (Role, Arc<Ship>)>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(mut self, role: Role, tree: Node<Blackboard>) -> Self {
        self.set_behavior(role, tree);
        self
    }

    pub fn set_behavior(&mut self, role: Role, tree: Node<Blackboard>) {
        self.behaviors.insert(role, tree);
    }

    pub fn has_behavior(&self, role: Role) -> bool {
        self.behaviors.contains_key(&role)
    }

    /// Put `ship` in `role`, leaving any role it held before.
    pub fn assign(&self, role: Role, ship: Arc<Ship>) {
        self.members.write().insert(ship.symbol().clone(), (role, ship));
    }

    pub fn unassign(&self, symbol: &ShipSymbol) -> Option<Arc<Ship>> {
        self.members.write().remove(symbol).map(|(_, ship)| ship)
    }

    pub fn role_of(&self, symbol: &ShipSymbol) -> Option<Role> {
        self.members.read().get(symbol).map(|(role, _)| *role)
    }

    /// Ships in `role`, ordered by symbol.
    pub fn ships(&self, role: Role) -> Vec<Arc<Ship>> {
        let mut out: Vec<Arc<Ship>> = self
            .members
            .read()
            .values()
            .filter(|(r, _)| *r == role)
            .map(|(_, ship)| ship.clone())
            .collect();
        out.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        out
    }

    /// Every member, ordered by symbol.
    pub fn members(&self) -> Vec<(Role, Arc<Ship>)> {
        let mut out: Vec<_> = self.members.read().values().cloned().collect();
        out.sort_by(|a, b| a.1.symbol().cmp(b.1.symbol()));
        out
    }

    /// The tree for `symbol`'s role.  Unassigned ships and roles without a
    /// tree get a placeholder that only reports `Running`.
    pub fn behavior_for(&self, symbol: &ShipSymbol) -> Node<Blackboard> {
        self.role_of(symbol)
            .and_then(|role| self.behaviors.get(&role).cloned())
            .unwrap_or_else(|| leaf(Todo("no behavior for role")))
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }
}
