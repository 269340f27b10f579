//! The tagged action registry a unit carries
//!
//! One instance per ability per unit, dispatched by pattern matching instead
//! of runtime type queries.

use serde::{Deserialize, Serialize};

use crate::actions::elevation::ElevationAction;
use crate::actions::kind::{ActionKind, ActionUsage};
use crate::actions::melee::MeleeAction;
use crate::actions::move_action::MoveAction;
use crate::actions::push::PushAction;
use crate::actions::ranged::RangedAction;
use crate::actions::ritual::{FavorAction, SpecialAction};
use crate::actions::spawn::SpawnAction;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionInstance {
    Move(MoveAction),
    Melee(MeleeAction),
    Ranged(RangedAction),
    Push(PushAction),
    Spawn(SpawnAction),
    Favor(FavorAction),
    Special(SpecialAction),
    Elevation(ElevationAction),
}

impl ActionInstance {
    pub fn new(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Move => ActionInstance::Move(MoveAction::default()),
            ActionKind::Melee => ActionInstance::Melee(MeleeAction::default()),
            ActionKind::Ranged => ActionInstance::Ranged(RangedAction::default()),
            ActionKind::Push => ActionInstance::Push(PushAction::default()),
            ActionKind::Spawn => ActionInstance::Spawn(SpawnAction::default()),
            ActionKind::Favor => ActionInstance::Favor(FavorAction::default()),
            ActionKind::Special => ActionInstance::Special(SpecialAction::default()),
            ActionKind::Elevation => ActionInstance::Elevation(ElevationAction::default()),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionInstance::Move(_) => ActionKind::Move,
            ActionInstance::Melee(_) => ActionKind::Melee,
            ActionInstance::Ranged(_) => ActionKind::Ranged,
            ActionInstance::Push(_) => ActionKind::Push,
            ActionInstance::Spawn(_) => ActionKind::Spawn,
            ActionInstance::Favor(_) => ActionKind::Favor,
            ActionInstance::Special(_) => ActionKind::Special,
            ActionInstance::Elevation(_) => ActionKind::Elevation,
        }
    }

    pub fn usage(&self) -> ActionUsage {
        self.kind().usage()
    }

    pub fn is_active(&self) -> bool {
        match self {
            ActionInstance::Move(a) => a.is_active,
            ActionInstance::Melee(a) => a.is_active,
            ActionInstance::Ranged(a) => a.is_active,
            ActionInstance::Push(a) => a.is_active,
            ActionInstance::Spawn(a) => a.is_active,
            ActionInstance::Favor(a) => a.is_active,
            ActionInstance::Special(a) => a.is_active,
            ActionInstance::Elevation(a) => a.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matches_kind() {
        for kind in [
            ActionKind::Move,
            ActionKind::Melee,
            ActionKind::Ranged,
            ActionKind::Push,
            ActionKind::Spawn,
            ActionKind::Favor,
            ActionKind::Special,
            ActionKind::Elevation,
        ] {
            let instance = ActionInstance::new(kind);
            assert_eq!(instance.kind(), kind);
            assert!(!instance.is_active());
        }
    }
}
