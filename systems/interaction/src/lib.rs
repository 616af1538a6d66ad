#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Item pickups and key-gated doors.
//!
//! The system never mutates inventory itself. It reads the ledger snapshot,
//! decides which prompt to show, and asks the world to collect items or open
//! doors. The world stays the only authority on whether a key is spent.

use overworld_core::{
    Command, DoorPrompt, InputState, Inventory, ItemId, ObstacleView, Overlap, PlayerSnapshot,
    PlayerStatus, DOOR_INTERACTION_RADIUS,
};

/// Pure system routing pickups and door interactions to world commands.
#[derive(Debug, Default)]
pub struct Interaction {
    collected: Vec<ItemId>,
}

impl Interaction {
    /// Creates a new interaction system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits pickup and door commands for the current tick.
    ///
    /// Returns the prompt that should be displayed, if the player stands near
    /// a door that is still closed.
    pub fn handle(
        &mut self,
        input: &InputState,
        overlaps: &[Overlap],
        player: &PlayerSnapshot,
        inventory: Inventory,
        doors: &ObstacleView,
        out: &mut Vec<Command>,
    ) -> Option<DoorPrompt> {
        self.collected.clear();
        if player.status == PlayerStatus::Active {
            for overlap in overlaps {
                if let Overlap::PlayerItem { item } = *overlap {
                    if !self.collected.contains(&item) {
                        self.collected.push(item);
                        out.push(Command::CollectItem { item });
                    }
                }
            }
        }

        let mut available = inventory;
        let mut prompt = None;
        for (door, lock) in doors.doors() {
            if player.position.distance(door.position) >= DOOR_INTERACTION_RADIUS {
                continue;
            }

            let has_key = available.count_for(lock) > 0;
            if input.confirm && has_key && available.take_key(lock) {
                out.push(Command::OpenDoor { door: door.id });
                prompt = None;
            } else {
                prompt = Some(DoorPrompt::for_lock(lock, has_key));
            }
        }
        prompt
    }
}
