use overworld_core::{DoorLock, Inventory, ItemKind};
use thiserror::Error;

/// Health restored by a potion.
pub const POTION_HEALING: u8 = 2;

/// Errors raised by the inventory ledger.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No key matching the lock is held.
    #[error("no key available for {lock:?} lock")]
    NoKey {
        /// Lock that could not be satisfied.
        lock: DoorLock,
    },
}

/// Effect of collecting an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pickup {
    /// A counter was incremented.
    Stocked,
    /// The player should regain health.
    Heal { amount: u8 },
}

/// World-global counters that persist across rooms.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Ledger {
    inventory: Inventory,
}

impl Ledger {
    pub(crate) fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }

    pub(crate) fn inventory(&self) -> Inventory {
        self.inventory
    }

    pub(crate) fn collect(&mut self, kind: ItemKind) -> Pickup {
        let counter = match kind {
            ItemKind::Key => &mut self.inventory.keys,
            ItemKind::Rupee => &mut self.inventory.rupees,
            ItemKind::Bomb => &mut self.inventory.bombs,
            ItemKind::BossKey => &mut self.inventory.boss_keys,
            ItemKind::Potion => {
                return Pickup::Heal {
                    amount: POTION_HEALING,
                }
            }
        };
        *counter = counter.saturating_add(1);
        Pickup::Stocked
    }

    /// Spends one key for `lock`, refusing when none is held.
    pub(crate) fn consume(&mut self, lock: DoorLock) -> Result<(), LedgerError> {
        if self.inventory.take_key(lock) {
            Ok(())
        } else {
            Err(LedgerError::NoKey { lock })
        }
    }
}
