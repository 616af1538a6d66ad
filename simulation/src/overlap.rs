//! Reference overlap collaborator built from world queries.

use overworld_core::{Overlap, PlayerStatus};
use overworld_world::{query, World};

/// Collects every overlap between the player, the sword, enemies and items.
///
/// Sword overlaps are only reported while the sword is active. A defeated
/// player produces no contact or pickup overlaps.
#[must_use]
pub fn detect(world: &World) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    let player = query::player(world);
    let sword = query::sword(world);
    let enemies = query::enemy_view(world);

    if sword.active {
        let blade = sword.bounds();
        overlaps.extend(
            enemies
                .iter()
                .filter(|enemy| blade.intersects(&enemy.bounds()))
                .map(|enemy| Overlap::SwordEnemy { enemy: enemy.id }),
        );
    }

    if player.status == PlayerStatus::Defeated {
        return overlaps;
    }

    let body = player.bounds();
    overlaps.extend(
        enemies
            .iter()
            .filter(|enemy| body.intersects(&enemy.bounds()))
            .map(|enemy| Overlap::PlayerEnemy { enemy: enemy.id }),
    );
    overlaps.extend(
        query::item_view(world)
            .iter()
            .filter(|item| body.intersects(&item.bounds()))
            .map(|item| Overlap::PlayerItem { item: item.id }),
    );
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use overworld_core::{Command, RoomCoord};
    use overworld_world::{self as world, spawn_tables::BOSS_ROOM};

    #[test]
    fn idle_sword_reports_nothing() {
        let world = World::starting_in(BOSS_ROOM).expect("boss room exists");
        let overlaps = detect(&world);

        assert!(overlaps
            .iter()
            .all(|overlap| !matches!(overlap, Overlap::SwordEnemy { .. })));
        assert!(overlaps
            .iter()
            .any(|overlap| matches!(overlap, Overlap::PlayerEnemy { .. })));
    }

    #[test]
    fn swung_sword_reaches_the_boss() {
        let mut world = World::starting_in(BOSS_ROOM).expect("boss room exists");
        let mut events = Vec::new();
        world::apply(&mut world, Command::SwingSword, &mut events);

        assert!(detect(&world)
            .iter()
            .any(|overlap| matches!(overlap, Overlap::SwordEnemy { .. })));
    }

    #[test]
    fn standing_on_an_item_reports_a_pickup() {
        let world = World::starting_in(RoomCoord::new(0, 0))
            .expect("room exists")
            .with_player_position(Vec2::new(160.0, 140.0));

        assert_eq!(detect(&world).len(), 1);
        assert!(matches!(detect(&world)[0], Overlap::PlayerItem { .. }));
    }
}
