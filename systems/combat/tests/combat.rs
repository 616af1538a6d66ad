use std::time::Duration;

use glam::Vec2;
use overworld_core::{
    Command, EnemyId, EnemyVariant, Event, ItemKind, Overlap, PlayerStatus, RoomCoord,
};
use overworld_system_combat::Combat;
use overworld_world::{self as world, query, spawn_tables::BOSS_ROOM, World};

fn pump(world: &mut World, combat: &mut Combat, commands: Vec<Command>) -> Vec<Event> {
    let mut log = Vec::new();
    let mut pending = commands;
    while !pending.is_empty() {
        let mut events = Vec::new();
        for command in pending.drain(..) {
            world::apply(world, command, &mut events);
        }
        combat.handle_events(&events, &mut pending);
        log.extend(events);
    }
    log
}

fn overlaps(world: &World, combat: &Combat, overlaps: &[Overlap]) -> Vec<Command> {
    let mut commands = Vec::new();
    combat.handle_overlaps(
        overlaps,
        &query::player(world),
        &query::sword(world),
        &mut commands,
    );
    commands
}

#[test]
fn sword_overlaps_only_strike_while_swinging() {
    let world = World::starting_in(RoomCoord::new(2, 2)).expect("room exists");
    let combat = Combat::new(1);
    let enemy = query::enemy_view(&world).into_vec()[0].id;

    assert!(overlaps(&world, &combat, &[Overlap::SwordEnemy { enemy }]).is_empty());

    let mut world = world;
    let mut events = Vec::new();
    world::apply(&mut world, Command::SwingSword, &mut events);
    assert_eq!(
        overlaps(&world, &combat, &[Overlap::SwordEnemy { enemy }]),
        vec![Command::StrikeEnemy { enemy }]
    );
}

#[test]
fn contact_damage_is_applied_once_per_tick() {
    let world = World::starting_in(RoomCoord::new(3, 3)).expect("room exists");
    let combat = Combat::new(1);
    let enemies: Vec<EnemyId> = query::enemy_view(&world).iter().map(|enemy| enemy.id).collect();
    let contacts: Vec<Overlap> = enemies
        .iter()
        .map(|&enemy| Overlap::PlayerEnemy { enemy })
        .collect();

    assert_eq!(
        overlaps(&world, &combat, &contacts),
        vec![Command::DamagePlayer { enemy: enemies[0] }]
    );
}

#[test]
fn invulnerable_players_take_no_contact_damage() {
    let mut world = World::starting_in(RoomCoord::new(2, 2)).expect("room exists");
    let mut combat = Combat::new(1);
    let enemy = query::enemy_view(&world).into_vec()[0].id;

    let first = overlaps(&world, &combat, &[Overlap::PlayerEnemy { enemy }]);
    let _ = pump(&mut world, &mut combat, first);
    assert_eq!(query::player(&world).health, 5);

    assert!(overlaps(&world, &combat, &[Overlap::PlayerEnemy { enemy }]).is_empty());
}

#[test]
fn ten_strikes_defeat_the_boss_and_drop_one_boss_key() {
    let mut world = World::starting_in(BOSS_ROOM).expect("boss room exists");
    let mut combat = Combat::new(1);
    let boss = query::enemy_view(&world)
        .iter()
        .find(|enemy| enemy.variant == EnemyVariant::Boss)
        .copied()
        .expect("boss spawned");

    let mut events = Vec::new();
    world::apply(&mut world, Command::SwingSword, &mut events);

    let mut log = Vec::new();
    for _ in 0..EnemyVariant::Boss.max_health() {
        let commands = overlaps(&world, &combat, &[Overlap::SwordEnemy { enemy: boss.id }]);
        log.extend(pump(&mut world, &mut combat, commands));
    }

    assert!(query::progress(&world).boss_defeated);
    assert!(log.contains(&Event::BossDefeated {
        position: boss.position
    }));
    assert!(query::enemy_view(&world)
        .iter()
        .all(|enemy| enemy.variant != EnemyVariant::Boss));

    let keys: Vec<Vec2> = query::item_view(&world)
        .iter()
        .filter(|item| item.kind == ItemKind::BossKey)
        .map(|item| item.position)
        .collect();
    assert_eq!(keys, vec![boss.position]);
    assert!(query::victory_banner_visible(&world));
}

#[test]
fn loot_rolls_stay_near_the_drop_chance() {
    let mut combat = Combat::new(99);
    let mut commands = Vec::new();
    let defeats: Vec<Event> = (0..1000)
        .map(|index| Event::EnemyDefeated {
            enemy: EnemyId::new(index),
            variant: EnemyVariant::Normal,
            position: Vec2::new(64.0, 64.0),
        })
        .collect();

    combat.handle_events(&defeats, &mut commands);

    assert!((200..=400).contains(&commands.len()), "{} drops", commands.len());
    for command in &commands {
        assert!(matches!(
            command,
            Command::SpawnItem {
                kind: ItemKind::Rupee | ItemKind::Potion,
                ..
            }
        ));
    }
}

#[test]
fn defeated_players_ignore_contact() {
    let mut world = World::starting_in(RoomCoord::new(2, 2)).expect("room exists");
    let mut combat = Combat::new(1);
    let enemy = query::enemy_view(&world).into_vec()[0].id;

    for _ in 0..6 {
        let commands = overlaps(&world, &combat, &[Overlap::PlayerEnemy { enemy }]);
        let _ = pump(&mut world, &mut combat, commands);
        for _ in 0..61 {
            let mut events = Vec::new();
            world::apply(
                &mut world,
                Command::Tick {
                    dt: Duration::from_micros(16_667),
                },
                &mut events,
            );
        }
    }

    assert_eq!(query::player(&world).status, PlayerStatus::Defeated);
    assert!(overlaps(&world, &combat, &[Overlap::PlayerEnemy { enemy }]).is_empty());
}
