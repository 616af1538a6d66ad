use std::time::Duration;

use overworld_core::{Command, Direction, EnemyVariant, TransitionPhase};
use overworld_system_enemy_ai::EnemyAi;
use overworld_world::{self as world, query, spawn_tables::BOSS_ROOM, World};

const FRAME: Duration = Duration::from_micros(16_667);

fn step(world: &mut World, ai: &mut EnemyAi) -> Vec<Command> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);

    let mut commands = Vec::new();
    ai.handle(
        query::transition_phase(world),
        &query::enemy_view(world),
        &query::player(world),
        &mut commands,
    );
    for command in commands.iter().cloned() {
        world::apply(world, command, &mut events);
    }
    commands
}

#[test]
fn fresh_enemies_decide_on_the_first_tick() {
    let mut world = World::starting_in(overworld_core::RoomCoord::new(3, 3)).expect("room exists");
    let mut ai = EnemyAi::new(7);

    let commands = step(&mut world, &mut ai);

    assert_eq!(commands.len(), 4);
    for command in commands {
        match command {
            Command::SteerEnemy { move_timer, .. } => assert_eq!(move_timer, 60),
            other => panic!("unexpected command {other:?}"),
        }
    }
}

#[test]
fn timers_count_down_before_the_next_decision() {
    let mut world = World::starting_in(overworld_core::RoomCoord::new(2, 2)).expect("room exists");
    let mut ai = EnemyAi::new(7);

    let _ = step(&mut world, &mut ai);
    let heading = query::enemy_view(&world).into_vec()[0].facing;

    for expected in (1..60).rev() {
        let commands = step(&mut world, &mut ai);
        assert_eq!(
            commands,
            vec![Command::SteerEnemy {
                enemy: query::enemy_view(&world).into_vec()[0].id,
                direction: heading,
                move_timer: expected,
            }]
        );
    }

    let commands = step(&mut world, &mut ai);
    assert!(matches!(
        commands.as_slice(),
        [Command::SteerEnemy { move_timer: 60, .. }]
    ));
}

#[test]
fn the_boss_turns_toward_the_player() {
    let mut world = World::starting_in(BOSS_ROOM)
        .expect("boss room exists")
        .with_player_position(glam::Vec2::new(40.0, 120.0));
    let mut ai = EnemyAi::new(7);

    let _ = step(&mut world, &mut ai);

    let boss = query::enemy_view(&world)
        .iter()
        .find(|enemy| enemy.variant == EnemyVariant::Boss)
        .copied()
        .expect("boss spawned");
    assert_eq!(boss.facing, Direction::West);
    assert_eq!(boss.move_timer, 30);
}

#[test]
fn decisions_pause_during_transitions() {
    let world = World::starting_in(overworld_core::RoomCoord::new(3, 3)).expect("room exists");
    let mut ai = EnemyAi::new(7);
    let mut commands = Vec::new();

    ai.handle(
        TransitionPhase::Transitioning,
        &query::enemy_view(&world),
        &query::player(&world),
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn equal_seeds_replay_identically() {
    let run = |seed| {
        let mut world =
            World::starting_in(overworld_core::RoomCoord::new(3, 3)).expect("room exists");
        let mut ai = EnemyAi::new(seed);
        for _ in 0..600 {
            let _ = step(&mut world, &mut ai);
        }
        query::enemy_view(&world)
            .into_vec()
            .into_iter()
            .map(|enemy| (enemy.position.x.to_bits(), enemy.position.y.to_bits(), enemy.facing))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(11), run(11));
}
