//! End-to-end runs of the agent inside simulated worlds.
//!
//! These tests verify that the full loop works together:
//! - Every reachable tile ends up mapped and every reachable dirt is cleaned
//! - The agent returns Home and stays there
//! - The finished flag is monotone

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use vacuum_explorer::simulation::agent::{AgentMode, VacuumAgent};
use vacuum_explorer::simulation::config::{AgentConfig, WorldConfig};
use vacuum_explorer::simulation::environment::{Cell, VacuumWorld};
use vacuum_explorer::simulation::map::{GridCoord, TileState};
use vacuum_explorer::simulation::planning::Action;

const MAX_STEPS: u64 = 5_000;

const OFFICE: &str = "
    #########
    #...#..D#
    #.D.#.#.#
    #.....#.#
    ###.###.#
    #D......#
    #########
";

fn agent_for(world: &VacuumWorld, bootstrap_steps: u32, seed: u64) -> VacuumAgent {
    let config = AgentConfig::for_grid(world.width, world.height)
        .with_bootstrap_steps(bootstrap_steps)
        .with_seed(seed);
    VacuumAgent::new(&config).unwrap()
}

/// Floor tiles reachable from Home in the true world.
fn reachable_floor(world: &VacuumWorld) -> Vec<GridCoord> {
    let mut seen = vec![GridCoord::home()];
    let mut queue = VecDeque::from([GridCoord::home()]);
    while let Some(c) = queue.pop_front() {
        for n in c.neighbors() {
            if !world.is_wall(n) && !seen.contains(&n) {
                seen.push(n);
                queue.push_back(n);
            }
        }
    }
    seen
}

fn assert_explored(world: &VacuumWorld, agent: &VacuumAgent) {
    assert!(agent.is_done(), "agent did not finish: {agent:?}");
    assert_eq!(agent.pose().position, GridCoord::home());
    assert_eq!(agent.pose(), world.agent_pose(), "tracked pose drifted");
    for c in reachable_floor(world) {
        let tile = agent.map().get(c);
        assert!(
            matches!(tile, TileState::Clear | TileState::Home),
            "reachable tile {c} mapped as {tile:?}"
        );
        assert!(!world.cell(c).unwrap().is_dirty(), "dirt left at {c}");
        for n in c.neighbors() {
            if world.is_wall(n) {
                assert_eq!(agent.map().get(n), TileState::Wall, "wall {n} not mapped");
            }
        }
    }
}

#[test]
fn test_explores_office_and_returns_home() {
    let mut world = VacuumWorld::from_layout(OFFICE).unwrap();
    let mut agent = agent_for(&world, 0, 1);
    let dirt = world.dirt_remaining();

    let stats = world.run(&mut agent, MAX_STEPS);

    assert_explored(&world, &agent);
    assert_eq!(stats.cleaned as usize, dirt);
    assert_eq!(world.dirt_remaining(), 0);
}

#[test]
fn test_bootstrap_walk_keeps_pose_in_sync() {
    for seed in 0..8 {
        let mut world = VacuumWorld::from_layout(OFFICE).unwrap();
        let mut agent = agent_for(&world, 10, seed);

        for _ in 0..11 {
            assert_eq!(agent.mode(), AgentMode::Bootstrapping);
            world.step(&mut agent);
        }
        assert_eq!(agent.last_action(), Action::Suck);

        world.run(&mut agent, MAX_STEPS);
        assert_explored(&world, &agent);
    }
}

#[test]
fn test_finished_never_reverts() {
    let mut world = VacuumWorld::from_layout(OFFICE).unwrap();
    let mut agent = agent_for(&world, 0, 3);
    let mut seen_finished = false;
    for _ in 0..MAX_STEPS {
        world.step(&mut agent);
        if seen_finished {
            assert!(agent.is_finished());
        }
        seen_finished |= agent.is_finished();
        if agent.is_done() {
            break;
        }
    }
    assert!(seen_finished);
}

#[test]
fn test_not_done_until_home_path_drained() {
    let mut finished_away = 0;
    for seed in 0..32 {
        let mut world = VacuumWorld::from_layout(OFFICE).unwrap();
        let mut agent = agent_for(&world, 10, seed);

        let mut steps = 0;
        while !agent.is_finished() && steps < MAX_STEPS {
            world.step(&mut agent);
            steps += 1;
        }
        assert!(agent.is_finished());
        if agent.is_done() {
            // Finished while already standing at Home.
            assert!(agent.pose().is_home());
            continue;
        }
        finished_away += 1;

        while !agent.is_done() && steps < MAX_STEPS {
            assert!(
                !agent.path().is_empty()
                    || agent.pending_actions().count() > 0
                    || !agent.pose().is_home(),
                "agent idles at Home without reaching Done"
            );
            world.step(&mut agent);
            steps += 1;
        }
        assert!(agent.is_done());
        assert!(agent.pose().is_home());
        assert!(agent.path().is_empty());
        assert_eq!(agent.pending_actions().count(), 0);
        assert_eq!(world.step(&mut agent), Action::NoOp);
    }
    assert!(finished_away > 0, "no run finished away from Home");
}

#[test]
fn test_enclosed_region_stays_unknown() {
    let layout = "
        #######
        #..#..#
        #..#..#
        #######
    ";
    let mut world = VacuumWorld::from_layout(layout).unwrap();
    let mut agent = agent_for(&world, 0, 9);
    world.run(&mut agent, MAX_STEPS);
    assert_explored(&world, &agent);
    assert_eq!(agent.map().get(GridCoord::new(4, 1)), TileState::Unknown);
    assert_eq!(agent.map().get(GridCoord::new(5, 2)), TileState::Unknown);
}

#[test]
fn test_random_worlds_are_fully_explored() {
    let config = WorldConfig {
        width: 14,
        height: 9,
        dirt_density: 0.3,
        wall_density: 0.2,
        seed: None,
    };
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = VacuumWorld::random(&config, &mut rng);
        let mut agent = agent_for(&world, 10, seed);
        world.run(&mut agent, 20_000);
        assert_explored(&world, &agent);
    }
}

#[test]
fn test_iteration_limit_halts_agent() {
    let mut world = VacuumWorld::from_layout(OFFICE).unwrap();
    let config = AgentConfig::for_grid(world.width, world.height)
        .with_bootstrap_steps(0)
        .with_iteration_limit(15);
    let mut agent = VacuumAgent::new(&config).unwrap();
    let stats = world.run(&mut agent, 100);
    assert_eq!(stats.steps, 100);
    assert!(!agent.is_done());
    assert_eq!(agent.iterations_left(), 0);
    assert_eq!(world.step(&mut agent), Action::NoOp);
}

#[test]
fn test_dirty_world_cell_helper() {
    assert!(Cell::Floor { dirty: true }.is_dirty());
    assert!(!Cell::Wall.is_dirty());
}
