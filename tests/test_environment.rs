use vacuum_explorer::simulation::agent::{Percept, VacuumAgent};
use vacuum_explorer::simulation::config::{AgentConfig, WorldConfig};
use vacuum_explorer::simulation::environment::{Cell, VacuumWorld};
use vacuum_explorer::simulation::map::GridCoord;
use vacuum_explorer::simulation::planning::Action;
use vacuum_explorer::simulation::pose::Heading;

const CORRIDOR: &str = "
    ######
    #..D.#
    ######
";

#[test]
fn test_world_initialization() {
    let world = VacuumWorld::from_layout(CORRIDOR).unwrap();
    assert_eq!(world.width, 6);
    assert_eq!(world.height, 3);
    assert_eq!(world.dirt_remaining(), 1);
    assert_eq!(world.stats().steps, 0);
    assert_eq!(world.percept(), Percept::new(false, false, true));
}

#[test]
fn test_forward_moves_and_reports_dirt() {
    let mut world = VacuumWorld::from_layout(CORRIDOR).unwrap();
    world.apply(Action::Forward);
    world.apply(Action::Forward);
    assert_eq!(world.agent_pose().position, GridCoord::new(3, 1));
    assert_eq!(world.percept(), Percept::new(false, true, false));
    assert_eq!(world.stats().steps, 2);
}

#[test]
fn test_turns_do_not_move() {
    let mut world = VacuumWorld::from_layout(CORRIDOR).unwrap();
    world.apply(Action::TurnRight);
    assert_eq!(world.agent_pose().heading, Heading::South);
    world.apply(Action::TurnLeft);
    world.apply(Action::TurnLeft);
    assert_eq!(world.agent_pose().heading, Heading::North);
    assert_eq!(world.agent_pose().position, GridCoord::home());
}

#[test]
fn test_suck_on_clean_floor_counts_nothing() {
    let mut world = VacuumWorld::from_layout(CORRIDOR).unwrap();
    world.apply(Action::Suck);
    assert_eq!(world.stats().cleaned, 0);
    assert_eq!(world.stats().steps, 1);
}

#[test]
fn test_step_feeds_agent() {
    let mut world = VacuumWorld::from_layout(CORRIDOR).unwrap();
    let mut agent =
        VacuumAgent::new(&AgentConfig::for_grid(6, 3).with_bootstrap_steps(0)).unwrap();
    let action = world.step(&mut agent);
    assert_eq!(action, Action::Forward);
    assert_eq!(world.agent_pose().position, GridCoord::new(2, 1));
}

#[test]
fn test_random_world_respects_densities() {
    let mut rng = rand::rng();
    let empty = WorldConfig {
        width: 10,
        height: 7,
        dirt_density: 0.0,
        wall_density: 0.0,
        seed: None,
    };
    let world = VacuumWorld::random(&empty, &mut rng);
    assert_eq!(world.dirt_remaining(), 0);
    for y in 1..6 {
        for x in 1..9 {
            assert_eq!(
                world.cell(GridCoord::new(x, y)),
                Some(Cell::Floor { dirty: false })
            );
        }
    }

    let filthy = WorldConfig {
        dirt_density: 1.0,
        ..empty
    };
    let world = VacuumWorld::random(&filthy, &mut rng);
    // Every interior tile but Home is dirty.
    assert_eq!(world.dirt_remaining(), 8 * 5 - 1);
}

#[test]
#[should_panic(expected = "wall")]
fn test_cannot_place_agent_in_wall() {
    let mut world = VacuumWorld::from_layout(CORRIDOR).unwrap();
    world.place_agent(GridCoord::new(0, 0), Heading::North);
}
