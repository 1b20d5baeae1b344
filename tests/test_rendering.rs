use vacuum_explorer::simulation::environment::VacuumWorld;
use vacuum_explorer::simulation::map::{GridCoord, GridMap, TileState};
use vacuum_explorer::simulation::pose::{AgentPose, Heading};
use vacuum_explorer::ui::field::{compute_map_grid, compute_world_grid};

#[test]
fn test_map_grid_computation() {
    let mut map = GridMap::new(5, 3);
    map.set(GridCoord::new(0, 1), TileState::Wall);
    map.set(GridCoord::new(3, 1), TileState::Dirt);
    let pose = AgentPose::new(GridCoord::new(2, 1), Heading::South);

    let grid = compute_map_grid(&map, &pose);

    assert_eq!(grid, vec!["?????", "#HvD?", "?????"]);
}

#[test]
fn test_world_grid_computation() {
    let mut world = VacuumWorld::from_layout("#####\n#..D#\n#####").unwrap();
    world.place_agent(GridCoord::new(2, 1), Heading::West);

    let grid = compute_world_grid(&world);

    assert_eq!(grid.len(), 3);
    assert_eq!(grid[1], "#H<D#");
    for row in grid {
        for c in row.chars() {
            assert!("#.DH^>v<".contains(c));
        }
    }
}
