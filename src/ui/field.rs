use rayon::prelude::*;

use crate::simulation::environment::VacuumWorld;
use crate::simulation::map::{GridCoord, GridMap};
use crate::simulation::pose::AgentPose;

/// Rasterises the believed map, one string per row, with the agent drawn
/// as a heading arrow.
#[must_use]
pub fn compute_map_grid(map: &GridMap, pose: &AgentPose) -> Vec<String> {
    let (_, height) = map.dimensions();

    // Rows are independent; build them in parallel
    (0..height)
        .into_par_iter()
        .map(|y| {
            map.row(y)
                .enumerate()
                .map(|(x, tile)| {
                    if GridCoord::new(x as i32, y as i32) == pose.position {
                        pose.heading.glyph()
                    } else {
                        tile.glyph()
                    }
                })
                .collect::<String>()
        })
        .collect()
}

/// Rasterises the ground truth the same way, with Home marked `H`.
#[must_use]
pub fn compute_world_grid(world: &VacuumWorld) -> Vec<String> {
    let pose = *world.agent_pose();
    (0..world.height)
        .into_par_iter()
        .map(|y| {
            world
                .row(y)
                .enumerate()
                .map(|(x, cell)| {
                    let here = GridCoord::new(x as i32, y as i32);
                    if here == pose.position {
                        pose.heading.glyph()
                    } else if here == GridCoord::home() {
                        'H'
                    } else {
                        cell.glyph()
                    }
                })
                .collect::<String>()
        })
        .collect()
}
