//! Resolving a 2D pointer coordinate to the front-most eligible bead.

use glam::Vec2;

use crate::camera::{Camera, Viewport};
use crate::config::CLICK_RADIUS_SCALE;
use crate::registry::{Node, NodeId};

/// Pick the front-most bead under the pointer, if any.
///
/// Every bead is projected to screen space; beads with an invalid projection
/// (NaN position, behind the camera) or a depth outside \[0, 1\] are excluded
/// rather than treated as errors. A bead is a candidate when the planar
/// distance from the pointer is below `radius * CLICK_RADIUS_SCALE`; among
/// candidates the one with minimum depth wins.
pub fn pick(x: f32, y: f32, nodes: &[Node], camera: &Camera, viewport: Viewport) -> Option<NodeId> {
    let pointer = Vec2::new(x, y);
    let mut best: Option<(NodeId, f32)> = None;

    for node in nodes {
        let Some(screen) = camera.project_to_screen(node.position, viewport) else {
            continue;
        };
        if !(0.0..=1.0).contains(&screen.depth) {
            continue;
        }
        let d = pointer.distance(Vec2::new(screen.x, screen.y));
        if !d.is_finite() || d >= node.radius * CLICK_RADIUS_SCALE {
            continue;
        }
        match best {
            Some((_, best_depth)) if screen.depth >= best_depth => {}
            _ => best = Some((node.id, screen.depth)),
        }
    }

    best.map(|(id, _)| id)
}
