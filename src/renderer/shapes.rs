//! Shape generation for debug overlays

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::Session;
use crate::sim::collision::Aabb;

/// Two triangles covering `min..max`
pub fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Horizontal line of the given thickness
pub fn line(y: f32, x0: f32, x1: f32, thickness: f32, color: [f32; 4]) -> [Vertex; 6] {
    quad(Vec2::new(x0, y), Vec2::new(x1, y + thickness), color)
}

fn aabb_quad(aabb: &Aabb, color: [f32; 4]) -> [Vertex; 6] {
    quad(aabb.min, aabb.max, color)
}

/// Shrunk collision boxes for the actor and every obstacle
///
/// Boxes involved in the collision that ended the run are highlighted.
pub fn hitbox_quads(session: &Session) -> Vec<Vertex> {
    let margins = session.margins;
    let actor = session.actor.hitbox().shrink(margins.actor);
    let mut vertices = Vec::with_capacity((session.field.len() + 1) * 6);

    let actor_color = if session.is_over() {
        colors::COLLISION
    } else {
        colors::ACTOR_HITBOX
    };
    vertices.extend(aabb_quad(&actor, actor_color));

    for obstacle in &session.field.obstacles {
        let shrunk = obstacle.hitbox().shrink(margins.obstacle);
        let color = if session.is_over() && shrunk.overlaps(&actor) {
            colors::COLLISION
        } else if obstacle.variant().is_aerial() {
            colors::BIRD_HITBOX
        } else {
            colors::CACTUS_HITBOX
        };
        vertices.extend(aabb_quad(&shrunk, color));
    }

    vertices
}
