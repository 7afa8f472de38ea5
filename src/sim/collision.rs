//! Collision detection between the actor and obstacles
//!
//! Every box is anchored at its bottom-left corner: `pos.y` is the bottom
//! edge (on the ground line for grounded things) and the box extends upward
//! by `size.y`. Before testing overlap each box is shrunk inward by a
//! fractional margin on all sides, which forgives near-misses on sprite
//! corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleVariant};

/// Bottom-anchored bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Left edge x, bottom edge y
    pub pos: Vec2,
    /// Width, height
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(x: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, bottom),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Shrink inward by `margin` (fraction of each dimension) on every side
    ///
    /// Returns the shrunk box as top-left `min` / bottom-right `max` corners.
    pub fn shrink(&self, margin: f32) -> Aabb {
        let inset = self.size * margin;
        let min = Vec2::new(self.pos.x, self.top()) + inset;
        let extent = self.size * (1.0 - 2.0 * margin);
        Aabb {
            min,
            max: min + extent,
        }
    }
}

/// Axis-aligned box in screen space (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Strict overlap on both axes (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Shrink margins applied to each side of a collision pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub actor: f32,
    pub obstacle: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            actor: crate::consts::ACTOR_MARGIN,
            obstacle: crate::consts::OBSTACLE_MARGIN,
        }
    }
}

/// Test two boxes after shrinking each by its own margin
pub fn boxes_collide(a: &Hitbox, a_margin: f32, b: &Hitbox, b_margin: f32) -> bool {
    a.shrink(a_margin).overlaps(&b.shrink(b_margin))
}

/// The obstacle that ended a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Id of the obstacle that was hit
    pub obstacle_id: u32,
    /// Its variant (recorded as the killer)
    pub variant: ObstacleVariant,
    /// Its hitbox at the moment of impact
    pub hitbox: Hitbox,
}

/// Test the actor against every live obstacle in sequence order
///
/// Stops at the first obstacle that overlaps.
pub fn first_collision(actor: &Hitbox, obstacles: &[Obstacle], margins: Margins) -> Option<Collision> {
    let actor_box = actor.shrink(margins.actor);
    obstacles.iter().find_map(|obstacle| {
        let hitbox = obstacle.hitbox();
        actor_box
            .overlaps(&hitbox.shrink(margins.obstacle))
            .then(|| Collision {
                obstacle_id: obstacle.id,
                variant: obstacle.variant(),
                hitbox,
            })
    })
}
