//! Render frame capture
//!
//! The simulation never draws. Each frame the host captures a `RenderFrame`
//! (plain geometry plus sprite selectors) and draws it however it likes.

pub mod shapes;
pub mod vertex;

use serde::Serialize;

use crate::sim::{ObstacleVariant, Session};
pub use vertex::Vertex;

/// Which actor sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorPose {
    /// Running on the ground, alternating legs
    Running { frame: usize },
    Ducking { frame: usize },
    /// In the air (single sprite)
    Airborne,
}

impl ActorPose {
    /// Sprite sheet index: running frames, then ducking frames, then airborne
    pub fn sprite_index(&self, frames_per_cycle: usize) -> u32 {
        let index = match *self {
            ActorPose::Running { frame } => frame,
            ActorPose::Ducking { frame } => frames_per_cycle + frame,
            ActorPose::Airborne => frames_per_cycle * 2,
        };
        index as u32
    }
}

/// Sprite kinds, matching the host's texture atlas rows
pub mod sprite_kind {
    pub const ACTOR: u32 = 0;
    /// Obstacle kinds start here, offset by variant order
    pub const OBSTACLE_BASE: u32 = 1;
}

/// One sprite to draw, top-left anchored in screen space
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub kind: u32,
    pub frame: u32,
}

impl SpriteInstance {
    fn obstacle(variant: ObstacleVariant, position: [f32; 2], size: [f32; 2], frame: usize) -> Self {
        let offset = ObstacleVariant::ALL
            .iter()
            .position(|v| *v == variant)
            .unwrap_or(0) as u32;
        Self {
            position,
            size,
            kind: sprite_kind::OBSTACLE_BASE + offset,
            frame: frame as u32,
        }
    }
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub actor_pose: ActorPose,
    /// Actor first, then obstacles in spawn order
    pub sprites: Vec<SpriteInstance>,
    /// Draw the background at this x and again one width to the right
    pub background_x: f32,
    pub background_width: f32,
    pub ground_y: f32,
    pub score: u64,
    pub high_score: u64,
}

impl RenderFrame {
    pub fn capture(session: &Session) -> Self {
        let actor = &session.actor;
        let frame = actor.run_cycle.frame;
        let actor_pose = if !actor.on_ground {
            ActorPose::Airborne
        } else if actor.ducking {
            ActorPose::Ducking { frame }
        } else {
            ActorPose::Running { frame }
        };

        let frames_per_cycle = actor.params().frame_count;
        let mut sprites = Vec::with_capacity(session.field.len() + 1);
        sprites.push(SpriteInstance {
            position: [actor.pos.x, actor.pos.y - actor.height],
            size: [actor.width, actor.height],
            kind: sprite_kind::ACTOR,
            frame: actor_pose.sprite_index(frames_per_cycle),
        });
        sprites.extend(session.field.obstacles.iter().map(|o| {
            SpriteInstance::obstacle(
                o.variant(),
                [o.pos.x, o.pos.y - o.size.y],
                o.size.to_array(),
                o.frame(),
            )
        }));

        Self {
            actor_pose,
            sprites,
            background_x: session.background_x,
            background_width: session.background_width,
            ground_y: session.actor.params().ground_y,
            score: session.score.display_score(),
            high_score: session.score.display_high_score(),
        }
    }
}
