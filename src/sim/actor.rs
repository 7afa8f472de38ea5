//! The player-controlled runner
//!
//! Position is `(x, bottom)` in screen space with y growing downward, so the
//! ground line is the largest `y` the actor may have.

use glam::Vec2;

use super::collision::Hitbox;
use super::state::FrameCycle;
use crate::tuning::Tuning;

/// Fixed physical properties of the actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorParams {
    pub spawn_x: f32,
    pub ground_y: f32,
    pub width: f32,
    pub standing_height: f32,
    pub ducking_height: f32,
    /// Added to vertical velocity once per tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    pub frame_interval_ms: f64,
    pub frame_count: usize,
}

impl ActorParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            spawn_x: tuning.actor_x,
            ground_y: tuning.ground_y(),
            width: tuning.actor_width,
            standing_height: tuning.actor_height,
            ducking_height: tuning.actor_duck_height,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            frame_interval_ms: tuning.run_frame_interval_ms,
            frame_count: tuning.run_frame_count,
        }
    }
}

impl Default for ActorParams {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

/// Runner physics and pose
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Left edge x, bottom edge y
    pub pos: Vec2,
    pub velocity_y: f32,
    pub on_ground: bool,
    pub ducking: bool,
    pub width: f32,
    pub height: f32,
    /// Run/duck cycle
    pub run_cycle: FrameCycle,
    params: ActorParams,
}

impl Actor {
    pub fn new(params: ActorParams) -> Self {
        Self {
            pos: Vec2::new(params.spawn_x, params.ground_y),
            velocity_y: 0.0,
            on_ground: true,
            ducking: false,
            width: params.width,
            height: params.standing_height,
            run_cycle: FrameCycle::default(),
            params,
        }
    }

    pub fn params(&self) -> &ActorParams {
        &self.params
    }

    pub fn can_jump(&self) -> bool {
        self.on_ground && !self.ducking
    }

    /// Launch upward; returns false (and changes nothing) unless grounded and standing
    pub fn jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.velocity_y = self.params.jump_impulse;
        self.on_ground = false;
        true
    }

    /// Crouch to the ducking height; only possible on the ground
    pub fn duck(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.ducking = true;
        self.height = self.params.ducking_height;
        true
    }

    pub fn stand_up(&mut self) {
        self.ducking = false;
        self.height = self.params.standing_height;
    }

    /// Integrate one tick
    ///
    /// Gravity is added once per tick regardless of `dt`, so the jump arc is
    /// measured in ticks rather than milliseconds. Only the run-cycle
    /// animation uses `dt`.
    pub fn update(&mut self, dt: f64) {
        self.velocity_y += self.params.gravity;
        self.pos.y += self.velocity_y;

        if self.pos.y >= self.params.ground_y {
            self.pos.y = self.params.ground_y;
            self.velocity_y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        self.run_cycle
            .advance(dt, self.params.frame_interval_ms, self.params.frame_count);
    }

    /// Back to the spawn pose
    pub fn reset(&mut self) {
        *self = Self::new(self.params);
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}
