//! Vertex types for 2D debug geometry

/// Simple 2D vertex with position and color
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for debug overlays
pub mod colors {
    pub const ACTOR_HITBOX: [f32; 4] = [0.2, 0.8, 0.4, 0.5];
    pub const CACTUS_HITBOX: [f32; 4] = [0.9, 0.6, 0.2, 0.5];
    pub const BIRD_HITBOX: [f32; 4] = [0.4, 0.7, 1.0, 0.5];
    pub const COLLISION: [f32; 4] = [1.0, 0.2, 0.2, 0.7];
    pub const GROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// CSS `rgba()` string for canvas fill styles
    pub fn to_css(color: [f32; 4]) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(color[0]),
            channel(color[1]),
            channel(color[2]),
            color[3].clamp(0.0, 1.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(colors::to_css(colors::GROUND), "rgba(0, 0, 0, 1)");
        assert_eq!(colors::to_css(colors::COLLISION), "rgba(255, 51, 51, 0.7)");
        assert_eq!(colors::to_css([2.0, -1.0, 0.5, 0.25]), "rgba(255, 0, 128, 0.25)");
    }
}
