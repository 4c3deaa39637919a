//! Endlessly scrolling two-tile backdrop

use crate::consts::SCREEN_WIDTH;

/// Two copies of the backdrop image laid edge to edge
#[derive(Debug, Clone)]
pub struct Backdrop {
    /// Left edge of each tile
    pub tiles: [f32; 2],
    /// Pixels per frame
    pub speed: f32,
}

impl Backdrop {
    pub fn new(obstacle_speed: f32) -> Self {
        Self {
            tiles: [0.0, SCREEN_WIDTH],
            speed: obstacle_speed * 1.1,
        }
    }

    /// Scroll speed for the current obstacle speed and actor velocity
    pub fn speed_for(obstacle_speed: f32, actor_velocity: f32) -> f32 {
        obstacle_speed * 1.2 + actor_velocity.abs() * 0.05
    }

    /// Resync speed and scroll both tiles.
    ///
    /// A tile that has fully left the screen is placed right after the
    /// other one, so the seam never opens.
    pub fn update(&mut self, obstacle_speed: f32, actor_velocity: f32) {
        self.speed = Self::speed_for(obstacle_speed, actor_velocity);

        for x in &mut self.tiles {
            *x -= self.speed;
        }
        for i in 0..2 {
            if self.tiles[i] <= -SCREEN_WIDTH {
                self.tiles[i] = self.tiles[1 - i] + SCREEN_WIDTH;
            }
        }
    }
}
