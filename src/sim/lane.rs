//! Lane-crossing actor and moving obstacles
//!
//! The actor is clamped to the field, obstacles wrap around it. Actor moves
//! are truncated at the boundary, unlike piece moves which are all-or-nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::random::Randomizer;
use crate::settings::Config;

/// The player avatar in the lane field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneActor {
    /// Top-left corner
    pub pos: Vec2,
    /// Square footprint edge
    pub size: f32,
    /// Distance covered by one move
    pub step: f32,
    /// Field extent the actor must stay inside
    bounds: Vec2,
}

impl LaneActor {
    /// Actor at `pos`, clamped into a `bounds` field
    pub fn new(pos: Vec2, size: f32, step: f32, bounds: Vec2) -> Self {
        let mut actor = Self {
            pos,
            size,
            step,
            bounds,
        };
        actor.clamp();
        actor
    }

    /// Starting actor for `config`: bottom of the field, horizontally centered
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Vec2::new(
                config.field_width / 2.0,
                config.field_height - config.actor_size,
            ),
            config.actor_size,
            config.actor_step,
            Vec2::new(config.field_width, config.field_height),
        )
    }

    /// Move by `(dx, dy)` steps. Overshoot is truncated at the field edge.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.pos += Vec2::new(dx as f32, dy as f32) * self.step;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max = (self.bounds - Vec2::splat(self.size)).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A moving hazard confined to one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane: usize,
    /// Left edge
    pub x: f32,
    /// Top edge of the lane
    pub y: f32,
    /// Signed horizontal speed per tick
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Advance one tick and wrap across the field edges.
    ///
    /// Position wraps modulo `field_width + width`: leaving past the right
    /// edge re-enters from the left and vice versa, however far the step
    /// overshoots. Spacing between obstacles in a lane is preserved.
    pub fn update(&mut self, field_width: f32) {
        self.x += self.velocity;
        if self.x > field_width || self.x + self.width < 0.0 {
            let span = field_width + self.width;
            self.x = (self.x + self.width).rem_euclid(span) - self.width;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Build every lane's obstacles from `config`, placing each at a random x
pub fn spawn_obstacles(config: &Config, rng: &mut impl Randomizer) -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    for (lane, layout) in config.lanes.iter().enumerate() {
        let free = (config.field_width - layout.width).max(0.0) as usize;
        for _ in 0..layout.count {
            obstacles.push(Obstacle {
                lane,
                x: rng.pick(free + 1) as f32,
                y: config.lane_height * (lane as f32 + 1.0),
                velocity: layout.speed,
                width: layout.width,
                height: config.lane_height,
            });
        }
    }
    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LaneConfig;
    use crate::sim::random::Scripted;
    use proptest::prelude::*;

    fn actor_at(x: f32, y: f32) -> LaneActor {
        LaneActor::new(Vec2::new(x, y), 30.0, 30.0, Vec2::new(600.0, 800.0))
    }

    fn obstacle(x: f32, velocity: f32, width: f32) -> Obstacle {
        Obstacle {
            lane: 0,
            x,
            y: 30.0,
            velocity,
            width,
            height: 30.0,
        }
    }

    #[test]
    fn test_actor_clamped_at_left_edge() {
        let mut actor = actor_at(0.0, 400.0);
        actor.move_by(-1, 0);
        assert_eq!(actor.pos, Vec2::new(0.0, 400.0));
    }

    #[test]
    fn test_actor_truncated_not_rejected() {
        // 20 units from the right edge, step is 30
        let mut actor = actor_at(550.0, 400.0);
        actor.move_by(1, 0);
        assert_eq!(actor.pos.x, 570.0);
        actor.move_by(0, -20);
        assert_eq!(actor.pos.y, 0.0);
    }

    #[test]
    fn test_actor_moves_one_step() {
        let mut actor = actor_at(300.0, 400.0);
        actor.move_by(0, 1);
        assert_eq!(actor.pos, Vec2::new(300.0, 430.0));
    }

    #[test]
    fn test_actor_from_config_starts_at_bottom() {
        let actor = LaneActor::from_config(&Config::default());
        assert_eq!(actor.pos, Vec2::new(300.0, 770.0));
        assert_eq!(actor.rect(), Rect::new(300.0, 770.0, 30.0, 30.0));
    }

    #[test]
    fn test_obstacle_moves_by_velocity() {
        let mut o = obstacle(590.0, 2.0, 60.0);
        o.update(600.0);
        assert_eq!(o.x, 592.0);
    }

    #[test]
    fn test_obstacle_wraps_past_right_edge() {
        let mut o = obstacle(598.0, 2.0, 60.0);
        o.update(600.0);
        // Exactly on the edge is not past it
        assert_eq!(o.x, 600.0);
        o.update(600.0);
        assert_eq!(o.x, 602.0 - 600.0 - 60.0);
    }

    #[test]
    fn test_obstacle_wraps_past_left_edge() {
        let mut o = obstacle(-89.0, -1.0, 90.0);
        o.update(600.0);
        assert_eq!(o.x, -90.0);
        o.update(600.0);
        assert_eq!(o.x, -91.0 + 600.0 + 90.0);
    }

    #[test]
    fn test_fast_obstacle_stays_in_wrap_span() {
        // Speed well beyond the 660 unit span
        let mut o = obstacle(0.0, 2000.0, 60.0);
        let mut seen = Vec::new();
        for _ in 0..5 {
            o.update(600.0);
            assert!(o.x >= -60.0 && o.x <= 600.0, "x = {}", o.x);
            seen.push(o.x);
        }
        // 2000 mod 660 = 20 per tick
        assert_eq!(seen, vec![20.0, 40.0, 60.0, 80.0, 100.0]);

        let mut o = obstacle(0.0, -2000.0, 60.0);
        o.update(600.0);
        assert_eq!(o.x, -2000.0 + 3.0 * 660.0);
    }

    #[test]
    fn test_spawn_obstacles_per_lane() {
        let config = Config {
            lanes: vec![LaneConfig::new(2.0, 60.0, 2), LaneConfig::new(-1.0, 90.0, 1)],
            ..Default::default()
        };
        let mut rng = Scripted::new(vec![10, 20, 30]);
        let obstacles = spawn_obstacles(&config, &mut rng);

        assert_eq!(obstacles.len(), 3);
        assert_eq!(obstacles[0].lane, 0);
        assert_eq!(obstacles[0].x, 10.0);
        assert_eq!(obstacles[1].x, 20.0);
        assert_eq!(obstacles[0].y, 30.0);
        assert_eq!(obstacles[2].lane, 1);
        assert_eq!(obstacles[2].y, 60.0);
        assert_eq!(obstacles[2].velocity, -1.0);
        assert_eq!(obstacles[2].rect(), Rect::new(30.0, 60.0, 90.0, 30.0));
    }

    proptest! {
        #[test]
        fn prop_actor_always_in_bounds(
            moves in proptest::collection::vec((-3i32..=3, -3i32..=3), 0..50),
        ) {
            let mut actor = actor_at(300.0, 400.0);
            for (dx, dy) in moves {
                actor.move_by(dx, dy);
                prop_assert!(actor.pos.x >= 0.0 && actor.pos.x <= 570.0);
                prop_assert!(actor.pos.y >= 0.0 && actor.pos.y <= 770.0);
            }
        }

        #[test]
        fn prop_obstacle_stays_in_wrap_span(
            start in 0i32..540,
            speed in prop_oneof![-5000i32..0, 1i32..5000],
            ticks in 0usize..500,
        ) {
            let mut o = obstacle(start as f32, speed as f32, 60.0);
            for _ in 0..ticks {
                o.update(600.0);
                prop_assert!(o.x >= -60.0 && o.x <= 600.0, "x = {}", o.x);
            }
        }
    }
}
