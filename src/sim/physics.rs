//! Arcade physics for the basket and the falling item
//!
//! Axis-aligned bodies only. Positions are the sprite's top-left corner in
//! field coordinates (y grows downward). Each body carries a hitbox that may be
//! smaller than its sprite.

use glam::Vec2;

use crate::consts::*;

/// A physical body
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite size
    pub size: Vec2,
    /// Hitbox top-left relative to `pos`
    pub hitbox_offset: Vec2,
    pub hitbox_size: Vec2,
}

impl Body {
    /// Body whose hitbox covers the whole sprite
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            hitbox_offset: Vec2::ZERO,
            hitbox_size: size,
        }
    }

    /// Shrink the hitbox to `hitbox_size`, centered on the sprite
    pub fn with_centered_hitbox(mut self, hitbox_size: Vec2) -> Self {
        self.hitbox_offset = (self.size - hitbox_size) * 0.5;
        self.hitbox_size = hitbox_size;
        self
    }

    /// Hitbox min/max corners
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min = self.pos + self.hitbox_offset;
        (min, min + self.hitbox_size)
    }

    /// Sprite center
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// The player's basket at the bottom-left of the field
    pub fn basket() -> Self {
        Self::new(
            Vec2::new(0.0, FIELD_HEIGHT - BASKET_BOTTOM_OFFSET),
            Vec2::new(BASKET_WIDTH, BASKET_HEIGHT),
        )
        .with_centered_hitbox(Vec2::new(
            BASKET_WIDTH - BASKET_WIDTH / 4.0,
            BASKET_HEIGHT / 6.0,
        ))
    }

    /// A falling apple at the given top-left position
    pub fn apple(pos: Vec2) -> Self {
        Self::new(pos, Vec2::splat(APPLE_SIZE))
    }
}

/// Strict AABB intersection of two hitboxes (touching edges do not count)
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let (a_min, a_max) = a.bounds();
    let (b_min, b_max) = b.bounds();
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Apply gravity and move the falling item.
///
/// The item cannot move sideways and never falls faster than `FALL_SPEED`.
pub fn integrate_falling(body: &mut Body, dt: f32) {
    body.vel.x = 0.0;
    body.vel.y = (body.vel.y + FALL_SPEED * dt).min(FALL_SPEED);
    body.pos += body.vel * dt;
}

/// Move the basket horizontally, keeping its hitbox inside the field
pub fn integrate_basket(body: &mut Body, dt: f32) {
    body.pos.x += body.vel.x * dt;

    let min_x = -body.hitbox_offset.x;
    let max_x = FIELD_WIDTH - body.hitbox_size.x - body.hitbox_offset.x;
    if body.pos.x < min_x {
        body.pos.x = min_x;
        body.vel.x = 0.0;
    } else if body.pos.x > max_x {
        body.pos.x = max_x;
        body.vel.x = 0.0;
    }
}
