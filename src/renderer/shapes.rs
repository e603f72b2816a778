//! Shape generation for 2D primitives
//!
//! All shapes are produced in field coordinates (origin top-left, y down);
//! `RenderState` maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Body, Particle, SessionState};

/// Axis-aligned rectangle with a vertical gradient
pub fn rect_gradient(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Solid axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    rect_gradient(min, max, color, color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Basket: a trapezoid bowl with a rim across the top
pub fn basket(body: &Body) -> Vec<Vertex> {
    let min = body.pos;
    let max = body.pos + body.size;
    let inset = body.size.x * 0.12;
    let rim = body.size.y * 0.15;

    let tl = Vec2::new(min.x, min.y + rim);
    let tr = Vec2::new(max.x, min.y + rim);
    let bl = Vec2::new(min.x + inset, max.y);
    let br = Vec2::new(max.x - inset, max.y);

    let mut vertices = vec![
        Vertex::new(tl.x, tl.y, colors::BASKET),
        Vertex::new(tr.x, tr.y, colors::BASKET),
        Vertex::new(bl.x, bl.y, colors::BASKET),
        Vertex::new(bl.x, bl.y, colors::BASKET),
        Vertex::new(tr.x, tr.y, colors::BASKET),
        Vertex::new(br.x, br.y, colors::BASKET),
    ];
    vertices.extend(rect(min, Vec2::new(max.x, min.y + rim), colors::BASKET_RIM));
    vertices
}

/// Apple: red disc with a leaf
pub fn apple(body: &Body) -> Vec<Vertex> {
    let radius = body.size.x * 0.5;
    let center = body.center();
    let mut vertices = circle(center, radius * 0.9, colors::APPLE, 20);

    let leaf = Vec2::new(center.x + radius * 0.3, body.pos.y + radius * 0.25);
    vertices.extend(circle(leaf, radius * 0.22, colors::LEAF, 8));
    vertices
}

/// Coin particles, shrinking and fading with age
pub fn coins(particles: &[Particle]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(particles.len() * 24);
    for p in particles {
        let alpha = p.life.clamp(0.0, 1.0);
        let color = [colors::COIN[0], colors::COIN[1], colors::COIN[2], alpha];
        vertices.extend(circle(p.pos, p.size * (0.5 + 0.5 * alpha), color, 8));
    }
    vertices
}

/// Full frame: background, apple, basket, then particles on top
pub fn scene(state: &SessionState, particles: &[Particle]) -> Vec<Vertex> {
    let ground = FIELD_HEIGHT - BASKET_BOTTOM_OFFSET * 0.4;
    let mut vertices = rect_gradient(
        Vec2::ZERO,
        Vec2::new(FIELD_WIDTH, ground),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    );
    vertices.extend(rect(
        Vec2::new(0.0, ground),
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        colors::GRASS,
    ));
    vertices.extend(apple(&state.item));
    vertices.extend(basket(&state.basket));
    vertices.extend(coins(particles));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 1.0, colors::COIN, 12).len(), 36);
    }

    #[test]
    fn test_scene_stays_in_field() {
        let state = SessionState::new(77);
        let vertices = scene(&state, &[]);
        assert_eq!(vertices.len() % 3, 0);
        for v in &vertices {
            assert!(v.position[0] >= -1.0 && v.position[0] <= FIELD_WIDTH + 1.0);
            assert!(v.position[1] >= -1.0 && v.position[1] <= FIELD_HEIGHT + 1.0);
        }
    }

    #[test]
    fn test_coins_fade() {
        let particles = [Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            life: 0.25,
            size: PARTICLE_SIZE,
        }];
        let vertices = coins(&particles);
        assert_eq!(vertices.len(), 24);
        assert!(vertices.iter().all(|v| v.color[3] == 0.25));
    }
}
