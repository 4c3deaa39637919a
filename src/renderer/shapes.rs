//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate a radial gradient as concentric bands.
///
/// `alpha_at(r)` gives the opacity (0-1) at distance `r` from the center;
/// each band interpolates between its inner and outer radius.
pub fn radial_gradient(
    center: Vec2,
    max_radius: f32,
    rings: u32,
    segments: u32,
    color: [f32; 4],
    alpha_at: impl Fn(f32) -> f32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((rings * segments * 6) as usize);
    let tint = |a: f32| [color[0], color[1], color[2], color[3] * a.clamp(0.0, 1.0)];

    for ring in 0..rings {
        let r1 = max_radius * ring as f32 / rings as f32;
        let r2 = max_radius * (ring + 1) as f32 / rings as f32;
        let (c1, c2) = (tint(alpha_at(r1)), tint(alpha_at(r2)));

        for i in 0..segments {
            let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
            let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
            let (d1, d2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

            let inner1 = center + d1 * r1;
            let outer1 = center + d1 * r2;
            let inner2 = center + d2 * r1;
            let outer2 = center + d2 * r2;

            // Two triangles per segment
            vertices.push(Vertex::new(inner1.x, inner1.y, c1));
            vertices.push(Vertex::new(outer1.x, outer1.y, c2));
            vertices.push(Vertex::new(inner2.x, inner2.y, c1));

            vertices.push(Vertex::new(inner2.x, inner2.y, c1));
            vertices.push(Vertex::new(outer1.x, outer1.y, c2));
            vertices.push(Vertex::new(outer2.x, outer2.y, c2));
        }
    }

    vertices
}
