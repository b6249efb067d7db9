//! Conversions from egui's tessellated output.
//!
//! egui's `Color32` stores premultiplied `[r, g, b, a]` bytes, which read as a
//! little-endian `u32` are exactly the packed vertex color format. Texture ids
//! are dropped; this pipeline does not sample textures.

use egui::epaint;

use crate::mesh::Mesh;
use crate::shading::{PackedColor, Vertex};

impl From<epaint::Vertex> for Vertex {
    fn from(v: epaint::Vertex) -> Self {
        Vertex {
            position: [v.pos.x, v.pos.y],
            uv: [v.uv.x, v.uv.y],
            color: PackedColor::from(v.color.to_array()),
        }
    }
}

impl From<&epaint::Mesh> for Mesh {
    fn from(m: &epaint::Mesh) -> Self {
        Mesh {
            vertices: m.vertices.iter().copied().map(Vertex::from).collect(),
            indices: m.indices.clone(),
        }
    }
}

/// Scales egui's logical-point coordinates to physical pixels.
pub fn mesh_from_egui(mesh: &epaint::Mesh, pixels_per_point: f32) -> Mesh {
    let mut out = Mesh::from(mesh);
    for v in &mut out.vertices {
        v.position = [v.position[0] * pixels_per_point, v.position[1] * pixels_per_point];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color32_bytes_become_packed_rgba() {
        let v = epaint::Vertex {
            pos: egui::pos2(3.0, 4.0),
            uv: egui::pos2(0.5, 0.25),
            color: egui::Color32::from_rgba_premultiplied(10, 20, 30, 40),
        };
        let out = Vertex::from(v);
        assert_eq!(out.position, [3.0, 4.0]);
        assert_eq!(out.uv, [0.5, 0.25]);
        assert_eq!(out.color.channels(), [10, 20, 30, 40]);
    }

    #[test]
    fn mesh_scales_by_pixels_per_point() {
        let mut m = epaint::Mesh::default();
        m.colored_vertex(egui::pos2(1.0, 2.0), egui::Color32::WHITE);
        m.colored_vertex(egui::pos2(3.0, 4.0), egui::Color32::WHITE);
        m.colored_vertex(egui::pos2(5.0, 6.0), egui::Color32::WHITE);
        m.add_triangle(0, 1, 2);

        let out = mesh_from_egui(&m, 2.0);
        assert_eq!(out.vertices[2].position, [10.0, 12.0]);
        assert_eq!(out.indices, vec![0, 1, 2]);
        assert!(out.validate().is_ok());
    }
}
