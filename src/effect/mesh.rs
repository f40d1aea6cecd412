//! Forcefield bubble geometry
//!
//! UV-sphere mesh for the field surface, with outward unit normals for the
//! ripple displacement in the vertex shader.

use glam::Vec3;

use crate::context::WgpuContext;
use crate::core::buffer::{IndexBuffer, VertexBuffer};
use crate::core::pipeline::VertexPN;

/// Generate UV-sphere geometry centered at the origin.
///
/// `sectors` is the slice count around the equator, `stacks` the ring count
/// from pole to pole. Both are clamped to a minimum of 3.
pub fn sphere_geometry(radius: f32, sectors: u32, stacks: u32) -> (Vec<VertexPN>, Vec<u32>) {
    let sectors = sectors.max(3);
    let stacks = stacks.max(3);

    let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
    for stack in 0..=stacks {
        let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for sector in 0..=sectors {
            let theta = std::f32::consts::TAU * sector as f32 / sectors as f32;
            let normal = Vec3::new(ring_radius * theta.cos(), y, ring_radius * theta.sin());
            vertices.push(VertexPN {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
            });
        }
    }

    let mut indices = Vec::with_capacity((stacks * sectors * 6) as usize);
    let ring_stride = sectors + 1;
    for stack in 0..stacks {
        for sector in 0..sectors {
            let a = stack * ring_stride + sector;
            let b = a + ring_stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    (vertices, indices)
}

/// GPU mesh for the forcefield bubble.
pub struct ForcefieldMesh {
    vertices: VertexBuffer,
    indices: IndexBuffer,
}

impl ForcefieldMesh {
    /// Create a sphere mesh with the given radius and tessellation.
    pub fn sphere(ctx: &WgpuContext, radius: f32, sectors: u32, stacks: u32) -> Self {
        let (vertices, indices) = sphere_geometry(radius, sectors, stacks);
        Self {
            vertices: VertexBuffer::new(ctx, &vertices, Some("forcefield sphere vertices")),
            indices: IndexBuffer::new(ctx, &indices, Some("forcefield sphere indices")),
        }
    }

    /// Record the draw into a render pass. The material's pipeline and bind
    /// groups must already be set.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertices.slice());
        pass.set_index_buffer(self.indices.slice(), self.indices.format());
        pass.draw_indexed(0..self.indices.count(), 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertex_and_index_counts() {
        let (vertices, indices) = sphere_geometry(1.0, 16, 12);
        assert_eq!(vertices.len(), 17 * 13);
        assert_eq!(indices.len(), (16 * 12 * 6) as usize);
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let (vertices, indices) = sphere_geometry(0.5, 8, 6);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_sphere_normals_unit_and_radial() {
        let (vertices, _) = sphere_geometry(2.0, 12, 8);
        for v in &vertices {
            let normal = Vec3::from_array(v.normal);
            let position = Vec3::from_array(v.position);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!((position.length() - 2.0).abs() < 1e-4);
            // Normal points away from the center through the vertex.
            assert!((position - normal * 2.0).length() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_clamps_degenerate_tessellation() {
        let (vertices, indices) = sphere_geometry(1.0, 0, 1);
        assert_eq!(vertices.len(), 4 * 4);
        assert!(!indices.is_empty());
    }
}
