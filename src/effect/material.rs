//! Forcefield material
//!
//! Maps the impact effect state onto a shader uniform block and owns the
//! render pipeline for the bubble surface. Implements [`ParameterSink`], so a
//! [`ForcefieldController`](crate::effect::ForcefieldController) can be bound
//! directly to it.

use crate::context::WgpuContext;
use crate::core::buffer::UniformBuffer;
use crate::core::pipeline::{PipelineBuilder, VertexPN};
use crate::core::render_states::{BlendState, CullState, DepthState};
use crate::effect::controller::ParameterSink;
use crate::effect::flags::EffectFlag;
use crate::effect::impact::RippleParams;
use crate::viewer::{Camera, CameraUniform, Viewport};

/// Forcefield shader uniform block.
///
/// Lane layout matches `shaders/forcefield.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ForcefieldUniform {
    /// World-space impact origin (xyz), w unused.
    pub impact_point: [f32; 4],
    /// Unit surface normal at the impact (xyz), w unused.
    pub ripple_direction: [f32; 4],
    /// amplitude, max radius, ripple enabled, unused.
    pub ripple: [f32; 4],
    /// rim glow, scan line, fill texture, intersection.
    pub toggles: [f32; 4],
}

impl ForcefieldUniform {
    /// All parameters zeroed, every sub-effect disabled.
    pub fn disabled() -> Self {
        Self {
            impact_point: [0.0; 4],
            ripple_direction: [0.0, 1.0, 0.0, 0.0],
            ripple: [0.0; 4],
            toggles: [0.0; 4],
        }
    }

    fn set_ripple(&mut self, params: &RippleParams) {
        self.impact_point = [params.origin.x, params.origin.y, params.origin.z, 0.0];
        self.ripple_direction = [
            params.direction.x,
            params.direction.y,
            params.direction.z,
            0.0,
        ];
        self.ripple = [
            params.amplitude,
            params.max_radius,
            if params.enabled { 1.0 } else { 0.0 },
            0.0,
        ];
    }

    fn set_toggle(&mut self, flag: EffectFlag, enabled: bool) {
        let value = if enabled { 1.0 } else { 0.0 };
        match flag {
            EffectFlag::Ripple => self.ripple[2] = value,
            EffectFlag::RimGlow => self.toggles[0] = value,
            EffectFlag::ScanLine => self.toggles[1] = value,
            EffectFlag::FillTexture => self.toggles[2] = value,
            EffectFlag::Intersection => self.toggles[3] = value,
        }
    }
}

/// Render material for the forcefield bubble surface.
pub struct ForcefieldMaterial {
    ctx: WgpuContext,
    pipeline: wgpu::RenderPipeline,
    camera_buffer: UniformBuffer<CameraUniform>,
    field_buffer: UniformBuffer<ForcefieldUniform>,
    uniform: ForcefieldUniform,
}

impl ForcefieldMaterial {
    /// Create a new forcefield material for the given surface format.
    pub fn new(ctx: &WgpuContext, format: wgpu::TextureFormat) -> anyhow::Result<Self> {
        let shader = include_str!("../shaders/forcefield.wgsl");

        let camera_buffer = UniformBuffer::new(
            ctx,
            &CameraUniform::identity(),
            Some("forcefield camera uniform"),
        );
        let uniform = ForcefieldUniform::disabled();
        let field_buffer = UniformBuffer::new(ctx, &uniform, Some("forcefield uniform"));

        // Translucent shell: depth-tested but not depth-written, both faces.
        let pipeline = PipelineBuilder::new(ctx)
            .label("forcefield pipeline")
            .shader(shader)
            .vertex_layout(VertexPN::layout())
            .bind_group_layout(camera_buffer.bind_group_layout())
            .bind_group_layout(field_buffer.bind_group_layout())
            .color_format(format)
            .depth(DepthState::read_only())
            .blend(BlendState::Alpha)
            .cull(CullState::None)
            .build()?;

        Ok(Self {
            ctx: ctx.clone(),
            pipeline,
            camera_buffer,
            field_buffer,
            uniform,
        })
    }

    /// Update the camera uniform from a viewer.
    pub fn update_camera(&self, camera: &Camera, viewport: Viewport) {
        self.camera_buffer
            .update(&self.ctx, &CameraUniform::from_camera(camera, viewport));
    }

    /// Get the render pipeline.
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Get the camera bind group (group 0).
    pub fn camera_bind_group(&self) -> &wgpu::BindGroup {
        self.camera_buffer.bind_group()
    }

    /// Get the forcefield bind group (group 1).
    pub fn field_bind_group(&self) -> &wgpu::BindGroup {
        self.field_buffer.bind_group()
    }

    /// Current CPU-side copy of the uniform block.
    pub fn uniform(&self) -> &ForcefieldUniform {
        &self.uniform
    }
}

impl ParameterSink for ForcefieldMaterial {
    fn write_ripple(&mut self, params: &RippleParams) {
        self.uniform.set_ripple(params);
        // One buffer write for the whole block: the renderer never sees a
        // partially updated impact.
        self.field_buffer.update(&self.ctx, &self.uniform);
    }

    fn write_flag(&mut self, flag: EffectFlag, enabled: bool) {
        self.uniform.set_toggle(flag, enabled);
        self.field_buffer.update(&self.ctx, &self.uniform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_uniform_ripple_packing() {
        let mut uniform = ForcefieldUniform::disabled();
        uniform.set_ripple(&RippleParams {
            enabled: true,
            amplitude: 0.01,
            max_radius: 0.35,
            origin: Vec3::new(1.0, 2.0, 3.0),
            direction: Vec3::Z,
        });

        assert_eq!(uniform.impact_point, [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(uniform.ripple_direction, [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(uniform.ripple, [0.01, 0.35, 1.0, 0.0]);
        // Feature toggles untouched.
        assert_eq!(uniform.toggles, [0.0; 4]);
    }

    #[test]
    fn test_uniform_toggle_lanes() {
        let mut uniform = ForcefieldUniform::disabled();
        uniform.set_toggle(EffectFlag::RimGlow, true);
        uniform.set_toggle(EffectFlag::Intersection, true);
        assert_eq!(uniform.toggles, [1.0, 0.0, 0.0, 1.0]);

        uniform.set_toggle(EffectFlag::RimGlow, false);
        assert_eq!(uniform.toggles, [0.0, 0.0, 0.0, 1.0]);

        uniform.set_toggle(EffectFlag::Ripple, true);
        assert_eq!(uniform.ripple[2], 1.0);
    }

    #[test]
    fn test_uniform_block_size() {
        // Four vec4 lanes.
        assert_eq!(std::mem::size_of::<ForcefieldUniform>(), 64);
    }
}
