//! Render state descriptions
//!
//! Small enums describing blend, cull, and depth behavior, converted to wgpu
//! state at pipeline build time.

/// Depth buffer format used by all pipelines in this crate.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Blend mode for the color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendState {
    /// No blending; fragment replaces destination.
    Opaque,
    /// Standard alpha blending.
    Alpha,
    /// Additive blending.
    Additive,
}

impl BlendState {
    /// Convert to the wgpu blend state.
    pub fn to_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            BlendState::Opaque => None,
            BlendState::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            BlendState::Additive => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
        }
    }
}

/// Face culling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullState {
    /// No culling; both faces are rendered. Used for translucent shells.
    None,
    /// Cull back faces.
    Back,
    /// Cull front faces.
    Front,
}

impl CullState {
    /// Convert to the wgpu cull mode.
    pub fn to_wgpu(self) -> Option<wgpu::Face> {
        match self {
            CullState::None => None,
            CullState::Back => Some(wgpu::Face::Back),
            CullState::Front => Some(wgpu::Face::Front),
        }
    }
}

/// Depth test/write behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthState {
    /// Whether fragments are tested against the depth buffer.
    pub test: bool,
    /// Whether fragments write their depth.
    pub write: bool,
}

impl DepthState {
    /// Depth test and write enabled.
    pub fn read_write() -> Self {
        Self {
            test: true,
            write: true,
        }
    }

    /// Depth test without writes. Used for translucent geometry that must
    /// not occlude what is drawn behind it later.
    pub fn read_only() -> Self {
        Self {
            test: true,
            write: false,
        }
    }

    /// Convert to the wgpu depth-stencil state.
    pub fn to_wgpu(self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: self.write,
            depth_compare: if self.test {
                wgpu::CompareFunction::Less
            } else {
                wgpu::CompareFunction::Always
            },
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

impl Default for DepthState {
    fn default() -> Self {
        Self::read_write()
    }
}
