//! Core rendering abstractions
//!
//! Mid-level wrappers over the wgpu primitives the forcefield material needs.

pub mod buffer;
pub mod pipeline;
pub mod render_states;

pub use buffer::{IndexBuffer, UniformBuffer, VertexBuffer};
pub use pipeline::{PipelineBuilder, VertexPN};
pub use render_states::{BlendState, CullState, DepthState};
