//! Forcefield impact effect for wgpu
//!
//! Drives a decaying "forcefield impact" ripple visual from 3D collision or
//! raycast events. Impacts carry a world-space point and surface normal; the
//! controller overwrites the ripple state, enables the ripple, and dampens the
//! amplitude back to zero over a configured time.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **context** - Core wgpu wrapper (Device, Queue)
//! 2. **core** - GPU primitives (buffers, pipelines, render states)
//! 3. **effect** - Impact state machine, controller, material, and bubble mesh
//! 4. **source** - Impact producers (pointer raycasts, particle collisions)
//! 5. **viewer** - Minimal camera with screen-to-ray unprojection
//! 6. **input** - Pointer event types, winit conversion (feature = "window")
//!
//! The effect core is engine-agnostic: the host application owns the frame
//! loop and calls [`effect::ForcefieldController::dampen`] once per tick with
//! the elapsed time. Given the same sequence of ticks and impacts, the effect
//! state is deterministic.

pub mod context;
pub mod core;
pub mod effect;
pub mod input;
pub mod source;
pub mod viewer;

// Re-export commonly used types
pub use context::WgpuContext;

pub use core::{
    BlendState, CullState, DepthState, IndexBuffer, PipelineBuilder, UniformBuffer, VertexBuffer,
    VertexPN,
};

pub use effect::{
    ConfigError, EffectFlag, EffectFlags, ForcefieldController, ForcefieldMaterial,
    ForcefieldMesh, ForcefieldUniform, ImpactConfig, ImpactEffect, ParameterSink, RippleParams,
};

pub use source::{
    dispatch_impacts, CollisionEvent, CollisionSource, Cooldown, DeadZone, Impact, ImpactBurst,
    ImpactSource, PointerConfig, PointerSource, Ray, RayHit, SurfaceId, SurfaceSet, SurfaceShape,
};

pub use viewer::{Camera, CameraUniform, Viewport};

pub use input::{Event, MouseButton};

// Re-export glam for convenience
pub use glam;
