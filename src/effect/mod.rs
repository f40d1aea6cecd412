//! Forcefield impact effect
//!
//! The impact state machine ([`ImpactEffect`]), the render-bound controller
//! ([`ForcefieldController`]), and the wgpu material that receives its
//! parameters ([`ForcefieldMaterial`]).

mod controller;
mod flags;
mod impact;
mod material;
mod mesh;

pub use controller::{ForcefieldController, ParameterSink};
pub use flags::{EffectFlag, EffectFlags};
pub use impact::{ConfigError, ImpactConfig, ImpactEffect, RippleParams};
pub use material::{ForcefieldMaterial, ForcefieldUniform};
pub use mesh::ForcefieldMesh;
