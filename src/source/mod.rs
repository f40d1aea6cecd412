//! Impact sources
//!
//! Producers of impact events for the forcefield controller: pointer
//! raycasts ([`PointerSource`]) and particle collisions ([`CollisionSource`]).
//! Debounce and filtering (cooldown, dead zone, unknown targets) live here,
//! not in the effect core.

pub mod collision;
pub mod pointer;
pub mod ray;

pub use collision::{CollisionEvent, CollisionSource, ImpactBurst};
pub use pointer::{DeadZone, PointerConfig, PointerSource};
pub use ray::{Ray, RayHit, SurfaceSet, SurfaceShape};

use std::collections::HashMap;

use glam::Vec3;

use crate::effect::ForcefieldController;

/// Identifier of one forcefield surface instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// A single instantaneous impact event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// World-space surface point.
    pub point: Vec3,
    /// Surface normal at the point. Unit length expected; the effect
    /// normalizes defensively.
    pub normal: Vec3,
    /// The surface that was hit.
    pub target: SurfaceId,
}

/// Producer of impact events, polled by the host once per frame.
pub trait ImpactSource {
    /// Take the next pending impact, if any.
    fn try_get_impact(&mut self) -> Option<Impact>;
}

/// Debounce window for rapid repeated impacts from one source.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    window: f32,
    remaining: f32,
}

impl Cooldown {
    /// Default debounce window in seconds.
    pub const DEFAULT_WINDOW: f32 = 0.25;

    /// Create a cooldown with the given window in seconds. Starts ready.
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(0.0),
            remaining: 0.0,
        }
    }

    /// Advance the cooldown by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    /// Check whether the window has elapsed.
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restart the window after firing.
    pub fn arm(&mut self) {
        self.remaining = self.window;
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

/// Drain a source and apply each impact to its target controller.
///
/// Impacts whose target has no controller are silently dropped. Returns the
/// number of impacts applied.
pub fn dispatch_impacts(
    source: &mut dyn ImpactSource,
    controllers: &mut HashMap<SurfaceId, ForcefieldController>,
) -> usize {
    let mut applied = 0;
    while let Some(impact) = source.try_get_impact() {
        match controllers.get_mut(&impact.target) {
            Some(controller) => {
                controller.apply_impact(impact.point, impact.normal);
                applied += 1;
            }
            None => {
                tracing::debug!("dropping impact for unknown surface {:?}", impact.target);
            }
        }
    }
    applied
}
