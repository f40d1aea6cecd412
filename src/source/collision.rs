//! Particle-collision impact source
//!
//! Accepts collision events from a host particle system, queues one impact
//! per event, and tracks a short-lived secondary burst effect at each
//! intersection. Bursts face the surface normal and age out after a
//! configurable lifetime.

use std::collections::VecDeque;

use glam::{Quat, Vec3};

use crate::source::{Impact, ImpactSource, SurfaceId};

/// One collision reported by the host particle system.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent {
    /// World-space intersection point.
    pub intersection: Vec3,
    /// Surface normal at the intersection.
    pub normal: Vec3,
    /// The surface that was hit.
    pub target: SurfaceId,
}

/// Secondary particle burst spawned at a collision.
#[derive(Debug, Clone, Copy)]
pub struct ImpactBurst {
    /// World-space spawn position.
    pub position: Vec3,
    /// Rotation orienting the burst to face the surface normal.
    pub orientation: Quat,
    age: f32,
    lifetime: f32,
}

impl ImpactBurst {
    /// Seconds since the burst spawned.
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Check whether the burst is still within its lifetime.
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }
}

/// Impact source fed by particle-collision events.
pub struct CollisionSource {
    burst_lifetime: f32,
    queue: VecDeque<Impact>,
    bursts: Vec<ImpactBurst>,
}

impl CollisionSource {
    /// Default burst lifetime in seconds.
    pub const DEFAULT_BURST_LIFETIME: f32 = 1.5;

    /// Create a collision source whose bursts live `burst_lifetime` seconds.
    pub fn new(burst_lifetime: f32) -> Self {
        Self {
            burst_lifetime: burst_lifetime.max(0.0),
            queue: VecDeque::new(),
            bursts: Vec::new(),
        }
    }

    /// Enqueue a batch of collision events.
    ///
    /// Each event spawns a burst at the intersection, oriented toward the
    /// surface normal, and queues one impact in arrival order. Events with a
    /// degenerate normal are dropped.
    pub fn push_events(&mut self, events: &[CollisionEvent]) {
        for event in events {
            let Some(normal) = event.normal.try_normalize() else {
                tracing::warn!(
                    "dropping collision event with degenerate normal {:?}",
                    event.normal
                );
                continue;
            };

            self.bursts.push(ImpactBurst {
                position: event.intersection,
                orientation: Quat::from_rotation_arc(Vec3::Z, normal),
                age: 0.0,
                lifetime: self.burst_lifetime,
            });
            self.queue.push_back(Impact {
                point: event.intersection,
                normal,
                target: event.target,
            });
        }
    }

    /// Age the live bursts by `dt` seconds and discard expired ones.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        for burst in &mut self.bursts {
            burst.age += dt;
        }
        self.bursts.retain(|burst| burst.is_alive());
    }

    /// The currently live bursts, for the host to render.
    pub fn bursts(&self) -> &[ImpactBurst] {
        &self.bursts
    }
}

impl Default for CollisionSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BURST_LIFETIME)
    }
}

impl ImpactSource for CollisionSource {
    fn try_get_impact(&mut self) -> Option<Impact> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_events_queue_in_arrival_order() {
        let mut source = CollisionSource::default();
        source.push_events(&[
            CollisionEvent {
                intersection: Vec3::new(1.0, 0.0, 0.0),
                normal: Vec3::X,
                target: SurfaceId(1),
            },
            CollisionEvent {
                intersection: Vec3::new(0.0, 2.0, 0.0),
                normal: Vec3::Y,
                target: SurfaceId(1),
            },
        ]);

        assert_eq!(
            source.try_get_impact().unwrap().point,
            Vec3::new(1.0, 0.0, 0.0)
        );
        assert_eq!(
            source.try_get_impact().unwrap().point,
            Vec3::new(0.0, 2.0, 0.0)
        );
        assert!(source.try_get_impact().is_none());
    }

    #[test]
    fn test_event_normal_is_normalized() {
        let mut source = CollisionSource::default();
        source.push_events(&[CollisionEvent {
            intersection: Vec3::ZERO,
            normal: Vec3::new(0.0, 5.0, 0.0),
            target: SurfaceId(1),
        }]);

        let impact = source.try_get_impact().unwrap();
        assert!((impact.normal - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_degenerate_normal_dropped() {
        let mut source = CollisionSource::default();
        source.push_events(&[CollisionEvent {
            intersection: Vec3::ZERO,
            normal: Vec3::ZERO,
            target: SurfaceId(1),
        }]);

        assert!(source.try_get_impact().is_none());
        assert!(source.bursts().is_empty());
    }

    #[test]
    fn test_burst_faces_normal() {
        let mut source = CollisionSource::default();
        source.push_events(&[CollisionEvent {
            intersection: Vec3::ZERO,
            normal: Vec3::X,
            target: SurfaceId(1),
        }]);

        let burst = source.bursts()[0];
        let facing = burst.orientation * Vec3::Z;
        assert!((facing - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_bursts_expire_after_lifetime() {
        let mut source = CollisionSource::new(1.5);
        source.push_events(&[CollisionEvent {
            intersection: Vec3::ZERO,
            normal: Vec3::Y,
            target: SurfaceId(1),
        }]);
        assert_eq!(source.bursts().len(), 1);

        source.update(1.0);
        assert_eq!(source.bursts().len(), 1);
        assert!((source.bursts()[0].age() - 1.0).abs() < EPS);

        source.update(0.6);
        assert!(source.bursts().is_empty());
    }

    #[test]
    fn test_staggered_bursts_expire_independently() {
        let mut source = CollisionSource::new(1.0);
        source.push_events(&[CollisionEvent {
            intersection: Vec3::ZERO,
            normal: Vec3::Y,
            target: SurfaceId(1),
        }]);
        source.update(0.7);
        source.push_events(&[CollisionEvent {
            intersection: Vec3::X,
            normal: Vec3::Y,
            target: SurfaceId(1),
        }]);

        source.update(0.5);
        assert_eq!(source.bursts().len(), 1);
        assert_eq!(source.bursts()[0].position, Vec3::X);
    }
}
