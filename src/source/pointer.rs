//! Pointer impact source
//!
//! Raycasts the cursor against the forcefield surfaces on pointer presses
//! (and while the button is held, at a configurable fire interval). Presses
//! inside the dead zone are ignored, and a cooldown window debounces rapid
//! repeats. Both filters live here, gating event production, not in the
//! effect core.

use glam::Vec2;

use crate::input::{Event, MouseButton};
use crate::source::ray::SurfaceSet;
use crate::source::{Cooldown, Impact, ImpactSource};
use crate::viewer::{Camera, Viewport};

/// Screen-space rectangle where pointer presses are ignored.
#[derive(Debug, Clone, Copy)]
pub struct DeadZone {
    pub min: Vec2,
    pub max: Vec2,
}

impl DeadZone {
    /// Create a dead zone from two corners.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Check whether a screen point lies inside the zone.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Tuning for the pointer source.
#[derive(Debug, Clone, Copy)]
pub struct PointerConfig {
    /// Debounce window between produced impacts, seconds.
    pub cooldown: f32,
    /// Minimum time between shots while the button is held, seconds.
    pub fire_interval: f32,
    /// Screen region where presses are ignored.
    pub dead_zone: Option<DeadZone>,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            cooldown: Cooldown::DEFAULT_WINDOW,
            fire_interval: 0.1,
            dead_zone: None,
        }
    }
}

/// Impact source driven by pointer raycasts.
pub struct PointerSource {
    config: PointerConfig,
    cooldown: Cooldown,
    since_last_shot: f32,
    button_down: bool,
    cursor: Vec2,
    pending: Option<Impact>,
}

impl PointerSource {
    /// Create a pointer source.
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            cooldown: Cooldown::new(config.cooldown),
            since_last_shot: f32::MAX,
            button_down: false,
            cursor: Vec2::ZERO,
            pending: None,
        }
    }

    /// Feed pointer events, tracking the cursor and left-button state.
    pub fn handle_events(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::MousePress {
                    button: MouseButton::Left,
                    position,
                } => {
                    self.button_down = true;
                    self.cursor = Vec2::new(position.0, position.1);
                }
                Event::MouseRelease {
                    button: MouseButton::Left,
                    ..
                } => {
                    self.button_down = false;
                }
                Event::MouseMotion { position } => {
                    self.cursor = Vec2::new(position.0, position.1);
                }
                _ => {}
            }
        }
    }

    /// Advance timers and raycast if the pointer is firing.
    ///
    /// A missing camera downgrades the poll to a no-op with a diagnostic.
    /// Misses produce nothing; a hit queues one impact for
    /// [`try_get_impact`](ImpactSource::try_get_impact).
    pub fn update(
        &mut self,
        dt: f32,
        camera: Option<&Camera>,
        viewport: Viewport,
        surfaces: &SurfaceSet,
    ) {
        self.cooldown.tick(dt);
        self.since_last_shot = if dt > 0.0 {
            (self.since_last_shot + dt).min(f32::MAX)
        } else {
            self.since_last_shot
        };

        if !self.button_down {
            return;
        }

        if let Some(zone) = &self.config.dead_zone {
            if zone.contains(self.cursor) {
                tracing::debug!("pointer press in dead zone at {:?}", self.cursor);
                return;
            }
        }

        let Some(camera) = camera else {
            tracing::warn!("pointer source has no camera; skipping raycast");
            return;
        };

        if !self.cooldown.is_ready() || self.since_last_shot < self.config.fire_interval {
            return;
        }

        let ray = camera.screen_point_to_ray(self.cursor, viewport);
        let Some((target, hit)) = surfaces.raycast(&ray) else {
            return;
        };

        self.cooldown.arm();
        self.since_last_shot = 0.0;
        self.pending = Some(Impact {
            point: hit.point,
            normal: hit.normal,
            target,
        });
    }
}

impl ImpactSource for PointerSource {
    fn try_get_impact(&mut self) -> Option<Impact> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ray::SurfaceShape;
    use crate::source::SurfaceId;
    use glam::Vec3;

    fn scene() -> (Camera, Viewport, SurfaceSet) {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let viewport = Viewport::new(800, 600);
        let mut surfaces = SurfaceSet::new();
        surfaces.insert(
            SurfaceId(1),
            SurfaceShape::Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
            },
        );
        (camera, viewport, surfaces)
    }

    fn press_at(x: f32, y: f32) -> Event {
        Event::MousePress {
            button: MouseButton::Left,
            position: (x, y),
        }
    }

    #[test]
    fn test_press_on_surface_produces_impact() {
        let (camera, viewport, surfaces) = scene();
        let mut source = PointerSource::new(PointerConfig::default());

        source.handle_events(&[press_at(400.0, 300.0)]);
        source.update(0.016, Some(&camera), viewport, &surfaces);

        let impact = source.try_get_impact().unwrap();
        assert_eq!(impact.target, SurfaceId(1));
        assert!((impact.point.z - 1.0).abs() < 1e-3);
        // Impact is taken, not repeated.
        assert!(source.try_get_impact().is_none());
    }

    #[test]
    fn test_press_off_surface_produces_nothing() {
        let (camera, viewport, surfaces) = scene();
        let mut source = PointerSource::new(PointerConfig::default());

        source.handle_events(&[press_at(20.0, 20.0)]);
        source.update(0.016, Some(&camera), viewport, &surfaces);

        assert!(source.try_get_impact().is_none());
    }

    #[test]
    fn test_dead_zone_filters_presses() {
        let (camera, viewport, surfaces) = scene();
        let mut source = PointerSource::new(PointerConfig {
            dead_zone: Some(DeadZone::new(
                Vec2::new(300.0, 200.0),
                Vec2::new(500.0, 400.0),
            )),
            ..PointerConfig::default()
        });

        source.handle_events(&[press_at(400.0, 300.0)]);
        source.update(0.016, Some(&camera), viewport, &surfaces);
        assert!(source.try_get_impact().is_none());
    }

    #[test]
    fn test_cooldown_debounces_held_button() {
        let (camera, viewport, surfaces) = scene();
        let mut source = PointerSource::new(PointerConfig {
            cooldown: 0.25,
            fire_interval: 0.0,
            dead_zone: None,
        });

        source.handle_events(&[press_at(400.0, 300.0)]);
        source.update(0.016, Some(&camera), viewport, &surfaces);
        assert!(source.try_get_impact().is_some());

        // Held button, still inside the cooldown window.
        source.update(0.016, Some(&camera), viewport, &surfaces);
        assert!(source.try_get_impact().is_none());

        // Past the window.
        source.update(0.3, Some(&camera), viewport, &surfaces);
        assert!(source.try_get_impact().is_some());
    }

    #[test]
    fn test_release_stops_firing() {
        let (camera, viewport, surfaces) = scene();
        let mut source = PointerSource::new(PointerConfig {
            cooldown: 0.0,
            fire_interval: 0.0,
            dead_zone: None,
        });

        source.handle_events(&[press_at(400.0, 300.0)]);
        source.update(0.016, Some(&camera), viewport, &surfaces);
        assert!(source.try_get_impact().is_some());

        source.handle_events(&[Event::MouseRelease {
            button: MouseButton::Left,
            position: (400.0, 300.0),
        }]);
        source.update(0.3, Some(&camera), viewport, &surfaces);
        assert!(source.try_get_impact().is_none());
    }

    #[test]
    fn test_missing_camera_is_noop() {
        let (_, viewport, surfaces) = scene();
        let mut source = PointerSource::new(PointerConfig::default());

        source.handle_events(&[press_at(400.0, 300.0)]);
        source.update(0.016, None, viewport, &surfaces);
        assert!(source.try_get_impact().is_none());
    }
}
