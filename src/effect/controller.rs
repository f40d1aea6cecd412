//! Render-bound effect controller
//!
//! [`ForcefieldController`] wraps an [`ImpactEffect`] together with an
//! explicit bound/unbound render binding. While unbound, every operation is
//! a no-op with a diagnostic; while bound, state changes are mirrored into a
//! [`ParameterSink`]. Nothing here errors or panics at the caller.

use glam::Vec3;

use crate::effect::flags::EffectFlag;
use crate::effect::impact::{ConfigError, ImpactConfig, ImpactEffect, RippleParams};

/// Receiver for forcefield render parameters.
///
/// A ripple write carries all four ripple parameters plus the enable flag as
/// one unit, so a renderer never observes a partially updated impact. The
/// remaining sub-effect flags are written individually.
pub trait ParameterSink {
    /// Write the full ripple parameter block.
    fn write_ripple(&mut self, params: &RippleParams);

    /// Write one sub-effect flag.
    fn write_flag(&mut self, flag: EffectFlag, enabled: bool);
}

/// Impact effect controller with an explicit render binding.
pub struct ForcefieldController {
    effect: ImpactEffect,
    sink: Option<Box<dyn ParameterSink>>,
}

impl ForcefieldController {
    /// Create an unbound controller with validated configuration.
    pub fn new(config: ImpactConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            effect: ImpactEffect::new(config)?,
            sink: None,
        })
    }

    /// Bind a render target sink. The full current state is pushed so the
    /// sink never starts stale.
    pub fn bind(&mut self, mut sink: Box<dyn ParameterSink>) {
        sink.write_ripple(&self.effect.ripple_params());
        for flag in EffectFlag::ALL {
            sink.write_flag(flag, self.effect.is_flag_enabled(flag));
        }
        self.sink = Some(sink);
    }

    /// Remove the render binding, returning the sink if one was bound.
    pub fn unbind(&mut self) -> Option<Box<dyn ParameterSink>> {
        self.sink.take()
    }

    /// Check whether a render target is bound.
    pub fn is_bound(&self) -> bool {
        self.sink.is_some()
    }

    /// Get the underlying effect state.
    pub fn effect(&self) -> &ImpactEffect {
        &self.effect
    }

    /// Apply an impact at a world-space point with the given surface normal.
    ///
    /// Unbound controllers ignore the call. Malformed impacts are rejected by
    /// the effect and nothing is written to the sink.
    pub fn apply_impact(&mut self, point: Vec3, normal: Vec3) {
        let Some(sink) = self.sink.as_mut() else {
            tracing::warn!("apply_impact on unbound controller; ignoring");
            return;
        };
        if self.effect.apply_impact(point, normal) {
            sink.write_ripple(&self.effect.ripple_params());
        }
    }

    /// Advance the decay by `dt` seconds, mirroring any change to the sink.
    ///
    /// Call exactly once per frame from the host scheduler.
    pub fn dampen(&mut self, dt: f32) {
        let Some(sink) = self.sink.as_mut() else {
            tracing::warn!("dampen on unbound controller; ignoring");
            return;
        };
        let before = self.effect.ripple_params();
        self.effect.dampen(dt);
        let after = self.effect.ripple_params();
        if after != before {
            sink.write_ripple(&after);
        }
    }

    /// Enable or disable a sub-effect flag, mirroring any change to the sink.
    pub fn set_flag(&mut self, flag: EffectFlag, enabled: bool) {
        let Some(sink) = self.sink.as_mut() else {
            tracing::warn!("set_flag on unbound controller; ignoring");
            return;
        };
        let before = self.effect.is_flag_enabled(flag);
        self.effect.set_flag(flag, enabled);
        let now = self.effect.is_flag_enabled(flag);
        if now != before {
            sink.write_flag(flag, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Write {
        Ripple(RippleParams),
        Flag(EffectFlag, bool),
    }

    /// Sink that records every write for assertions.
    #[derive(Default)]
    struct RecordingSink {
        writes: Rc<RefCell<Vec<Write>>>,
    }

    impl ParameterSink for RecordingSink {
        fn write_ripple(&mut self, params: &RippleParams) {
            self.writes.borrow_mut().push(Write::Ripple(*params));
        }

        fn write_flag(&mut self, flag: EffectFlag, enabled: bool) {
            self.writes.borrow_mut().push(Write::Flag(flag, enabled));
        }
    }

    fn bound_controller() -> (ForcefieldController, Rc<RefCell<Vec<Write>>>) {
        let mut controller = ForcefieldController::new(ImpactConfig::default()).unwrap();
        let sink = RecordingSink::default();
        let writes = sink.writes.clone();
        controller.bind(Box::new(sink));
        writes.borrow_mut().clear();
        (controller, writes)
    }

    #[test]
    fn test_unbound_operations_are_noops() {
        let mut controller = ForcefieldController::new(ImpactConfig::default()).unwrap();
        assert!(!controller.is_bound());

        controller.apply_impact(Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
        controller.dampen(0.1);
        controller.set_flag(EffectFlag::RimGlow, true);

        assert_eq!(controller.effect().amplitude(), 0.0);
        assert!(!controller.effect().is_flag_enabled(EffectFlag::RimGlow));
    }

    #[test]
    fn test_bind_pushes_current_state() {
        let mut controller = ForcefieldController::new(ImpactConfig::default()).unwrap();
        let sink = RecordingSink::default();
        let writes = sink.writes.clone();
        controller.bind(Box::new(sink));

        // One ripple write plus one write per flag.
        let recorded = writes.borrow();
        assert_eq!(recorded.len(), 1 + EffectFlag::ALL.len());
        assert!(matches!(recorded[0], Write::Ripple(_)));
    }

    #[test]
    fn test_impact_writes_full_ripple_block() {
        let (mut controller, writes) = bound_controller();
        let point = Vec3::new(1.0, 2.0, 3.0);
        controller.apply_impact(point, Vec3::Y);

        let recorded = writes.borrow();
        assert_eq!(recorded.len(), 1);
        let Write::Ripple(params) = &recorded[0] else {
            panic!("expected a ripple write, got {:?}", recorded[0]);
        };
        assert!(params.enabled);
        assert_eq!(params.origin, point);
        assert_eq!(params.direction, Vec3::Y);
        assert_eq!(params.amplitude, controller.effect().config().amplitude);
        assert_eq!(params.max_radius, controller.effect().config().max_radius);
    }

    #[test]
    fn test_rejected_impact_writes_nothing() {
        let (mut controller, writes) = bound_controller();
        controller.apply_impact(Vec3::ZERO, Vec3::ZERO);
        assert!(writes.borrow().is_empty());
    }

    #[test]
    fn test_same_tick_impacts_last_write_wins() {
        let (mut controller, writes) = bound_controller();
        controller.apply_impact(Vec3::new(1.0, 0.0, 0.0), Vec3::X);
        controller.apply_impact(Vec3::new(0.0, 0.0, 2.0), Vec3::Z);
        controller.dampen(0.0);

        // The dampen tick observes the second impact's state.
        assert_eq!(controller.effect().origin(), Vec3::new(0.0, 0.0, 2.0));
        let recorded = writes.borrow();
        let Some(Write::Ripple(last)) = recorded.last() else {
            panic!("expected ripple writes");
        };
        assert_eq!(last.origin, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(last.direction, Vec3::Z);
    }

    #[test]
    fn test_dampen_mirrors_only_changes() {
        let (mut controller, writes) = bound_controller();

        // Nothing to decay, nothing to write.
        controller.dampen(0.5);
        assert!(writes.borrow().is_empty());

        controller.apply_impact(Vec3::ZERO, Vec3::Y);
        writes.borrow_mut().clear();

        controller.dampen(0.0);
        assert!(writes.borrow().is_empty());

        controller.dampen(0.1);
        assert_eq!(writes.borrow().len(), 1);
    }

    #[test]
    fn test_auto_disable_reaches_sink() {
        let (mut controller, writes) = bound_controller();
        controller.apply_impact(Vec3::ZERO, Vec3::Y);
        writes.borrow_mut().clear();

        // Enough time for a full decay in one tick.
        controller.dampen(10.0);

        let recorded = writes.borrow();
        let Some(Write::Ripple(params)) = recorded.last() else {
            panic!("expected a ripple write");
        };
        assert!(!params.enabled);
        assert_eq!(params.amplitude, 0.0);
    }

    #[test]
    fn test_flag_toggle_mirrors_once() {
        let (mut controller, writes) = bound_controller();
        controller.set_flag(EffectFlag::ScanLine, true);
        controller.set_flag(EffectFlag::ScanLine, true);

        let recorded = writes.borrow();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], Write::Flag(EffectFlag::ScanLine, true));
    }

    #[test]
    fn test_unbind_then_rebind() {
        let (mut controller, _) = bound_controller();
        assert!(controller.unbind().is_some());
        assert!(!controller.is_bound());

        // Unbound again: operations no-op.
        controller.set_flag(EffectFlag::FillTexture, true);
        assert!(!controller.effect().is_flag_enabled(EffectFlag::FillTexture));

        let sink = RecordingSink::default();
        let writes = sink.writes.clone();
        controller.bind(Box::new(sink));
        assert!(controller.is_bound());
        assert!(!writes.borrow().is_empty());
    }
}
