//! Impact state machine
//!
//! [`ImpactEffect`] owns the per-surface ripple state and the per-frame decay
//! model. An impact fully overwrites the ripple (last impact wins, no
//! accumulation); [`ImpactEffect::dampen`] then drives the amplitude back to
//! zero over the configured time and is the single place that auto-disables
//! the ripple flag.
//!
//! The state machine is pure: given the same sequence of `(dt, impacts)` per
//! tick it produces the same state, which the tests rely on.

use glam::Vec3;
use thiserror::Error;

use crate::effect::flags::{EffectFlag, EffectFlags};

/// Error produced when an [`ImpactConfig`] value is outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("ripple amplitude {0} is outside [0.002, 0.1]")]
    Amplitude(f32),
    #[error("ripple max radius {0} is outside (0.05, 0.5]")]
    MaxRadius(f32),
    #[error("dampen time {0} is outside [0.1, 5.0]")]
    DampenTime(f32),
}

/// Configuration for the impact effect. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactConfig {
    /// Displacement magnitude applied on impact. Range [0.002, 0.1]. Default: 0.005.
    pub amplitude: f32,
    /// Maximum ripple expansion radius. Range (0.05, 0.5]. Default: 0.35.
    pub max_radius: f32,
    /// Time in seconds for a full amplitude decay. Range [0.1, 5.0]. Default: 1.5.
    pub dampen_time: f32,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.005,
            max_radius: 0.35,
            dampen_time: 1.5,
        }
    }
}

impl ImpactConfig {
    /// Validate all values, rejecting out-of-range (or NaN) configuration.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(self.amplitude >= 0.002 && self.amplitude <= 0.1) {
            return Err(ConfigError::Amplitude(self.amplitude));
        }
        if !(self.max_radius > 0.05 && self.max_radius <= 0.5) {
            return Err(ConfigError::MaxRadius(self.max_radius));
        }
        if !(self.dampen_time >= 0.1 && self.dampen_time <= 5.0) {
            return Err(ConfigError::DampenTime(self.dampen_time));
        }
        Ok(self)
    }
}

/// Snapshot of the ripple render parameters, written to a sink as one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleParams {
    /// Whether the ripple sub-effect is enabled.
    pub enabled: bool,
    /// Current displacement magnitude.
    pub amplitude: f32,
    /// Configured maximum ripple radius.
    pub max_radius: f32,
    /// World-space point of the most recent impact.
    pub origin: Vec3,
    /// Unit surface normal at the most recent impact.
    pub direction: Vec3,
}

/// Per-surface impact effect state and decay model.
#[derive(Debug, Clone)]
pub struct ImpactEffect {
    config: ImpactConfig,
    amplitude: f32,
    origin: Vec3,
    direction: Vec3,
    flags: EffectFlags,
}

impl ImpactEffect {
    /// Create a new effect with validated configuration.
    pub fn new(config: ImpactConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self {
            config,
            amplitude: 0.0,
            origin: Vec3::ZERO,
            direction: Vec3::Y,
            flags: EffectFlags::empty(),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> ImpactConfig {
        self.config
    }

    /// Current ripple amplitude. Always >= 0.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// World-space origin of the most recent impact.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit surface normal of the most recent impact.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Check whether a sub-effect flag is enabled.
    pub fn is_flag_enabled(&self, flag: EffectFlag) -> bool {
        self.flags.contains(flag)
    }

    /// Get the full flag set.
    pub fn flags(&self) -> EffectFlags {
        self.flags
    }

    /// Snapshot the ripple render parameters.
    pub fn ripple_params(&self) -> RippleParams {
        RippleParams {
            enabled: self.flags.contains(EffectFlag::Ripple),
            amplitude: self.amplitude,
            max_radius: self.config.max_radius,
            origin: self.origin,
            direction: self.direction,
        }
    }

    /// Apply an impact at a world-space point with the given surface normal.
    ///
    /// Fully overwrites the ripple state: amplitude resets to the configured
    /// maximum, origin and direction are replaced, and the ripple flag turns
    /// on. Calling this several times in one tick keeps only the last call's
    /// values.
    ///
    /// Returns `false` (state unchanged) for a non-finite point or a
    /// degenerate normal.
    pub fn apply_impact(&mut self, point: Vec3, normal: Vec3) -> bool {
        if !point.is_finite() {
            tracing::warn!("rejecting impact with non-finite point {:?}", point);
            return false;
        }
        let Some(direction) = normal.try_normalize() else {
            tracing::warn!("rejecting impact with degenerate normal {:?}", normal);
            return false;
        };

        self.origin = point;
        self.direction = direction;
        self.amplitude = self.config.amplitude;
        self.flags.set(EffectFlag::Ripple, true);
        true
    }

    /// Advance the decay by `dt` seconds.
    ///
    /// The amplitude decreases by `config.amplitude * dt / dampen_time`,
    /// clamped so the step is monotonically non-increasing. When it reaches
    /// zero the ripple flag is disabled; this is the only place that happens
    /// automatically. `dampen(0.0)` changes nothing.
    pub fn dampen(&mut self, dt: f32) {
        let dt = if dt < 0.0 {
            tracing::warn!("negative frame delta {}; treating as zero", dt);
            0.0
        } else {
            dt
        };

        if self.amplitude <= 0.0 {
            return;
        }

        let step = self.config.amplitude * dt / self.config.dampen_time;
        // Upper clamp bound is the current amplitude: the step can never
        // raise it, whatever dt or the decay formula did.
        let new_amplitude = (self.amplitude - step).clamp(0.0, self.amplitude);

        if new_amplitude <= 0.0 {
            self.amplitude = 0.0;
            self.flags.set(EffectFlag::Ripple, false);
        } else {
            self.amplitude = new_amplitude;
        }
    }

    /// Enable or disable a sub-effect flag.
    ///
    /// Flags are independent of each other and of the decay, with one
    /// exception: enabling `Ripple` while the amplitude is zero is refused,
    /// since the ripple flag must track a live ripple. Use
    /// [`apply_impact`](Self::apply_impact) to start one.
    pub fn set_flag(&mut self, flag: EffectFlag, enabled: bool) {
        if flag == EffectFlag::Ripple && enabled && self.amplitude <= 0.0 {
            tracing::debug!("ignoring ripple enable with zero amplitude");
            return;
        }
        self.flags.set(flag, enabled);
    }
}
