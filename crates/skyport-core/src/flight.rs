//! Kinematic ship motion.
//!
//! One call to [`step`] per animation frame. Constants are per-frame, not
//! per-second: the scene is driven by the display refresh.

use std::f32::consts::PI;

use bevy::math::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::input::ControlSignal;

/// Ship start pose used at scene mount.
pub const START_POSITION: Vec3 = Vec3::new(0.0, 2.0, -20.0);

/// Flight model constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    /// Thrust impulse per frame for one full axis of input.
    pub speed: f32,
    /// Velocity multiplier applied every frame before thrust.
    pub damping: f32,
    /// Vertical thrust relative to `speed`.
    pub vertical_factor: f32,
    /// Velocity multiplier while controls are disabled.
    pub disabled_decay: f32,
    /// Radians per pixel of pointer motion.
    pub mouse_sensitivity: f32,
    pub max_pitch: f32,
    /// Joystick forward deflection above which the ship counts as boosting.
    pub boost_threshold: f32,
    pub joystick_deadzone: f32,
    /// Speeds below this snap to zero so the ship comes to a true rest.
    pub rest_epsilon: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            speed: 0.12,
            damping: 0.92,
            vertical_factor: 0.8,
            disabled_decay: 0.8,
            mouse_sensitivity: 0.0023,
            max_pitch: PI * 0.42,
            boost_threshold: 0.3,
            joystick_deadzone: 0.02,
            rest_epsilon: 1e-6,
        }
    }
}

impl FlightTuning {
    /// Upper bound of the speed reachable by holding one axis.
    pub fn terminal_speed(&self) -> f32 {
        self.speed / (1.0 - self.damping)
    }
}

/// Read-only snapshot of the ship published to other components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl ShipPose {
    /// Full visual orientation (yaw then pitch).
    pub fn rotation(&self) -> Quat {
        visual_rotation(self.yaw, self.pitch)
    }
}

/// Mutable ship state owned by the motion integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Radians, free-running.
    pub yaw: f32,
    /// Radians, clamped to `±max_pitch`.
    pub pitch: f32,
}

impl Default for ShipState {
    fn default() -> Self {
        Self::at(START_POSITION)
    }
}

impl ShipState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn pose(&self) -> ShipPose {
        ShipPose {
            position: self.position,
            velocity: self.velocity,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

/// Yaw-only rotation used for translation; pitch never tilts movement.
pub fn movement_rotation(yaw: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, 0.0, 0.0)
}

pub fn visual_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// Advances the ship by one frame and returns the pose to publish.
pub fn step(
    state: &mut ShipState,
    signal: &ControlSignal,
    bounds: &Bounds,
    tuning: &FlightTuning,
    controls_enabled: bool,
) -> ShipPose {
    if !controls_enabled {
        state.velocity *= tuning.disabled_decay;
        settle(&mut state.velocity, tuning.rest_epsilon);
        return state.pose();
    }

    if signal.yaw_delta.is_finite() && signal.pitch_delta.is_finite() {
        state.yaw += signal.yaw_delta;
        state.pitch =
            (state.pitch + signal.pitch_delta).clamp(-tuning.max_pitch, tuning.max_pitch);
    }

    let vertical = tuning.speed * tuning.vertical_factor;
    let direction = Vec3::new(
        signal.move_x * tuning.speed,
        (signal.move_up - signal.move_down) * vertical,
        signal.move_z * tuning.speed,
    );

    state.velocity *= tuning.damping;
    if direction.length_squared() > 0.0 {
        state.velocity += movement_rotation(state.yaw) * direction;
    }
    settle(&mut state.velocity, tuning.rest_epsilon);

    let candidate = state.position + state.velocity;
    if !candidate.is_finite() {
        tracing::warn!(
            "[skyport] rejecting non-finite ship position {:?}, holding {:?}",
            candidate,
            state.position
        );
        state.velocity = Vec3::ZERO;
        return state.pose();
    }

    state.position = bounds.clamp(candidate, &mut state.velocity);
    state.pose()
}

fn settle(velocity: &mut Vec3, epsilon: f32) {
    if !velocity.is_finite() || velocity.length() < epsilon {
        *velocity = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FlightIntent, InputAggregator, LogicalKey};

    fn forward_signal(tuning: &FlightTuning) -> ControlSignal {
        let mut input = InputAggregator::new();
        input.apply(
            FlightIntent::Key {
                key: LogicalKey::Forward,
                pressed: true,
            },
            true,
        );
        input.signal(tuning)
    }

    #[test]
    fn test_zero_input_decays_to_rest() {
        let bounds = Bounds::default();
        let tuning = FlightTuning::default();
        let mut state = ShipState::default();
        state.velocity = Vec3::new(0.8, 0.0, -0.6);

        let idle = ControlSignal::default();
        let mut previous_speed = state.velocity.length();
        let mut frames = 0;
        while state.velocity != Vec3::ZERO {
            step(&mut state, &idle, &bounds, &tuning, true);
            let speed = state.velocity.length();
            assert!(speed < previous_speed, "speed did not decrease at frame {frames}");
            previous_speed = speed;
            frames += 1;
            assert!(frames < 1000, "never came to rest");
        }

        let rest = state.position;
        step(&mut state, &idle, &bounds, &tuning, true);
        assert_eq!(state.position, rest);
    }

    #[test]
    fn test_holding_forward_converges_to_terminal_speed() {
        let bounds = Bounds::default();
        let tuning = FlightTuning::default();
        let signal = forward_signal(&tuning);
        let mut state = ShipState::default();

        let mut previous_vz = 0.0;
        for _ in 0..40 {
            step(&mut state, &signal, &bounds, &tuning, true);
            assert!(state.velocity.z < previous_vz);
            assert!(state.velocity.z.abs() <= tuning.terminal_speed() + 1e-4);
            previous_vz = state.velocity.z;
        }

        assert!((state.velocity.z + tuning.terminal_speed()).abs() < 0.1);
        assert!(state.position.z < START_POSITION.z);
        assert_eq!(state.velocity.x, 0.0);
    }

    #[test]
    fn test_pitch_does_not_tilt_translation() {
        let bounds = Bounds::new(500.0, -500.0, 500.0).unwrap();
        let tuning = FlightTuning::default();
        let mut signal = forward_signal(&tuning);
        signal.pitch_delta = 1.0;
        let mut state = ShipState::default();

        step(&mut state, &signal, &bounds, &tuning, true);
        assert_eq!(state.velocity.y, 0.0);
        assert!(state.pitch <= tuning.max_pitch);
    }

    #[test]
    fn test_yaw_rotates_thrust() {
        let bounds = Bounds::default();
        let tuning = FlightTuning::default();
        let mut signal = forward_signal(&tuning);
        signal.yaw_delta = std::f32::consts::FRAC_PI_2;
        let mut state = ShipState::default();

        step(&mut state, &signal, &bounds, &tuning, true);
        // Facing -z rotated a quarter turn left faces -x.
        assert!((state.velocity.x + tuning.speed).abs() < 1e-5);
        assert!(state.velocity.z.abs() < 1e-5);
    }

    #[test]
    fn test_large_overshoot_is_clamped() {
        let bounds = Bounds::default();
        let tuning = FlightTuning::default();
        let mut state = ShipState::at(Vec3::new(0.0, 2.0, 0.0));
        state.velocity = Vec3::new(200.0 / tuning.damping, 0.0, 0.0);

        step(&mut state, &ControlSignal::default(), &bounds, &tuning, true);

        assert!((state.position.x - 110.0).abs() < 1e-3);
        assert_eq!(state.position.y, 2.0);
        assert!(state.position.z.abs() < 1e-6);
        assert!((state.velocity.x - 200.0 * 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_bound_zeroes_vertical_velocity() {
        let bounds = Bounds::default();
        let tuning = FlightTuning::default();
        let mut input = InputAggregator::new();
        input.apply(
            FlightIntent::Key {
                key: LogicalKey::Ascend,
                pressed: true,
            },
            true,
        );
        let mut state = ShipState::default();

        for _ in 0..200 {
            let signal = input.signal(&tuning);
            step(&mut state, &signal, &bounds, &tuning, true);
            assert!(state.position.y >= bounds.min_y && state.position.y <= bounds.max_y);
            if state.position.y >= bounds.max_y {
                assert_eq!(state.velocity.y, 0.0);
            }
        }
        assert_eq!(state.position.y, bounds.max_y);
    }

    #[test]
    fn test_disabled_controls_hold_position() {
        let bounds = Bounds::default();
        let tuning = FlightTuning::default();
        let signal = forward_signal(&tuning);
        let mut state = ShipState::default();
        state.velocity = Vec3::new(0.0, 0.0, -1.0);
        let held = state.position;

        let pose = step(&mut state, &signal, &bounds, &tuning, false);
        assert_eq!(pose.position, held);
        assert!((state.velocity.z + 0.8).abs() < 1e-6);
        assert_eq!(state.yaw, 0.0);
    }

    #[test]
    fn test_non_finite_input_never_reaches_state() {
        let bounds = Bounds::default();
        let tuning = FlightTuning::default();
        let mut state = ShipState::default();
        let signal = ControlSignal {
            move_x: f32::NAN,
            ..ControlSignal::default()
        };

        let pose = step(&mut state, &signal, &bounds, &tuning, true);
        assert!(pose.position.is_finite());
        assert!(state.velocity.is_finite());
    }
}
