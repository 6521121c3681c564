//! Input aggregation.
//!
//! Keyboard, pointer-lock mouse deltas and the virtual joystick arrive as
//! [`FlightIntent`]s. The aggregator folds them into held state and produces
//! one [`ControlSignal`] per frame.

use serde::{Deserialize, Serialize};

use crate::flight::FlightTuning;

/// Logical flight keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalKey {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
}

impl LogicalKey {
    /// Maps a DOM `KeyboardEvent.key` value to a logical key.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(Self::Forward),
            "s" => Some(Self::Back),
            "a" => Some(Self::StrafeLeft),
            "d" => Some(Self::StrafeRight),
            " " | "space" => Some(Self::Ascend),
            "shift" => Some(Self::Descend),
            _ => None,
        }
    }
}

/// On-screen vertical thrust buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalButton {
    Up,
    Down,
}

/// A single input event queued by the host for the next tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlightIntent {
    Key { key: LogicalKey, pressed: bool },
    /// Relative pointer motion in CSS pixels.
    MouseLook { dx: f32, dy: f32 },
    PointerLock { locked: bool },
    /// Joystick vector, y up.
    Joystick { x: f32, y: f32 },
    JoystickButton { button: VerticalButton, pressed: bool },
    /// Return every held input to neutral.
    Reset,
}

/// Held keyboard state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub ascend: bool,
    pub descend: bool,
}

impl KeyState {
    pub fn set(&mut self, key: LogicalKey, pressed: bool) {
        match key {
            LogicalKey::Forward => self.forward = pressed,
            LogicalKey::Back => self.back = pressed,
            LogicalKey::StrafeLeft => self.strafe_left = pressed,
            LogicalKey::StrafeRight => self.strafe_right = pressed,
            LogicalKey::Ascend => self.ascend = pressed,
            LogicalKey::Descend => self.descend = pressed,
        }
    }
}

/// Virtual joystick vector clamped to the unit circle, plus momentary buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JoystickVector {
    pub x: f32,
    pub y: f32,
    pub up: bool,
    pub down: bool,
}

impl JoystickVector {
    /// Converts a pointer offset from the joystick centre (screen space, y
    /// down) into a knob offset clamped to `radius` and a unit vector (y up).
    ///
    /// Returns `((knob_x, knob_y), (x, y))`.
    pub fn from_offset(dx: f32, dy: f32, radius: f32) -> ((f32, f32), (f32, f32)) {
        if radius <= 0.0 || !dx.is_finite() || !dy.is_finite() {
            return ((0.0, 0.0), (0.0, 0.0));
        }
        let distance = dx.hypot(dy);
        let (knob_x, knob_y) = if distance > radius {
            let scale = radius / distance;
            (dx * scale, dy * scale)
        } else {
            (dx, dy)
        };
        let x = (knob_x / radius).clamp(-1.0, 1.0);
        let y = (-knob_y / radius).clamp(-1.0, 1.0);
        ((knob_x, knob_y), (x, y))
    }

    /// Stores an axis pair, clamping its length to 1.
    pub fn set_axes(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            self.x = 0.0;
            self.y = 0.0;
            return;
        }
        let length = x.hypot(y);
        if length > 1.0 {
            self.x = x / length;
            self.y = y / length;
        } else {
            self.x = x;
            self.y = y;
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && !self.up && !self.down
    }
}

/// Per-frame control signal.
///
/// Movement fields are sums of the keyboard and joystick contributions, in
/// units of the base speed. Rotation deltas are in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSignal {
    /// Strafe, positive right.
    pub move_x: f32,
    /// Longitudinal, negative forward.
    pub move_z: f32,
    pub move_up: f32,
    pub move_down: f32,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    /// Sustained forward thrust (drives the cosmetic boost flame).
    pub boosting: bool,
}

impl ControlSignal {
    pub fn is_idle(&self) -> bool {
        self.move_x == 0.0
            && self.move_z == 0.0
            && self.move_up == 0.0
            && self.move_down == 0.0
            && self.yaw_delta == 0.0
            && self.pitch_delta == 0.0
    }
}

/// Folds queued intents into held state and emits control signals.
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    keys: KeyState,
    joystick: JoystickVector,
    pointer_locked: bool,
    pending_dx: f32,
    pending_dy: f32,
    boosting: bool,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> KeyState {
        self.keys
    }

    pub fn joystick(&self) -> JoystickVector {
        self.joystick
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn boosting(&self) -> bool {
        self.boosting
    }

    /// Applies one intent.
    ///
    /// While controls are disabled only releases are honoured; presses, mouse
    /// motion and non-neutral joystick vectors are dropped so nothing stale
    /// replays when controls come back.
    pub fn apply(&mut self, intent: FlightIntent, controls_enabled: bool) {
        match intent {
            FlightIntent::Key { key, pressed } => {
                if pressed && !controls_enabled {
                    return;
                }
                self.keys.set(key, pressed);
            }
            FlightIntent::MouseLook { dx, dy } => {
                if !controls_enabled || !self.pointer_locked {
                    return;
                }
                if dx.is_finite() && dy.is_finite() {
                    self.pending_dx += dx;
                    self.pending_dy += dy;
                }
            }
            FlightIntent::PointerLock { locked } => {
                self.pointer_locked = locked;
                if !locked {
                    self.pending_dx = 0.0;
                    self.pending_dy = 0.0;
                }
            }
            FlightIntent::Joystick { x, y } => {
                if !controls_enabled {
                    self.joystick.x = 0.0;
                    self.joystick.y = 0.0;
                    return;
                }
                self.joystick.set_axes(x, y);
            }
            FlightIntent::JoystickButton { button, pressed } => {
                if pressed && !controls_enabled {
                    return;
                }
                match button {
                    VerticalButton::Up => self.joystick.up = pressed,
                    VerticalButton::Down => self.joystick.down = pressed,
                }
            }
            FlightIntent::Reset => self.reset(),
        }
    }

    /// Returns every held input to neutral and discards pending mouse motion.
    pub fn reset(&mut self) {
        self.keys = KeyState::default();
        self.joystick = JoystickVector::default();
        self.pending_dx = 0.0;
        self.pending_dy = 0.0;
    }

    /// Builds this frame's control signal, consuming accumulated mouse motion.
    pub fn signal(&mut self, tuning: &FlightTuning) -> ControlSignal {
        let keys = self.keys;
        let joystick = self.joystick;
        let deadzone = tuning.joystick_deadzone;

        let mut move_x = 0.0;
        let mut move_z = 0.0;
        let mut move_up = 0.0;
        let mut move_down = 0.0;

        if keys.forward {
            move_z -= 1.0;
        }
        if keys.back {
            move_z += 1.0;
        }
        if keys.strafe_left {
            move_x -= 1.0;
        }
        if keys.strafe_right {
            move_x += 1.0;
        }
        if keys.ascend {
            move_up += 1.0;
        }
        if keys.descend {
            move_down += 1.0;
        }
        if joystick.y.abs() > deadzone {
            move_z -= joystick.y;
        }
        if joystick.x.abs() > deadzone {
            move_x += joystick.x;
        }
        if joystick.up {
            move_up += 1.0;
        }
        if joystick.down {
            move_down += 1.0;
        }

        let yaw_delta = -self.pending_dx * tuning.mouse_sensitivity;
        let pitch_delta = -self.pending_dy * tuning.mouse_sensitivity;
        self.pending_dx = 0.0;
        self.pending_dy = 0.0;

        ControlSignal {
            move_x,
            move_z,
            move_up,
            move_down,
            yaw_delta,
            pitch_delta,
            boosting: keys.forward || joystick.y > tuning.boost_threshold,
        }
    }

    /// Records the boosting flag, returning the new value only on a transition.
    pub fn update_boosting(&mut self, boosting: bool) -> Option<bool> {
        if self.boosting == boosting {
            return None;
        }
        self.boosting = boosting;
        Some(boosting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: LogicalKey, pressed: bool) -> FlightIntent {
        FlightIntent::Key { key, pressed }
    }

    #[test]
    fn test_key_names() {
        assert_eq!(LogicalKey::from_key_name("W"), Some(LogicalKey::Forward));
        assert_eq!(LogicalKey::from_key_name(" "), Some(LogicalKey::Ascend));
        assert_eq!(LogicalKey::from_key_name("Shift"), Some(LogicalKey::Descend));
        assert_eq!(LogicalKey::from_key_name("q"), None);
    }

    #[test]
    fn test_mouse_ignored_without_pointer_lock() {
        let tuning = FlightTuning::default();
        let mut input = InputAggregator::new();

        input.apply(FlightIntent::MouseLook { dx: 100.0, dy: 0.0 }, true);
        assert_eq!(input.signal(&tuning).yaw_delta, 0.0);

        input.apply(FlightIntent::PointerLock { locked: true }, true);
        input.apply(FlightIntent::MouseLook { dx: 100.0, dy: -20.0 }, true);
        let signal = input.signal(&tuning);
        assert!((signal.yaw_delta + 100.0 * tuning.mouse_sensitivity).abs() < 1e-6);
        assert!((signal.pitch_delta - 20.0 * tuning.mouse_sensitivity).abs() < 1e-6);

        // Deltas are consumed by the frame that reads them.
        assert_eq!(input.signal(&tuning).yaw_delta, 0.0);
    }

    #[test]
    fn test_mouse_ignored_while_controls_disabled() {
        let tuning = FlightTuning::default();
        let mut input = InputAggregator::new();
        input.apply(FlightIntent::PointerLock { locked: true }, true);
        input.apply(FlightIntent::MouseLook { dx: 50.0, dy: 50.0 }, false);
        assert!(input.signal(&tuning).is_idle());
    }

    #[test]
    fn test_joystick_clamped_to_unit_circle() {
        let mut input = InputAggregator::new();
        input.apply(FlightIntent::Joystick { x: 3.0, y: 4.0 }, true);
        let joystick = input.joystick();
        assert!((joystick.x.hypot(joystick.y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_joystick_deadzone() {
        let tuning = FlightTuning::default();
        let mut input = InputAggregator::new();
        input.apply(FlightIntent::Joystick { x: 0.01, y: -0.015 }, true);
        let signal = input.signal(&tuning);
        assert_eq!(signal.move_x, 0.0);
        assert_eq!(signal.move_z, 0.0);
    }

    #[test]
    fn test_joystick_offset_conversion() {
        let ((kx, ky), (x, y)) = JoystickVector::from_offset(0.0, -96.0, 48.0);
        assert_eq!((kx, ky), (0.0, -48.0));
        assert!((x - 0.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sources_are_additive() {
        let tuning = FlightTuning::default();
        let mut input = InputAggregator::new();
        input.apply(key(LogicalKey::Forward, true), true);
        input.apply(FlightIntent::Joystick { x: 0.5, y: 0.5 }, true);
        input.apply(key(LogicalKey::Ascend, true), true);
        input.apply(
            FlightIntent::JoystickButton {
                button: VerticalButton::Up,
                pressed: true,
            },
            true,
        );

        let signal = input.signal(&tuning);
        assert!((signal.move_z + 1.5).abs() < 1e-6);
        assert!((signal.move_x - 0.5).abs() < 1e-6);
        assert_eq!(signal.move_up, 2.0);
        assert!(signal.boosting);
    }

    #[test]
    fn test_presses_dropped_while_disabled_releases_kept() {
        let tuning = FlightTuning::default();
        let mut input = InputAggregator::new();
        input.apply(key(LogicalKey::Back, true), false);
        assert!(input.signal(&tuning).is_idle());

        input.apply(key(LogicalKey::Back, true), true);
        input.apply(key(LogicalKey::Back, false), false);
        assert!(input.signal(&tuning).is_idle());
    }

    #[test]
    fn test_reset_returns_to_neutral() {
        let tuning = FlightTuning::default();
        let mut input = InputAggregator::new();
        input.apply(key(LogicalKey::StrafeLeft, true), true);
        input.apply(FlightIntent::Joystick { x: -0.7, y: 0.2 }, true);
        input.reset();

        assert!(input.joystick().is_neutral());
        assert!(input.signal(&tuning).is_idle());
    }

    #[test]
    fn test_boosting_reports_transitions_once() {
        let mut input = InputAggregator::new();
        assert_eq!(input.update_boosting(false), None);
        assert_eq!(input.update_boosting(true), Some(true));
        assert_eq!(input.update_boosting(true), None);
        assert_eq!(input.update_boosting(false), Some(false));
    }
}
