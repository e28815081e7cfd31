//! Pad state for the frame, gathered from Bevy gamepads and the keyboard.
//!
//! ## Pipeline
//!
//! 1. [`gamepad_connection_system`] logs connects and disconnects.
//! 2. [`gather_pad_inputs_system`] rebuilds [`PadInputs`] from every
//!    connected [`Gamepad`] (ordered by entity, so pad 0 is the first one
//!    Bevy saw) and overlays the keyboard onto pad 0.
//!
//! Everything downstream reads [`PadInputs`] through
//! [`InputSource`]; tests fill it directly with [`PadInputs::press`] and
//! [`PadInputs::set_stick`].
//!
//! ## Keyboard layout (pad 0)
//!
//! | Key | Pad input |
//! |-----|-----------|
//! | W A S D | left stick |
//! | arrow keys | right stick |
//! | Space | A |
//! | Escape | B |
//! | J | right trigger |
//! | K | X |
//! | L | Y |
//! | Enter | Start |

use crate::services::{InputSource, PadButton, Stick};
use bevy::input::gamepad::{
    GamepadAxis, GamepadButton, GamepadConnection, GamepadConnectionEvent,
};
use bevy::prelude::*;

/// Pads tracked at once.
pub const MAX_PADS: usize = 4;

fn bit(button: PadButton) -> u8 {
    1 << match button {
        PadButton::A => 0,
        PadButton::B => 1,
        PadButton::X => 2,
        PadButton::Y => 3,
        PadButton::RightTrigger => 4,
        PadButton::Start => 5,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PadState {
    left: Vec2,
    right: Vec2,
    held: u8,
    triggered: u8,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PadInputs {
    pads: [PadState; MAX_PADS],
}

impl PadInputs {
    /// Forget everything, as at the start of a frame.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_stick(&mut self, pad: usize, stick: Stick, value: Vec2) {
        if let Some(state) = self.pads.get_mut(pad) {
            let value = value.clamp(Vec2::NEG_ONE, Vec2::ONE);
            match stick {
                Stick::Left => state.left = value,
                Stick::Right => state.right = value,
            }
        }
    }

    /// Held this frame and pressed on this frame.
    pub fn press(&mut self, pad: usize, button: PadButton) {
        if let Some(state) = self.pads.get_mut(pad) {
            state.held |= bit(button);
            state.triggered |= bit(button);
        }
    }

    /// Held this frame, pressed on an earlier one.
    pub fn hold(&mut self, pad: usize, button: PadButton) {
        if let Some(state) = self.pads.get_mut(pad) {
            state.held |= bit(button);
        }
    }

    pub fn release(&mut self, pad: usize, button: PadButton) {
        if let Some(state) = self.pads.get_mut(pad) {
            state.held &= !bit(button);
            state.triggered &= !bit(button);
        }
    }

    /// Turn this frame's presses into plain holds.
    pub fn end_frame(&mut self) {
        for state in &mut self.pads {
            state.triggered = 0;
        }
    }
}

impl InputSource for PadInputs {
    fn stick(&self, pad: usize, stick: Stick) -> Vec2 {
        self.pads.get(pad).map_or(Vec2::ZERO, |s| match stick {
            Stick::Left => s.left,
            Stick::Right => s.right,
        })
    }

    fn is_held(&self, pad: usize, button: PadButton) -> bool {
        self.pads.get(pad).is_some_and(|s| s.held & bit(button) != 0)
    }

    fn is_triggered(&self, pad: usize, button: PadButton) -> bool {
        self.pads
            .get(pad)
            .is_some_and(|s| s.triggered & bit(button) != 0)
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

pub fn gamepad_connection_system(mut events: MessageReader<GamepadConnectionEvent>) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { name, .. } => {
                info!("[gamepad] {:?} connected ({name})", event.gamepad);
            }
            GamepadConnection::Disconnected => {
                info!("[gamepad] {:?} disconnected", event.gamepad);
            }
        }
    }
}

const PAD_BUTTONS: [(GamepadButton, PadButton); 6] = [
    (GamepadButton::South, PadButton::A),
    (GamepadButton::East, PadButton::B),
    (GamepadButton::West, PadButton::X),
    (GamepadButton::North, PadButton::Y),
    (GamepadButton::RightTrigger2, PadButton::RightTrigger),
    (GamepadButton::Start, PadButton::Start),
];

const KEY_BUTTONS: [(KeyCode, PadButton); 6] = [
    (KeyCode::Space, PadButton::A),
    (KeyCode::Escape, PadButton::B),
    (KeyCode::KeyK, PadButton::X),
    (KeyCode::KeyL, PadButton::Y),
    (KeyCode::KeyJ, PadButton::RightTrigger),
    (KeyCode::Enter, PadButton::Start),
];

fn key_axis(keys: &ButtonInput<KeyCode>, negative: KeyCode, positive: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(negative) {
        value -= 1.0;
    }
    if keys.pressed(positive) {
        value += 1.0;
    }
    value
}

/// Rebuild [`PadInputs`] for this frame.
///
/// The keyboard resource is optional so headless apps without an input
/// plugin can still run the match.
pub fn gather_pad_inputs_system(
    gamepads: Query<(Entity, &Gamepad)>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut inputs: ResMut<PadInputs>,
) {
    inputs.clear();

    let mut connected: Vec<_> = gamepads.iter().collect();
    connected.sort_by_key(|(entity, _)| *entity);

    for (pad, (_, gamepad)) in connected.into_iter().take(MAX_PADS).enumerate() {
        let axis = |a: GamepadAxis| gamepad.get(a).unwrap_or(0.0);
        inputs.set_stick(
            pad,
            Stick::Left,
            Vec2::new(axis(GamepadAxis::LeftStickX), axis(GamepadAxis::LeftStickY)),
        );
        inputs.set_stick(
            pad,
            Stick::Right,
            Vec2::new(axis(GamepadAxis::RightStickX), axis(GamepadAxis::RightStickY)),
        );
        for (source, button) in PAD_BUTTONS {
            if gamepad.just_pressed(source) {
                inputs.press(pad, button);
            } else if gamepad.pressed(source) {
                inputs.hold(pad, button);
            }
        }
    }

    let Some(keys) = keys else {
        return;
    };
    let walk = Vec2::new(
        key_axis(&keys, KeyCode::KeyA, KeyCode::KeyD),
        key_axis(&keys, KeyCode::KeyS, KeyCode::KeyW),
    );
    if walk != Vec2::ZERO {
        inputs.set_stick(0, Stick::Left, walk);
    }
    let look = Vec2::new(
        key_axis(&keys, KeyCode::ArrowLeft, KeyCode::ArrowRight),
        key_axis(&keys, KeyCode::ArrowDown, KeyCode::ArrowUp),
    );
    if look != Vec2::ZERO {
        inputs.set_stick(0, Stick::Right, look);
    }
    for (source, button) in KEY_BUTTONS {
        if keys.just_pressed(source) {
            inputs.press(0, button);
        } else if keys.pressed(source) {
            inputs.hold(0, button);
        }
    }
}
