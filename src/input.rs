use bevy::input::ButtonInput;
use bevy::math::Vec2;
use bevy::prelude::KeyCode;

/// Hold-state of the four steering directions for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct DirectionalKeys {
    pub(crate) up: bool,
    pub(crate) down: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
}

impl DirectionalKeys {
    pub(crate) fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> DirectionalKeys {
        DirectionalKeys {
            up: keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
            down: keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
            left: keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
            right: keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        }
    }

    /// Overwrites the velocity axis of every held direction with `speed`.
    /// Released keys leave the velocity alone so it decays through friction.
    pub(crate) fn apply(self, velocity: &mut Vec2, speed: f32) {
        if self.up {
            velocity.y = speed;
        }
        if self.down {
            velocity.y = -speed;
        }
        if self.left {
            velocity.x = -speed;
        }
        if self.right {
            velocity.x = speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_overwrite_velocity() {
        let mut velocity = Vec2::new(1.2, -0.4);
        let keys = DirectionalKeys {
            up: true,
            left: true,
            ..Default::default()
        };
        keys.apply(&mut velocity, 5.);
        assert_eq!(Vec2::new(-5., 5.), velocity);
    }

    #[test]
    fn no_keys_leaves_velocity() {
        let mut velocity = Vec2::new(3., 2.);
        DirectionalKeys::default().apply(&mut velocity, 5.);
        assert_eq!(Vec2::new(3., 2.), velocity);
    }

    #[test]
    fn opposite_keys_last_one_wins() {
        let mut velocity = Vec2::ZERO;
        let keys = DirectionalKeys {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        keys.apply(&mut velocity, 5.);
        assert_eq!(Vec2::new(5., -5.), velocity);
    }

    #[test]
    fn reads_wasd_and_arrows() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::ArrowRight);

        let keys = DirectionalKeys::from_keyboard(&keyboard);
        assert_eq!(
            DirectionalKeys {
                up: true,
                right: true,
                ..Default::default()
            },
            keys
        );
    }
}
