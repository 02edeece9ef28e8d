//! Keyboard and gamepad input for the menu
//!
//! Input is captured once per frame into a [`FrameInput`] snapshot, which
//! the menu then queries through [`InputSource`].

use arcade_core::config::InputConfig;
use arcade_core::input::{InputSource, MenuKey};
use eframe::egui;
use glam::Vec2;
use hashbrown::HashSet;

/// Physical key for each menu key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: Vec<(MenuKey, egui::Key)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

impl KeyBindings {
    /// Resolves configured key names. Unknown names fall back to the default
    /// key with a warning.
    pub fn from_config(config: &InputConfig) -> Self {
        let defaults = InputConfig::default();
        let keys = MenuKey::ALL
            .into_iter()
            .filter_map(|menu_key| {
                let name = config.binding(menu_key);
                let key = egui::Key::from_name(name).or_else(|| {
                    tracing::warn!(
                        "Unknown key name '{}' for {:?}, using '{}'",
                        name,
                        menu_key,
                        defaults.binding(menu_key)
                    );
                    egui::Key::from_name(defaults.binding(menu_key))
                })?;
                Some((menu_key, key))
            })
            .collect();
        Self { keys }
    }

    pub fn key_for(&self, menu_key: MenuKey) -> Option<egui::Key> {
        self.keys
            .iter()
            .find(|(k, _)| *k == menu_key)
            .map(|(_, key)| *key)
    }
}

/// One frame of menu input.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    typed: HashSet<MenuKey>,
    mouse: Option<Vec2>,
}

impl FrameInput {
    /// Reads key presses and the pointer position from this frame's egui input.
    pub fn capture(ctx: &egui::Context, bindings: &KeyBindings) -> Self {
        ctx.input(|i| {
            let typed = bindings
                .keys
                .iter()
                .filter(|(_, key)| i.key_pressed(*key))
                .map(|(menu_key, _)| *menu_key)
                .collect();
            let mouse = i
                .pointer
                .latest_pos()
                .map(|p| Vec2::new(p.x, p.y));
            Self { typed, mouse }
        })
    }

    /// Adds keys typed on another device this frame.
    pub fn extend(&mut self, keys: impl IntoIterator<Item = MenuKey>) {
        self.typed.extend(keys);
    }
}

impl InputSource for FrameInput {
    fn key_typed(&self, key: MenuKey) -> bool {
        self.typed.contains(&key)
    }

    fn mouse_position(&self) -> Option<Vec2> {
        self.mouse
    }
}

#[cfg(feature = "gamepad")]
pub use gamepad::GamepadInput;

#[cfg(feature = "gamepad")]
mod gamepad {
    use arcade_core::input::MenuKey;
    use gilrs::{Button, EventType, Gilrs};

    /// Gamepad buttons mapped onto menu keys.
    pub struct GamepadInput {
        gilrs: Gilrs,
    }

    impl GamepadInput {
        /// Returns `None` if gamepad support cannot be initialized.
        pub fn new() -> Option<Self> {
            match Gilrs::new() {
                Ok(gilrs) => Some(Self { gilrs }),
                Err(e) => {
                    tracing::warn!(
                        "Failed to initialize gamepad support: {}. Gamepads will not be available.",
                        e
                    );
                    None
                }
            }
        }

        /// Drains pending events, returning the menu keys pressed since the
        /// last poll.
        pub fn poll(&mut self) -> Vec<MenuKey> {
            std::iter::from_fn(|| self.gilrs.next_event())
                .filter_map(|event| match event.event {
                    EventType::Connected => {
                        tracing::info!("Gamepad {} connected", event.id);
                        None
                    }
                    EventType::Disconnected => {
                        tracing::info!("Gamepad {} disconnected", event.id);
                        None
                    }
                    EventType::ButtonPressed(button, _) => button_key(button),
                    _ => None,
                })
                .collect()
        }
    }

    pub(super) fn button_key(button: Button) -> Option<MenuKey> {
        match button {
            Button::DPadLeft | Button::LeftTrigger => Some(MenuKey::Left),
            Button::DPadRight | Button::RightTrigger => Some(MenuKey::Right),
            Button::DPadUp => Some(MenuKey::Up),
            Button::DPadDown => Some(MenuKey::Down),
            Button::South | Button::Start => Some(MenuKey::Confirm),
            Button::East | Button::Select => Some(MenuKey::Cancel),
            _ => None,
        }
    }
}
