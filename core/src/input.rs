//! Input collaborator

use glam::Vec2;

/// Logical menu keys. The front-end maps physical keys and gamepad buttons
/// onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKey {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Cancel,
}

impl MenuKey {
    pub const ALL: [MenuKey; 6] = [
        MenuKey::Left,
        MenuKey::Right,
        MenuKey::Up,
        MenuKey::Down,
        MenuKey::Confirm,
        MenuKey::Cancel,
    ];
}

/// One frame's worth of input.
pub trait InputSource {
    /// True if `key` went down this frame (edge-triggered).
    fn key_typed(&self, key: MenuKey) -> bool;

    /// Current mouse position in screen pixels, or `None` when the pointer
    /// position is unknown (for example outside the window).
    fn mouse_position(&self) -> Option<Vec2>;
}
