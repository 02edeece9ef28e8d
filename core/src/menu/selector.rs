//! Carousel navigation

use crate::input::{InputSource, MenuKey};

use super::carousel::{Carousel, NodeIndex};

/// Which keys move the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Left/right, for the horizontal game carousel
    #[default]
    GameMenu,
    /// Up/down, for vertical lists
    List,
}

impl SelectMode {
    fn keys(self) -> (MenuKey, MenuKey) {
        match self {
            SelectMode::GameMenu => (MenuKey::Left, MenuKey::Right),
            SelectMode::List => (MenuKey::Up, MenuKey::Down),
        }
    }
}

/// Returns the node selected after this frame's input.
///
/// The "back" key moves to the previous node and the "forward" key to the
/// next one. No input, or both at once, leaves the selection unchanged.
/// Confirm and cancel are left to the caller.
pub fn check_key_input(
    input: &impl InputSource,
    carousel: &Carousel,
    current: NodeIndex,
    mode: SelectMode,
) -> NodeIndex {
    let (back, forward) = mode.keys();
    match (input.key_typed(back), input.key_typed(forward)) {
        (true, false) => carousel.previous(current),
        (false, true) => carousel.next(current),
        _ => current,
    }
}
