//! Game selection menu
//!
//! One call to [`Menu::draw_frame`] per rendered frame polls input, updates
//! the menu state and draws. While a launched game runs, the front-end also
//! calls [`Menu::supervise_mouse`] each frame to keep the cursor parked.

pub mod carousel;
pub mod grid;
pub mod selector;
pub mod tip;

pub use carousel::{Carousel, CarouselNode, NodeIndex};
pub use grid::Grid;
pub use selector::{SelectMode, check_key_input};
pub use tip::{Anchor, Tip, TipState};

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::draw::{Animation, Bitmap, Canvas, Color, DrawOptions, FontStyle, Rect};
use crate::input::{InputSource, MenuKey};
use crate::library::GameDescriptor;
use crate::process::{LaunchRequest, ProcessHandle, ProcessLauncher};

pub const GRID_ROWS: usize = 8;
pub const GRID_COLS: usize = 14;

/// Grid row of the carousel slots
const CAROUSEL_ROW: usize = 2;
/// Grid columns of the previous, current and next slots
const CAROUSEL_COLS: [usize; 3] = [0, 5, 10];
/// Rows and columns covered by each slot
const CAROUSEL_SPAN: usize = 4;

/// A game started from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub handle: ProcessHandle,
    /// Index of the game in the menu's game list
    pub game: usize,
    pub started_at: Instant,
}

/// Everything the menu changes from frame to frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuState {
    /// Selected carousel node, `None` when no games are installed
    pub current: Option<NodeIndex>,
    /// Whether the detail panel for the current game is shown
    pub overlay_active: bool,
    /// Last mouse position seen while a game runs
    pub mouse_reference: Vec2,
    /// The running game, if any
    pub session: Option<GameSession>,
}

impl MenuState {
    pub fn in_game(&self) -> bool {
        self.session.is_some()
    }
}

/// Result of handling one frame of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A game was started; the rest of the frame is skipped.
    Launched,
}

/// How tips are built.
#[derive(Debug, Clone)]
pub struct TipStyle {
    pub duration: Duration,
    pub chars_per_line: usize,
    pub anchor: Anchor,
    /// Icon for tips; falls back to the selected game's image
    pub icon: Option<Bitmap>,
}

impl Default for TipStyle {
    fn default() -> Self {
        Self {
            duration: tip::DEFAULT_DURATION,
            chars_per_line: tip::DEFAULT_CHARS_PER_LINE,
            anchor: Anchor::default(),
            icon: None,
        }
    }
}

pub struct Menu {
    games: Vec<GameDescriptor>,
    carousel: Carousel,
    grid: Grid,
    state: MenuState,
    select_mode: SelectMode,
    tip_style: TipStyle,
    /// Tip texts waiting for the first frame that knows the screen size
    pending_tips: Vec<(String, Option<Bitmap>)>,
    tips: Vec<Tip>,
    screen: Vec2,
}

impl Menu {
    pub fn new(games: Vec<GameDescriptor>) -> Self {
        Self {
            games,
            carousel: Carousel::default(),
            grid: Grid::new(GRID_ROWS, GRID_COLS),
            state: MenuState::default(),
            select_mode: SelectMode::GameMenu,
            tip_style: TipStyle::default(),
            pending_tips: Vec::new(),
            tips: Vec::new(),
            screen: Vec2::ZERO,
        }
    }

    pub fn with_tip_style(mut self, style: TipStyle) -> Self {
        self.tip_style = style;
        self
    }

    pub fn games(&self) -> &[GameDescriptor] {
        &self.games
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn overlay_active(&self) -> bool {
        self.state.overlay_active
    }

    pub fn in_game(&self) -> bool {
        self.state.in_game()
    }

    pub fn tips(&self) -> &[Tip] {
        &self.tips
    }

    /// The game shown in the centre slot.
    pub fn current_game(&self) -> Option<&GameDescriptor> {
        let node = self.carousel.node(self.state.current?)?;
        self.games.get(node.game)
    }

    /// Resets the grid and sets its background.
    pub fn build_grid(&mut self, background: Option<Bitmap>) {
        self.grid = Grid::new(GRID_ROWS, GRID_COLS);
        if let Some(background) = background {
            self.grid.set_background(background);
        }
    }

    /// Builds the carousel ring from the game list, in list order.
    ///
    /// `image_for` supplies each game's carousel image from the asset cache.
    /// Slots placed from a previous ring are cleared; the background stays.
    pub fn build_carousel(&mut self, mut image_for: impl FnMut(&GameDescriptor) -> Bitmap) {
        self.carousel = Carousel::from_nodes(self.games.iter().enumerate().map(|(game, desc)| {
            CarouselNode {
                button: image_for(desc),
                game,
            }
        }));
        self.grid.clear();
        self.state.current = self.carousel.initial();
        self.state.overlay_active = false;
        tracing::info!("Carousel built with {} games", self.carousel.len());
    }

    /// Queues a tip. It is laid out and shown from the next drawn frame.
    pub fn show_tip(&mut self, text: impl Into<String>) {
        self.pending_tips.push((text.into(), None));
    }

    fn show_tip_with_image(&mut self, text: String, image: Bitmap) {
        self.pending_tips.push((text, Some(image)));
    }

    /// Places the previous, current and next games in the three carousel
    /// slots.
    pub fn layout_frame(&mut self) {
        let Some(current) = self.state.current else {
            return;
        };
        let slots = [
            self.carousel.previous(current),
            current,
            self.carousel.next(current),
        ];
        for (col, index) in CAROUSEL_COLS.into_iter().zip(slots) {
            if let Some(node) = self.carousel.node(index) {
                self.grid.update_cell(
                    node.button,
                    CAROUSEL_ROW,
                    col,
                    CAROUSEL_SPAN,
                    CAROUSEL_SPAN,
                );
            }
        }
    }

    /// Moves the selection and handles confirm/cancel.
    ///
    /// - Cancel with the panel open closes it.
    /// - Confirm with the panel closed opens it for the current game.
    /// - Confirm with the panel open launches the current game.
    ///
    /// `screen` is the current drawable size. A launch parks the mouse
    /// reference at its centre.
    pub fn handle_input(
        &mut self,
        input: &impl InputSource,
        launcher: &mut impl ProcessLauncher,
        screen: Vec2,
    ) -> Flow {
        self.screen = screen;
        let Some(current) = self.state.current else {
            return Flow::Continue;
        };
        if self.state.in_game() {
            return Flow::Continue;
        }

        let selected = check_key_input(input, &self.carousel, current, self.select_mode);
        if selected != current {
            tracing::debug!("Carousel moved {} -> {}", current, selected);
            self.state.current = Some(selected);
        }

        if input.key_typed(MenuKey::Cancel) && self.state.overlay_active {
            self.state.overlay_active = false;
        } else if input.key_typed(MenuKey::Confirm) {
            if self.state.overlay_active {
                if self.launch_current(launcher) {
                    return Flow::Launched;
                }
            } else {
                self.state.overlay_active = true;
            }
        }
        Flow::Continue
    }

    /// Starts the current game. On failure the menu stays up and a tip
    /// shows the error.
    fn launch_current(&mut self, launcher: &mut impl ProcessLauncher) -> bool {
        let Some(node) = self.state.current.and_then(|i| self.carousel.node(i)) else {
            return false;
        };
        let (game_index, button) = (node.game, node.button);
        let Some(game) = self.games.get(game_index) else {
            return false;
        };

        let request = LaunchRequest::for_game(game);
        self.state.mouse_reference = self.screen_center();

        match launcher.launch(&request) {
            Ok(handle) => {
                tracing::info!(
                    "Launched '{}' ({}) as process {}",
                    game.title,
                    request.program.display(),
                    handle
                );
                self.state.session = Some(GameSession {
                    handle,
                    game: game_index,
                    started_at: Instant::now(),
                });
                true
            }
            Err(e) => {
                tracing::error!("Failed to launch '{}': {}", game.title, e);
                let message = format!("Could not start {}: {}", game.title, e);
                self.show_tip_with_image(message, button);
                false
            }
        }
    }

    /// Runs one menu frame: input, carousel layout, grid, detail panel and
    /// tips.
    pub fn draw_frame(
        &mut self,
        canvas: &mut impl Canvas,
        input: &impl InputSource,
        launcher: &mut impl ProcessLauncher,
        now: Instant,
    ) -> Flow {
        if self.handle_input(input, launcher, canvas.screen_size()) == Flow::Launched {
            return Flow::Launched;
        }

        self.layout_frame();
        self.grid.draw(canvas);

        if self.carousel.is_empty() {
            self.draw_empty(canvas);
        }
        if self.state.overlay_active
            && let Some(game) = self.current_game()
        {
            draw_overlay(canvas, game);
        }

        self.draw_tips(canvas, now);
        Flow::Continue
    }

    fn draw_empty(&self, canvas: &mut impl Canvas) {
        let size = self.screen.y / 20.0;
        canvas.draw_text(
            "No games installed",
            Color::WHITE,
            FontStyle::Title,
            size,
            Vec2::new(self.screen.x / 14.0, self.screen.y / 2.0 - size / 2.0),
        );
    }

    fn draw_tips(&mut self, canvas: &mut impl Canvas, now: Instant) {
        for (text, image) in std::mem::take(&mut self.pending_tips) {
            if let Some(tip) = self.make_tip(text, image) {
                self.tips.push(tip);
            }
        }
        for tip in &mut self.tips {
            tip.draw_at(canvas, now);
        }
        self.tips.retain(|tip| !tip.is_expired(now));
    }

    fn make_tip(&self, text: String, image: Option<Bitmap>) -> Option<Tip> {
        let current_image = || {
            self.state
                .current
                .and_then(|i| self.carousel.node(i))
                .map(|node| node.button)
        };
        let Some(icon) = image.or(self.tip_style.icon).or_else(current_image) else {
            tracing::debug!("Dropping tip without an icon: {}", text);
            return None;
        };

        let mut tip = Tip::new(text, icon, self.screen)
            .with_duration(self.tip_style.duration)
            .with_chars_per_line(self.tip_style.chars_per_line)
            .with_anchor(self.tip_style.anchor);
        if icon.cell_count > 1 {
            tip = tip.with_animation(Animation::for_strip(&icon, 6), DrawOptions::default());
        }
        Some(tip)
    }

    fn screen_center(&self) -> Vec2 {
        self.screen / 2.0
    }

    /// Keeps the cursor parked while a launched game runs.
    ///
    /// Polls the game process; once it has exited the session ends and
    /// nothing more is done. Otherwise, if the mouse has moved away from the
    /// last recorded position, returns the screen centre to warp it to and
    /// records the position it was found at. With no known pointer position
    /// the process is still polled but the mouse is left alone.
    pub fn supervise_mouse(
        &mut self,
        mouse: Option<Vec2>,
        launcher: &mut impl ProcessLauncher,
    ) -> Option<Vec2> {
        let session = self.state.session.as_ref()?;

        if !launcher.is_running(session.handle) {
            let title = self
                .games
                .get(session.game)
                .map(|g| g.title.as_str())
                .unwrap_or("game");
            tracing::info!(
                "'{}' exited after {:.1}s",
                title,
                session.started_at.elapsed().as_secs_f32()
            );
            self.state.session = None;
            return None;
        }

        let mouse = mouse?;
        if mouse != self.state.mouse_reference {
            self.state.mouse_reference = mouse;
            return Some(self.screen_center());
        }
        None
    }
}

/// Detail panel over the right half of the screen.
fn draw_overlay(canvas: &mut impl Canvas, game: &GameDescriptor) {
    let Vec2 { x: w, y: h } = canvas.screen_size();
    let x_offset = w / 2.0 + w / 14.0;
    let mut y_start = h / 6.0;
    let y_offset = h / 40.0;

    canvas.fill_rect(
        Color::BLACK.with_alpha(0.8),
        Rect::new(w / 2.0, 0.0, w / 2.0, h),
    );
    canvas.draw_text(
        &game.title,
        Color::WHITE,
        FontStyle::Title,
        y_offset * 3.0,
        Vec2::new(x_offset, y_start),
    );
    y_start += y_offset * 3.0;

    let details = [
        ("Author", &game.author),
        ("Genre", &game.genre),
        ("Language", &game.language),
        ("Rating", &game.rating),
        ("Repository", &game.repo),
    ];
    for (i, (label, value)) in details.into_iter().enumerate() {
        canvas.draw_text(
            &format!("{}: {}", label, value),
            Color::WHITE,
            FontStyle::Text,
            y_offset,
            Vec2::new(x_offset, y_start + (i + 1) as f32 * y_offset),
        );
    }
}
