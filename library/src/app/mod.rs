//! Cabinet application state and main loop
//!
//! The window shows the carousel menu until a game is launched. While the
//! game process runs the menu stops drawing and only keeps the mouse
//! parked; once the game exits the menu comes back where it was left.

mod init;

pub use init::AppError;

use std::time::{Duration, Instant};

use arcade_core::config::{self, Config, InputConfig};
use arcade_core::draw::{Bitmap, Canvas, Color, Rect};
use arcade_core::input::{InputSource, MenuKey};
use arcade_core::menu::{Flow, Menu, TipStyle};
use arcade_core::GameDescriptor;
use eframe::egui;

use crate::assets::AssetCache;
use crate::canvas::EguiCanvas;
use crate::input::{FrameInput, KeyBindings};
use crate::process::SystemLauncher;

/// Poll interval for the game process while the menu is hidden
const IN_GAME_POLL: Duration = Duration::from_millis(50);

/// Cabinet application state
pub struct App {
    /// User configuration
    config: Config,
    menu: Menu,
    assets: AssetCache,
    launcher: SystemLauncher,
    bindings: KeyBindings,
    #[cfg(feature = "gamepad")]
    gamepad: Option<crate::input::GamepadInput>,
}

impl App {
    /// Loads artwork and builds the menu for `games`.
    pub fn new(ctx: &egui::Context, config: Config, games: Vec<GameDescriptor>) -> Self {
        let mut assets = AssetCache::new();

        let background = config
            .library
            .background
            .as_deref()
            .map(|path| assets.load_or_placeholder(ctx, path));
        let icon = load_tip_icon(ctx, &mut assets, &config);

        let mut menu = Menu::new(games).with_tip_style(TipStyle {
            duration: Duration::from_millis(config.tips.duration_ms),
            chars_per_line: config.tips.chars_per_line,
            icon,
            ..TipStyle::default()
        });
        menu.build_grid(background);
        menu.build_carousel(|game| assets.load_or_placeholder(ctx, &game.image_path()));

        if config.tips.show_controls {
            menu.show_tip(controls_text(&config.input));
        }

        #[cfg(feature = "gamepad")]
        let gamepad = if config.input.gamepad {
            crate::input::GamepadInput::new()
        } else {
            None
        };

        Self {
            bindings: KeyBindings::from_config(&config.input),
            config,
            menu,
            assets,
            launcher: SystemLauncher::new(),
            #[cfg(feature = "gamepad")]
            gamepad,
        }
    }

    fn read_input(&mut self, ctx: &egui::Context) -> FrameInput {
        #[allow(unused_mut)]
        let mut input = FrameInput::capture(ctx, &self.bindings);
        #[cfg(feature = "gamepad")]
        if let Some(gamepad) = &mut self.gamepad {
            input.extend(gamepad.poll());
        }
        input
    }

    fn toggle_fullscreen(&mut self, ctx: &egui::Context) {
        let is_fullscreen = ctx.input(|i| i.viewport().fullscreen).unwrap_or(false);
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!is_fullscreen));
        self.config.video.fullscreen = !is_fullscreen;
        if let Err(e) = config::save(&self.config) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    /// Keeps the cursor parked while a game runs.
    fn supervise_game(&mut self, ctx: &egui::Context, input: &FrameInput) {
        if let Some(target) = self
            .menu
            .supervise_mouse(input.mouse_position(), &mut self.launcher)
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CursorPosition(egui::pos2(
                target.x, target.y,
            )));
        }
        ctx.request_repaint_after(IN_GAME_POLL);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle F11 for fullscreen toggle
        if ctx.input(|i| i.key_pressed(egui::Key::F11)) {
            self.toggle_fullscreen(ctx);
        }

        let input = self.read_input(ctx);

        if self.menu.in_game() {
            self.supervise_game(ctx, &input);
            return;
        }

        let painter = ctx.layer_painter(egui::LayerId::background());
        let mut canvas = EguiCanvas::new(painter, &self.assets);
        let screen = canvas.screen_size();
        canvas.fill_rect(Color::BLACK, Rect::new(0.0, 0.0, screen.x, screen.y));

        let flow = self
            .menu
            .draw_frame(&mut canvas, &input, &mut self.launcher, Instant::now());
        if flow == Flow::Launched {
            ctx.request_repaint_after(IN_GAME_POLL);
        } else {
            ctx.request_repaint();
        }
    }
}

fn load_tip_icon(ctx: &egui::Context, assets: &mut AssetCache, config: &Config) -> Option<Bitmap> {
    let path = config.tips.icon.as_deref()?;
    let loaded = match config.tips.icon_cell_width {
        Some(cell_width) => assets.load_sheet(ctx, path, cell_width),
        None => assets.load(ctx, path),
    };
    loaded
        .inspect_err(|e| tracing::warn!("Tips will use game artwork: {}", e))
        .ok()
}

/// Startup hint naming the configured keys.
fn controls_text(input: &InputConfig) -> String {
    format!(
        "{} / {} to browse, {} for details and again to play, {} to go back",
        input.binding(MenuKey::Left),
        input.binding(MenuKey::Right),
        input.binding(MenuKey::Confirm),
        input.binding(MenuKey::Cancel),
    )
}

/// Run the cabinet front-end
pub fn run(config: Config, games: Vec<GameDescriptor>) -> Result<(), AppError> {
    tracing::info!("Starting arcade machine with {} games", games.len());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Arcade Machine")
            .with_inner_size([config.video.width as f32, config.video.height as f32])
            .with_fullscreen(config.video.fullscreen),
        ..Default::default()
    };

    eframe::run_native(
        "Arcade Machine",
        native_options,
        Box::new(move |cc| Ok(Box::new(App::new(&cc.egui_ctx, config, games)))),
    )?;

    Ok(())
}
