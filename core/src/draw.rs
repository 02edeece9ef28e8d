//! Drawing collaborator
//!
//! The menu only issues drawing calls; the front-end owns every rendering
//! resource and hands out [`Bitmap`] handles from its asset cache.

use glam::Vec2;

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Largest rectangle with the given aspect that fits inside `self`, centered.
    pub fn fit(&self, content: Vec2) -> Rect {
        if content.x <= 0.0 || content.y <= 0.0 {
            return *self;
        }
        let scale = (self.w / content.x).min(self.h / content.y);
        let size = content * scale;
        Rect::new(
            self.x + (self.w - size.x) / 2.0,
            self.y + (self.h - size.y) / 2.0,
            size.x,
            size.y,
        )
    }
}

/// Opaque identifier of an image owned by the front-end's asset cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapId(pub u64);

/// Borrowed image handle.
///
/// A bitmap with more than one cell is a horizontal sprite strip; the cell
/// size is what gets laid out, the full size is what gets uploaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bitmap {
    pub id: BitmapId,
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub cell_count: usize,
}

impl Bitmap {
    /// A single-cell bitmap.
    pub fn new(id: BitmapId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            cell_width: width,
            cell_height: height,
            cell_count: 1,
        }
    }

    /// A horizontal strip of `cell_width`-wide cells.
    pub fn strip(id: BitmapId, width: u32, height: u32, cell_width: u32) -> Self {
        let cell_width = cell_width.clamp(1, width.max(1));
        Self {
            id,
            width,
            height,
            cell_width,
            cell_height: height,
            cell_count: (width / cell_width).max(1) as usize,
        }
    }

    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(self.cell_width as f32, self.cell_height as f32)
    }
}

/// Frame-advance state for a sprite strip.
///
/// `update` is called once per draw; every `frames_per_cell` updates the
/// displayed cell moves on, wrapping at `frame_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frame_count: usize,
    frames_per_cell: u32,
    frame: usize,
    tick: u32,
}

impl Animation {
    pub fn new(frame_count: usize, frames_per_cell: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frames_per_cell: frames_per_cell.max(1),
            frame: 0,
            tick: 0,
        }
    }

    /// Animation cycling through every cell of `bitmap`.
    pub fn for_strip(bitmap: &Bitmap, frames_per_cell: u32) -> Self {
        Self::new(bitmap.cell_count, frames_per_cell)
    }

    pub fn current_cell(&self) -> usize {
        self.frame
    }

    pub fn update(&mut self) {
        self.tick += 1;
        if self.tick >= self.frames_per_cell {
            self.tick = 0;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.tick = 0;
    }
}

/// Per-call bitmap options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawOptions {
    /// Cell of a sprite strip to draw (defaults to the first)
    pub cell: Option<usize>,
    /// Destination size (defaults to the cell size)
    pub size: Option<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Title,
    Text,
}

/// Drawing primitives provided by the front-end.
pub trait Canvas {
    /// Current drawable area in pixels.
    fn screen_size(&self) -> Vec2;

    fn fill_rect(&mut self, color: Color, rect: Rect);

    /// Draw `text` with its top-left corner at `pos`.
    fn draw_text(&mut self, text: &str, color: Color, font: FontStyle, size: f32, pos: Vec2);

    /// Draw `bitmap` with its top-left corner at `pos`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, pos: Vec2, options: &DrawOptions);
}
