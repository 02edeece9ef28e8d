//! egui implementation of the menu's drawing collaborator

use arcade_core::draw::{Bitmap, Canvas, Color, DrawOptions, FontStyle, Rect};
use eframe::egui;
use glam::Vec2;

use crate::assets::AssetCache;

/// Draws through a painter, resolving bitmaps against an [`AssetCache`].
pub struct EguiCanvas<'a> {
    painter: egui::Painter,
    assets: &'a AssetCache,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: egui::Painter, assets: &'a AssetCache) -> Self {
        Self { painter, assets }
    }
}

impl Canvas for EguiCanvas<'_> {
    fn screen_size(&self) -> Vec2 {
        let size = self.painter.clip_rect().size();
        Vec2::new(size.x, size.y)
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.painter
            .rect_filled(to_egui_rect(rect), 0.0, to_color32(color));
    }

    fn draw_text(&mut self, text: &str, color: Color, font: FontStyle, size: f32, pos: Vec2) {
        self.painter.text(
            egui::pos2(pos.x, pos.y),
            egui::Align2::LEFT_TOP,
            text,
            font_id(font, size),
            to_color32(color),
        );
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, pos: Vec2, options: &DrawOptions) {
        let Some(texture) = self.assets.texture(bitmap.id) else {
            tracing::trace!("No texture for bitmap {:?}", bitmap.id);
            return;
        };
        let size = options.size.unwrap_or_else(|| bitmap.cell_size());
        let rect = egui::Rect::from_min_size(egui::pos2(pos.x, pos.y), egui::vec2(size.x, size.y));
        self.painter.image(
            texture.id(),
            rect,
            cell_uv(bitmap, options.cell.unwrap_or(0)),
            egui::Color32::WHITE,
        );
    }
}

pub fn to_color32(color: Color) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    )
}

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(rect.x, rect.y), egui::vec2(rect.w, rect.h))
}

/// Titles use the proportional face; tip and detail text use the monospace
/// face so that line chunks line up.
fn font_id(font: FontStyle, size: f32) -> egui::FontId {
    match font {
        FontStyle::Title => egui::FontId::proportional(size),
        FontStyle::Text => egui::FontId::monospace(size),
    }
}

/// Texture coordinates of one cell of a sprite strip.
pub fn cell_uv(bitmap: &Bitmap, cell: usize) -> egui::Rect {
    if bitmap.width == 0 || bitmap.cell_count <= 1 {
        return egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    }
    let cell = cell.min(bitmap.cell_count - 1) as f32;
    let step = bitmap.cell_width as f32 / bitmap.width as f32;
    egui::Rect::from_min_max(
        egui::pos2(cell * step, 0.0),
        egui::pos2((cell + 1.0) * step, 1.0),
    )
}
