//! Screen grid layout
//!
//! Splits the screen into equal cells. Bitmaps are placed over a block of
//! cells and aspect-fitted into it when drawn.

use glam::Vec2;

use crate::draw::{Bitmap, Canvas, DrawOptions, Rect};

#[derive(Debug, Clone, PartialEq)]
struct Placement {
    bitmap: Bitmap,
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    background: Option<Bitmap>,
    placements: Vec<Placement>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            background: None,
            placements: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn set_background(&mut self, background: Bitmap) {
        self.background = Some(background);
    }

    pub fn background(&self) -> Option<&Bitmap> {
        self.background.as_ref()
    }

    /// Places `bitmap` over the block starting at (`row`, `col`), replacing
    /// whatever was placed there before. Blocks that do not fit are ignored.
    pub fn update_cell(
        &mut self,
        bitmap: Bitmap,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    ) {
        let (row_span, col_span) = (row_span.max(1), col_span.max(1));
        if row + row_span > self.rows || col + col_span > self.cols {
            tracing::debug!(
                "Ignoring cell ({}, {}) span {}x{} outside {}x{} grid",
                row,
                col,
                row_span,
                col_span,
                self.rows,
                self.cols
            );
            return;
        }

        let placement = Placement {
            bitmap,
            row,
            col,
            row_span,
            col_span,
        };
        match self
            .placements
            .iter_mut()
            .find(|p| p.row == row && p.col == col)
        {
            Some(existing) => *existing = placement,
            None => self.placements.push(placement),
        }
    }

    /// Bitmap placed at (`row`, `col`), if any.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Bitmap> {
        self.placements
            .iter()
            .find(|p| p.row == row && p.col == col)
            .map(|p| &p.bitmap)
    }

    /// Removes every placed bitmap, keeping the background.
    pub fn clear(&mut self) {
        self.placements.clear();
    }

    /// Screen rectangle covered by a block of cells.
    pub fn cell_rect(
        &self,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
        screen: Vec2,
    ) -> Rect {
        let cell_w = screen.x / self.cols as f32;
        let cell_h = screen.y / self.rows as f32;
        Rect::new(
            col as f32 * cell_w,
            row as f32 * cell_h,
            col_span as f32 * cell_w,
            row_span as f32 * cell_h,
        )
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        let screen = canvas.screen_size();

        if let Some(background) = &self.background {
            let options = DrawOptions {
                size: Some(screen),
                ..Default::default()
            };
            canvas.draw_bitmap(background, Vec2::ZERO, &options);
        }

        for p in &self.placements {
            let region = self.cell_rect(p.row, p.col, p.row_span, p.col_span, screen);
            let target = region.fit(p.bitmap.cell_size());
            let options = DrawOptions {
                size: Some(target.size()),
                ..Default::default()
            };
            canvas.draw_bitmap(&p.bitmap, target.min(), &options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BitmapId;
    use crate::test_support::{DrawCall, RecordingCanvas};

    fn bitmap(id: u64) -> Bitmap {
        Bitmap::new(BitmapId(id), 100, 100)
    }

    #[test]
    fn test_cell_rect() {
        let grid = Grid::new(8, 14);
        let rect = grid.cell_rect(2, 5, 4, 4, Vec2::new(1400.0, 800.0));
        assert_eq!(rect, Rect::new(500.0, 200.0, 400.0, 400.0));
    }

    #[test]
    fn test_update_cell_replaces_same_origin() {
        let mut grid = Grid::new(8, 14);
        grid.update_cell(bitmap(1), 2, 5, 4, 4);
        grid.update_cell(bitmap(2), 2, 5, 4, 4);
        assert_eq!(grid.cell(2, 5).map(|b| b.id), Some(BitmapId(2)));
        assert_eq!(grid.placements.len(), 1);
    }

    #[test]
    fn test_update_cell_out_of_range_is_ignored() {
        let mut grid = Grid::new(8, 14);
        grid.update_cell(bitmap(1), 7, 12, 4, 4);
        assert!(grid.cell(7, 12).is_none());
    }

    #[test]
    fn test_clear_keeps_background() {
        let mut grid = Grid::new(8, 14);
        grid.set_background(bitmap(9));
        grid.update_cell(bitmap(1), 2, 0, 4, 4);
        grid.update_cell(bitmap(2), 2, 5, 4, 4);
        grid.clear();

        assert!(grid.cell(2, 0).is_none());
        assert!(grid.cell(2, 5).is_none());
        let mut canvas = RecordingCanvas::new(1400.0, 800.0);
        grid.draw(&mut canvas);
        assert_eq!(canvas.bitmaps(), vec![BitmapId(9)]);
    }

    #[test]
    fn test_draw_background_then_cells() {
        let mut grid = Grid::new(8, 14);
        grid.set_background(bitmap(9));
        grid.update_cell(bitmap(1), 2, 5, 4, 4);

        let mut canvas = RecordingCanvas::new(1400.0, 800.0);
        grid.draw(&mut canvas);

        assert_eq!(canvas.bitmaps(), vec![BitmapId(9), BitmapId(1)]);
        match &canvas.calls[0] {
            DrawCall::Bitmap { pos, options, .. } => {
                assert_eq!(*pos, Vec2::ZERO);
                assert_eq!(options.size, Some(Vec2::new(1400.0, 800.0)));
            }
            other => panic!("unexpected call {:?}", other),
        }
        match &canvas.calls[1] {
            DrawCall::Bitmap { pos, options, .. } => {
                assert_eq!(*pos, Vec2::new(500.0, 200.0));
                assert_eq!(options.size, Some(Vec2::new(400.0, 400.0)));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }
}
