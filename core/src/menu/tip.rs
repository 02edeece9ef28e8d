//! Timed tooltip boxes
//!
//! A tip is a bordered box anchored to one of six screen positions, holding
//! an icon and wrapped text. It starts its clock on the first draw and stops
//! drawing once its duration has elapsed.
//!
//! ```text
//!  NotStarted --first draw--> Visible --elapsed >= duration--> Expired
//! ```

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::draw::{Animation, Bitmap, Canvas, Color, DrawOptions, FontStyle, Rect};

/// Font size of tip text
pub const FONT_SIZE: f32 = 20.0;
/// Width of the animated border
pub const BORDER_WIDTH: f32 = 3.0;
/// Space between the content and the container edge
pub const CONTENT_BUFFER: f32 = 10.0;
/// Space between the container and the window edge
pub const WINDOW_MARGIN: f32 = 20.0;
/// Advance of one text glyph
pub const GLYPH_WIDTH: f32 = 9.0;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);
pub const DEFAULT_CHARS_PER_LINE: usize = 30;

const BORDER_COLOR: Color = Color::rgba(0.0, 0.675, 0.757, 0.30);
/// Border grows one step per 60 Hz frame, from a scale of 30 down to 2.
const BORDER_STEP: Duration = Duration::from_nanos(16_666_667);
const BORDER_SCALE_START: u32 = 30;
const BORDER_SCALE_MIN: u32 = 2;

/// Where on screen the tip sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    TopLeft,
    TopRight,
    #[default]
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipState {
    NotStarted,
    Visible,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Tip {
    text: String,
    image: Bitmap,
    animation: Option<Animation>,
    options: DrawOptions,
    duration: Duration,
    chars_per_line: usize,
    anchor: Anchor,
    screen: Vec2,
    num_lines: usize,
    container: Rect,
    started: Option<Instant>,
}

impl Tip {
    /// A tip with the default duration, line length and anchor, laid out for
    /// a `screen`-sized window.
    pub fn new(text: impl Into<String>, image: Bitmap, screen: Vec2) -> Self {
        let mut tip = Self {
            text: text.into(),
            image,
            animation: None,
            options: DrawOptions::default(),
            duration: DEFAULT_DURATION,
            chars_per_line: DEFAULT_CHARS_PER_LINE,
            anchor: Anchor::default(),
            screen,
            num_lines: 0,
            container: Rect::new(0.0, 0.0, 0.0, 0.0),
            started: None,
        };
        tip.layout();
        tip
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_chars_per_line(mut self, chars_per_line: usize) -> Self {
        self.chars_per_line = chars_per_line.max(1);
        self.layout();
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self.layout();
        self
    }

    /// Animate the image as a sprite strip.
    pub fn with_animation(mut self, animation: Animation, options: DrawOptions) -> Self {
        self.animation = Some(animation);
        self.options = options;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// Container position and size (the border is drawn outside it).
    pub fn container(&self) -> Rect {
        self.container
    }

    fn image_size(&self) -> Vec2 {
        self.image.cell_size()
    }

    fn layout(&mut self) {
        let image = self.image_size();
        self.num_lines = self.text.chars().count() / self.chars_per_line;

        let mut height = self.num_lines as f32 * FONT_SIZE + FONT_SIZE + 2.0 * CONTENT_BUFFER;
        if height < image.y {
            height = 2.0 * CONTENT_BUFFER + image.y;
        }
        let width = self.chars_per_line as f32 * GLYPH_WIDTH + 3.0 * CONTENT_BUFFER + image.x;

        let left = WINDOW_MARGIN;
        let right = self.screen.x - width - WINDOW_MARGIN;
        let center = self.screen.x / 2.0 - width / 2.0;
        let top = WINDOW_MARGIN;
        let bottom = self.screen.y - height - WINDOW_MARGIN;

        let (x, y) = match self.anchor {
            Anchor::TopLeft => (left, top),
            Anchor::TopRight => (right, top),
            Anchor::TopCenter => (center, top),
            Anchor::BottomLeft => (left, bottom),
            Anchor::BottomRight => (right, bottom),
            Anchor::BottomCenter => (center, bottom),
        };
        self.container = Rect::new(x, y, width, height);
    }

    pub fn state(&self, now: Instant) -> TipState {
        match self.started {
            None => TipState::NotStarted,
            Some(start) if now.saturating_duration_since(start) >= self.duration => {
                TipState::Expired
            }
            Some(_) => TipState::Visible,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.state(now) == TipState::Expired
    }

    /// Puts the tip back in its initial state; the next draw starts it again.
    pub fn restart(&mut self) {
        self.started = None;
        if let Some(animation) = &mut self.animation {
            animation.reset();
        }
    }

    /// Border width divisor for the growing-border effect.
    fn border_divisor(&self, elapsed: Duration) -> f32 {
        let steps =
            u32::try_from(elapsed.as_nanos() / BORDER_STEP.as_nanos()).unwrap_or(u32::MAX);
        let scale = BORDER_SCALE_START
            .saturating_sub(steps)
            .max(BORDER_SCALE_MIN);
        (scale / 2) as f32
    }

    /// Text split into `chars_per_line` chunks, skipping an empty final chunk.
    fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let chars: Vec<char> = self.text.chars().collect();
        (0..=self.num_lines).filter_map(move |i| {
            let start = (i * self.chars_per_line).min(chars.len());
            let end = (start + self.chars_per_line).min(chars.len());
            (start < end).then(|| chars[start..end].iter().collect())
        })
    }

    pub fn draw(&mut self, canvas: &mut impl Canvas) -> TipState {
        self.draw_at(canvas, Instant::now())
    }

    /// Draws the tip as of `now`, starting its clock on the first call.
    /// Returns the state after drawing; nothing is drawn once expired.
    pub fn draw_at(&mut self, canvas: &mut impl Canvas, now: Instant) -> TipState {
        let start = *self.started.get_or_insert(now);
        if self.state(now) == TipState::Expired {
            return TipState::Expired;
        }
        let elapsed = now.saturating_duration_since(start);
        let Rect { x, y, w, h } = self.container;

        canvas.fill_rect(
            BORDER_COLOR,
            Rect::new(
                x - BORDER_WIDTH,
                y - BORDER_WIDTH,
                (w + BORDER_WIDTH * 2.0) / self.border_divisor(elapsed),
                h + BORDER_WIDTH * 2.0,
            ),
        );
        canvas.fill_rect(Color::BLACK, self.container);

        let image = self.image_size();
        let options = DrawOptions {
            cell: self
                .animation
                .as_ref()
                .map(Animation::current_cell)
                .or(self.options.cell),
            ..self.options
        };
        canvas.draw_bitmap(
            &self.image,
            Vec2::new(x + CONTENT_BUFFER, y + (h - image.y) / 2.0),
            &options,
        );

        let text_x = x + CONTENT_BUFFER * 2.0 + image.x;
        for (i, line) in self.lines().enumerate() {
            canvas.draw_text(
                &line,
                Color::WHITE,
                FontStyle::Text,
                FONT_SIZE,
                Vec2::new(text_x, FONT_SIZE * i as f32 + y + CONTENT_BUFFER),
            );
        }

        if let Some(animation) = &mut self.animation {
            animation.update();
        }
        TipState::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BitmapId;
    use crate::test_support::{DrawCall, RecordingCanvas};

    const SCREEN: Vec2 = Vec2::new(1920.0, 1080.0);

    fn icon(width: u32, height: u32) -> Bitmap {
        Bitmap::new(BitmapId(1), width, height)
    }

    // =============================================================
    // Layout
    // =============================================================

    #[test]
    fn test_layout_text_taller_than_image() {
        let tip = Tip::new("x".repeat(45), icon(40, 50), SCREEN);
        assert_eq!(tip.num_lines(), 1);
        assert_eq!(tip.container().h, 60.0);
        assert_eq!(tip.container().w, 30.0 * 9.0 + 30.0 + 40.0);
    }

    #[test]
    fn test_layout_image_taller_than_text() {
        let tip = Tip::new("short", icon(64, 100), SCREEN);
        assert_eq!(tip.num_lines(), 0);
        assert_eq!(tip.container().h, 120.0);
    }

    #[test]
    fn test_layout_counts_chars_not_bytes() {
        let tip = Tip::new("é".repeat(30), icon(10, 10), SCREEN);
        assert_eq!(tip.num_lines(), 1);
    }

    #[test]
    fn test_anchor_positions() {
        let base = Tip::new("hello", icon(40, 40), SCREEN);
        let Rect { w, h, .. } = base.container();

        let at = |anchor| {
            let r = base.clone().with_anchor(anchor).container();
            (r.x, r.y)
        };
        assert_eq!(at(Anchor::TopLeft), (20.0, 20.0));
        assert_eq!(at(Anchor::TopRight), (1920.0 - w - 20.0, 20.0));
        assert_eq!(at(Anchor::TopCenter), (960.0 - w / 2.0, 20.0));
        assert_eq!(at(Anchor::BottomLeft), (20.0, 1080.0 - h - 20.0));
        assert_eq!(at(Anchor::BottomRight), (1920.0 - w - 20.0, 1080.0 - h - 20.0));
        assert_eq!(at(Anchor::BottomCenter), (960.0 - w / 2.0, 1080.0 - h - 20.0));
    }

    #[test]
    fn test_chars_per_line_relayouts() {
        let tip = Tip::new("x".repeat(45), icon(10, 10), SCREEN).with_chars_per_line(10);
        assert_eq!(tip.num_lines(), 4);
        assert_eq!(tip.container().w, 10.0 * 9.0 + 30.0 + 10.0);
    }

    // =============================================================
    // Lifecycle
    // =============================================================

    #[test]
    fn test_lifecycle_states() {
        let mut tip = Tip::new("hello", icon(10, 10), SCREEN);
        let t0 = Instant::now();
        assert_eq!(tip.state(t0), TipState::NotStarted);

        let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
        assert_eq!(tip.draw_at(&mut canvas, t0), TipState::Visible);
        assert!(!canvas.calls.is_empty());

        let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
        let later = t0 + Duration::from_millis(3001);
        assert_eq!(tip.draw_at(&mut canvas, later), TipState::Expired);
        assert!(canvas.calls.is_empty());
        assert!(tip.is_expired(later));
    }

    #[test]
    fn test_expires_exactly_at_duration() {
        let mut tip = Tip::new("hello", icon(10, 10), SCREEN)
            .with_duration(Duration::from_millis(500));
        let t0 = Instant::now();
        let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
        tip.draw_at(&mut canvas, t0);

        assert_eq!(tip.state(t0 + Duration::from_millis(499)), TipState::Visible);
        assert_eq!(tip.state(t0 + Duration::from_millis(500)), TipState::Expired);
    }

    #[test]
    fn test_restart_after_expiry() {
        let mut tip = Tip::new("hello", icon(10, 10), SCREEN);
        let t0 = Instant::now();
        let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
        tip.draw_at(&mut canvas, t0);
        let t1 = t0 + Duration::from_secs(5);
        assert!(tip.is_expired(t1));

        tip.restart();
        assert_eq!(tip.state(t1), TipState::NotStarted);
        assert_eq!(tip.draw_at(&mut canvas, t1), TipState::Visible);
    }

    // =============================================================
    // Drawing
    // =============================================================

    #[test]
    fn test_draw_order_and_text_lines() {
        let mut tip = Tip::new("x".repeat(45), icon(40, 50), SCREEN);
        let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
        tip.draw_at(&mut canvas, Instant::now());

        assert!(matches!(canvas.calls[0], DrawCall::Rect { .. }));
        assert!(matches!(canvas.calls[1], DrawCall::Rect { color, .. } if color == Color::BLACK));
        assert!(matches!(canvas.calls[2], DrawCall::Bitmap { .. }));
        assert_eq!(
            canvas.texts(),
            vec!["x".repeat(30), "x".repeat(15)]
        );
    }

    #[test]
    fn test_exact_multiple_skips_empty_line() {
        let mut tip = Tip::new("y".repeat(30), icon(10, 10), SCREEN);
        let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
        tip.draw_at(&mut canvas, Instant::now());
        assert_eq!(canvas.texts(), vec!["y".repeat(30)]);
    }

    #[test]
    fn test_border_grows_with_time_not_draw_count() {
        let mut tip = Tip::new("hello", icon(10, 10), SCREEN);
        let full = tip.container().w + BORDER_WIDTH * 2.0;
        let t0 = Instant::now();

        let border_width = |tip: &mut Tip, at: Instant| {
            let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
            tip.draw_at(&mut canvas, at);
            match canvas.calls[0] {
                DrawCall::Rect { rect, .. } => rect.w,
                ref other => panic!("unexpected call {:?}", other),
            }
        };

        assert_eq!(border_width(&mut tip, t0), full / 15.0);
        // Repeated draws at the same instant do not advance the effect
        assert_eq!(border_width(&mut tip, t0), full / 15.0);
        // After 28 steps the scale reaches its floor of 2
        assert_eq!(border_width(&mut tip, t0 + Duration::from_millis(500)), full);
        assert_eq!(border_width(&mut tip, t0 + Duration::from_millis(2000)), full);
    }

    #[test]
    fn test_border_stays_full_after_long_uptime() {
        let tip = Tip::new("hello", icon(10, 10), SCREEN);
        // 2^32 steps would wrap a truncated counter back to zero
        let wrapped = Duration::from_nanos((1u64 << 32) * BORDER_STEP.as_nanos() as u64);
        assert_eq!(tip.border_divisor(wrapped), 1.0);
        assert_eq!(tip.border_divisor(Duration::MAX), 1.0);
    }

    #[test]
    fn test_animation_advances_each_draw() {
        let strip = Bitmap::strip(BitmapId(3), 90, 30, 30);
        let mut tip = Tip::new("anim", strip, SCREEN)
            .with_animation(Animation::for_strip(&strip, 1), DrawOptions::default());
        let t0 = Instant::now();

        let mut cells = Vec::new();
        for _ in 0..4 {
            let mut canvas = RecordingCanvas::new(SCREEN.x, SCREEN.y);
            tip.draw_at(&mut canvas, t0);
            cells.extend(canvas.calls.iter().filter_map(|call| match call {
                DrawCall::Bitmap { options, .. } => options.cell,
                _ => None,
            }));
        }
        assert_eq!(cells, vec![0, 1, 2, 0]);
        // Layout uses the cell size, not the whole strip
        assert_eq!(tip.container().w, 30.0 * 9.0 + 30.0 + 30.0);
    }
}
