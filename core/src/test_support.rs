//! Test doubles for the drawing, input and process collaborators.

use std::collections::{HashMap, HashSet, VecDeque};

use glam::Vec2;

use crate::draw::{Bitmap, BitmapId, Canvas, Color, DrawOptions, FontStyle, Rect};
use crate::input::{InputSource, MenuKey};
use crate::process::{LaunchError, LaunchRequest, ProcessHandle, ProcessLauncher};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect {
        color: Color,
        rect: Rect,
    },
    Text {
        text: String,
        font: FontStyle,
        size: f32,
        pos: Vec2,
    },
    Bitmap {
        id: BitmapId,
        pos: Vec2,
        options: DrawOptions,
    },
}

/// Canvas that records every call.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub size: Vec2,
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn bitmaps(&self) -> Vec<BitmapId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Bitmap { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn screen_size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.calls.push(DrawCall::Rect { color, rect });
    }

    fn draw_text(&mut self, text: &str, _color: Color, font: FontStyle, size: f32, pos: Vec2) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            font,
            size,
            pos,
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, pos: Vec2, options: &DrawOptions) {
        self.calls.push(DrawCall::Bitmap {
            id: bitmap.id,
            pos,
            options: *options,
        });
    }
}

/// One frame of input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    pub typed: HashSet<MenuKey>,
    pub mouse: Option<Vec2>,
}

impl ScriptedInput {
    pub fn typed(keys: &[MenuKey]) -> Self {
        Self {
            typed: keys.iter().copied().collect(),
            mouse: None,
        }
    }
}

impl InputSource for ScriptedInput {
    fn key_typed(&self, key: MenuKey) -> bool {
        self.typed.contains(&key)
    }

    fn mouse_position(&self) -> Option<Vec2> {
        self.mouse
    }
}

/// Launcher that records requests and reports scripted process states.
#[derive(Debug, Default)]
pub struct FakeLauncher {
    pub launched: Vec<LaunchRequest>,
    pub running: HashMap<ProcessHandle, bool>,
    /// Errors returned by upcoming launches, in order; empty means success
    pub failures: VecDeque<LaunchError>,
    pub polls: usize,
    next_handle: u64,
}

impl FakeLauncher {
    pub fn failing_with(error: LaunchError) -> Self {
        Self {
            failures: VecDeque::from([error]),
            ..Self::default()
        }
    }

    pub fn exit(&mut self, handle: ProcessHandle) {
        self.running.insert(handle, false);
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> Result<ProcessHandle, LaunchError> {
        self.launched.push(request.clone());
        if let Some(error) = self.failures.pop_front() {
            return Err(error);
        }
        self.next_handle += 1;
        let handle = ProcessHandle(self.next_handle);
        self.running.insert(handle, true);
        Ok(handle)
    }

    fn is_running(&mut self, handle: ProcessHandle) -> bool {
        self.polls += 1;
        self.running.get(&handle).copied().unwrap_or(false)
    }
}
