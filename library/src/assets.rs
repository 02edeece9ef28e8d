//! Image loading and the texture cache
//!
//! Images are decoded with the `image` crate and uploaded once as egui
//! textures. The menu only sees [`Bitmap`] handles; [`EguiCanvas`] turns
//! them back into textures when drawing.
//!
//! [`EguiCanvas`]: crate::canvas::EguiCanvas

use std::path::{Path, PathBuf};

use arcade_core::draw::{Bitmap, BitmapId};
use eframe::egui;
use hashbrown::HashMap;
use thiserror::Error;

/// Side of the generated placeholder, in pixels
const PLACEHOLDER_SIZE: u32 = 64;
/// Side of one placeholder checker square
const PLACEHOLDER_CHECKER: u32 = 8;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Texture cache keyed by [`BitmapId`].
#[derive(Default)]
pub struct AssetCache {
    textures: HashMap<BitmapId, egui::TextureHandle>,
    by_path: HashMap<PathBuf, Bitmap>,
    placeholder: Option<Bitmap>,
    next_id: u64,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(&self, id: BitmapId) -> Option<&egui::TextureHandle> {
        self.textures.get(&id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Loads a single-cell image. Repeated loads of a path share a texture.
    pub fn load(&mut self, ctx: &egui::Context, path: &Path) -> Result<Bitmap, AssetError> {
        self.load_cells(ctx, path, None)
    }

    /// Loads a horizontal sprite strip of `cell_width`-wide cells.
    pub fn load_sheet(
        &mut self,
        ctx: &egui::Context,
        path: &Path,
        cell_width: u32,
    ) -> Result<Bitmap, AssetError> {
        self.load_cells(ctx, path, Some(cell_width))
    }

    /// Loads an image, substituting the placeholder when it cannot be read.
    pub fn load_or_placeholder(&mut self, ctx: &egui::Context, path: &Path) -> Bitmap {
        match self.load(ctx, path) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                tracing::warn!("{}", e);
                self.placeholder(ctx)
            }
        }
    }

    /// Checkerboard shown in place of missing artwork.
    pub fn placeholder(&mut self, ctx: &egui::Context) -> Bitmap {
        if let Some(bitmap) = self.placeholder {
            return bitmap;
        }
        let bitmap = self.upload(ctx, "placeholder", placeholder_image(), None);
        self.placeholder = Some(bitmap);
        bitmap
    }

    fn load_cells(
        &mut self,
        ctx: &egui::Context,
        path: &Path,
        cell_width: Option<u32>,
    ) -> Result<Bitmap, AssetError> {
        if let Some(bitmap) = self.by_path.get(path)
            && cell_width.is_none_or(|w| w == bitmap.cell_width)
        {
            return Ok(*bitmap);
        }

        let image = decode(path)?;
        let bitmap = self.upload(ctx, &path.to_string_lossy(), image, cell_width);
        tracing::debug!(
            "Loaded {} ({}x{}, {} cells)",
            path.display(),
            bitmap.width,
            bitmap.height,
            bitmap.cell_count
        );
        self.by_path.insert(path.to_path_buf(), bitmap);
        Ok(bitmap)
    }

    fn upload(
        &mut self,
        ctx: &egui::Context,
        name: &str,
        image: egui::ColorImage,
        cell_width: Option<u32>,
    ) -> Bitmap {
        let [width, height] = image.size;
        let (width, height) = (width as u32, height as u32);

        self.next_id += 1;
        let id = BitmapId(self.next_id);
        let texture = ctx.load_texture(name, image, egui::TextureOptions::LINEAR);
        self.textures.insert(id, texture);

        match cell_width {
            Some(cell_width) => Bitmap::strip(id, width, height, cell_width),
            None => Bitmap::new(id, width, height),
        }
    }
}

/// Decodes an image file into egui's RGBA format.
pub fn decode(path: &Path) -> Result<egui::ColorImage, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Magenta and black checkerboard.
pub fn placeholder_image() -> egui::ColorImage {
    let size = PLACEHOLDER_SIZE as usize;
    let rgba: Vec<u8> = (0..PLACEHOLDER_SIZE * PLACEHOLDER_SIZE)
        .flat_map(|i| {
            let (x, y) = (i % PLACEHOLDER_SIZE, i / PLACEHOLDER_SIZE);
            if (x / PLACEHOLDER_CHECKER + y / PLACEHOLDER_CHECKER) % 2 == 0 {
                [255, 0, 255, 255]
            } else {
                [0, 0, 0, 255]
            }
        })
        .collect();
    egui::ColorImage::from_rgba_unmultiplied([size, size], &rgba)
}
