//! Decoding and caching of generated scene images.
//!
//! Scene images arrive from the core as `data:` URLs. Decoding is cheap
//! relative to generation but not free, so each decoded image is uploaded to
//! a texture once and reused until the URL changes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::HashMap;

/// Texture cache keyed by data URL.
#[derive(Default)]
pub struct ImageCache {
    textures: HashMap<String, egui::TextureHandle>,
}

impl ImageCache {
    /// Get the texture for a data URL, decoding and uploading on first use.
    ///
    /// Returns `None` if the URL is not a decodable image; the UI simply
    /// renders the scene without a picture.
    pub fn texture(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        if let Some(texture) = self.textures.get(url) {
            return Some(texture.clone());
        }

        let color_image = decode_data_url(url)?;
        let texture = ctx.load_texture(
            format!("scene-{}", self.textures.len()),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.textures.insert(url.to_string(), texture.clone());
        Some(texture)
    }

    /// Drop all cached textures, e.g. when returning to the menu.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

fn decode_data_url(url: &str) -> Option<egui::ColorImage> {
    let encoded = url.split("base64,").nth(1)?;
    let bytes = match STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(%error, "scene image is not valid base64");
            return None;
        }
    };

    let image = match image::load_from_memory(&bytes) {
        Ok(image) => image.into_rgba8(),
        Err(error) => {
            tracing::warn!(%error, "scene image failed to decode");
            return None;
        }
    };

    let size = [image.width() as usize, image.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_raw(),
    ))
}
