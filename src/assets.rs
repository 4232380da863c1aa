//! Image asset manifest
//!
//! Declares the five images the scene uses and their natural sizes. Body
//! sizes are derived from these (natural size × sprite scale), so the browser
//! preload replaces the declared sizes with the decoded ones when it can.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Asset keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    /// Background
    Sky,
    /// Platform texture
    Ground,
    /// Collectible
    Pineapple,
    /// Hazard
    Shrimp,
    /// Player sprite sheet
    Dude,
}

impl AssetKey {
    pub const ALL: [AssetKey; 5] = [
        AssetKey::Sky,
        AssetKey::Ground,
        AssetKey::Pineapple,
        AssetKey::Shrimp,
        AssetKey::Dude,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKey::Sky => "sky",
            AssetKey::Ground => "ground",
            AssetKey::Pineapple => "pineapple",
            AssetKey::Shrimp => "shrimp",
            AssetKey::Dude => "dude",
        }
    }
}

/// Fixed cell size of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

/// A single image asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    pub key: AssetKey,
    pub path: String,
    /// Natural image size in pixels
    pub width: f32,
    pub height: f32,
    /// Present for sprite sheets; the frame, not the sheet, sizes the body
    #[serde(default)]
    pub frame: Option<FrameSize>,
    /// Set once the browser has decoded the image
    #[serde(skip)]
    pub loaded: bool,
}

impl ImageAsset {
    fn image(key: AssetKey, path: &str, width: f32, height: f32) -> Self {
        Self {
            key,
            path: path.to_string(),
            width,
            height,
            frame: None,
            loaded: false,
        }
    }

    fn sheet(key: AssetKey, path: &str, frame_width: f32, frame_height: f32) -> Self {
        Self {
            key,
            path: path.to_string(),
            width: frame_width,
            height: frame_height,
            frame: Some(FrameSize {
                width: frame_width,
                height: frame_height,
            }),
            loaded: false,
        }
    }

    /// Size of one drawable cell (frame size for sheets)
    pub fn cell_size(&self) -> Vec2 {
        match self.frame {
            Some(frame) => Vec2::new(frame.width, frame.height),
            None => Vec2::new(self.width, self.height),
        }
    }
}

/// All images loaded before the scene starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    pub images: Vec<ImageAsset>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            images: vec![
                ImageAsset::image(AssetKey::Sky, "assets/sky.png", 800.0, 600.0),
                ImageAsset::image(AssetKey::Ground, "assets/platform.png", 400.0, 32.0),
                ImageAsset::image(AssetKey::Pineapple, "assets/Pineapple.png", 32.0, 32.0),
                ImageAsset::image(AssetKey::Shrimp, "assets/corona.png", 600.0, 600.0),
                ImageAsset::sheet(AssetKey::Dude, "assets/dude.png", 213.0, 320.0),
            ],
        }
    }
}

impl AssetManifest {
    pub fn get(&self, key: AssetKey) -> Option<&ImageAsset> {
        self.images.iter().find(|a| a.key == key)
    }

    /// Drawable cell size for an asset, zero if the key is missing
    pub fn cell_size(&self, key: AssetKey) -> Vec2 {
        self.get(key).map(ImageAsset::cell_size).unwrap_or(Vec2::ZERO)
    }

    /// Record a decoded image size. Sprite sheets keep their frame size.
    pub fn record_loaded(&mut self, key: AssetKey, width: u32, height: u32) {
        if let Some(asset) = self.images.iter_mut().find(|a| a.key == key) {
            asset.loaded = true;
            if width > 0 && height > 0 {
                asset.width = width as f32;
                asset.height = height as f32;
            }
        }
    }

    /// Number of images decoded so far
    pub fn loaded_count(&self) -> usize {
        self.images.iter().filter(|a| a.loaded).count()
    }

    /// Decode every image in the page before the first frame.
    ///
    /// A missing or broken image is logged and its declared size is kept.
    #[cfg(target_arch = "wasm32")]
    pub async fn preload(&mut self, document: &web_sys::Document) {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        for i in 0..self.images.len() {
            let key = self.images[i].key;
            let path = self.images[i].path.clone();

            let img = match document
                .create_element("img")
                .ok()
                .and_then(|el| el.dyn_into::<web_sys::HtmlImageElement>().ok())
            {
                Some(img) => img,
                None => {
                    log::warn!("Could not create image element for '{}'", key.as_str());
                    continue;
                }
            };
            img.set_src(&path);

            match JsFuture::from(img.decode()).await {
                Ok(_) => {
                    log::debug!(
                        "Loaded '{}' ({}x{})",
                        key.as_str(),
                        img.natural_width(),
                        img.natural_height()
                    );
                    self.record_loaded(key, img.natural_width(), img.natural_height());
                }
                Err(e) => {
                    log::warn!("Failed to load '{}' from {}: {:?}", key.as_str(), path, e);
                }
            }
        }

        log::info!(
            "Preloaded {}/{} images",
            self.loaded_count(),
            self.images.len()
        );
    }
}
