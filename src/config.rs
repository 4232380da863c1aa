//! Game configuration
//!
//! Mirrors the host engine config: renderer, canvas size, mount element and
//! arcade physics defaults. A JSON override can be stored in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY_Y, WORLD_HEIGHT, WORLD_WIDTH};

/// Which graphics backend to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RendererKind {
    /// WebGPU when available, WebGL otherwise
    #[default]
    Auto,
    WebGpu,
    WebGl,
}

impl RendererKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::Auto => "Auto",
            RendererKind::WebGpu => "WebGPU",
            RendererKind::WebGl => "WebGL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(RendererKind::Auto),
            "webgpu" | "gpu" => Some(RendererKind::WebGpu),
            "webgl" | "gl" => Some(RendererKind::WebGl),
            _ => None,
        }
    }

    /// Backends to request from wgpu
    pub fn backends(&self) -> wgpu::Backends {
        match self {
            RendererKind::Auto => wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            RendererKind::WebGpu => wgpu::Backends::BROWSER_WEBGPU,
            RendererKind::WebGl => wgpu::Backends::GL,
        }
    }
}

/// Arcade physics profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Constant downward gravity (pixels/s²)
    pub gravity_y: f32,
    /// Draw body outlines
    pub debug: bool,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            gravity_y: GRAVITY_Y,
            debug: false,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub renderer: RendererKind,
    /// Canvas width in CSS pixels (also the world width)
    pub width: u32,
    /// Canvas height in CSS pixels (also the world height)
    pub height: u32,
    /// Id of the page element the canvas is mounted into
    pub parent: String,
    pub physics: ArcadeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::Auto,
            width: WORLD_WIDTH as u32,
            height: WORLD_HEIGHT as u32,
            parent: "gameContainer".to_string(),
            physics: ArcadeConfig::default(),
        }
    }
}

impl GameConfig {
    /// LocalStorage key (used only in wasm32)
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "pineapple_panic_config";

    /// Parse a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<GameConfig>(json) {
            Ok(config) => Some(config.sanitized()),
            Err(e) => {
                log::warn!("Ignoring invalid config override: {}", e);
                None
            }
        }
    }

    /// Zero-sized canvases fall back to the defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.width == 0 {
            self.width = defaults.width;
        }
        if self.height == 0 {
            self.height = defaults.height;
        }
        if self.parent.is_empty() {
            self.parent = defaults.parent;
        }
        self
    }

    /// Apply `?renderer=webgl` style overrides from the page URL
    pub fn apply_query(&mut self, query: &str) {
        for pair in query.trim_start_matches('?').split('&') {
            if let Some(("renderer", value)) = pair.split_once('=') {
                match RendererKind::from_str(value) {
                    Some(kind) => self.renderer = kind,
                    None => log::warn!(
                        "Unknown renderer '{}' in URL, keeping {}",
                        value,
                        self.renderer.as_str()
                    ),
                }
            }
        }
    }

    /// Load config from LocalStorage, then apply URL overrides (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let stored = window
            .as_ref()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| Self::from_json(&json));

        let mut config = match stored {
            Some(config) => {
                log::info!("Loaded config override from LocalStorage");
                config
            }
            None => {
                log::info!("Using default config");
                Self::default()
            }
        };

        if let Some(search) = window.and_then(|w| w.location().search().ok()) {
            config.apply_query(&search);
        }
        log::info!("Renderer: {}", config.renderer.as_str());
        config
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
