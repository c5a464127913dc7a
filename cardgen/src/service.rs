use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};
use data::CardData;
use image::RgbaImage;
use render::{CardFont, FontSource, Renderer};
use tracing::{info, warn};

use crate::output::{card_filename, png_bytes, unix_now, write_atomic};
use crate::{AssetLayout, CardCache, ImageConfig};

/// Host-facing entry point: one resolved font, one config, one cache.
#[derive(Debug, Clone)]
pub struct CardService {
    layout: AssetLayout,
    config: ImageConfig,
    renderer: Renderer,
    cache: CardCache,
    /// Identity of the resolved font file, part of every cache key.
    font_stamp: String,
}

impl CardService {
    pub fn new(assets_root: impl Into<PathBuf>, config: ImageConfig) -> Result<Self> {
        Self::with_layout(AssetLayout::new(assets_root), config)
    }

    /// Create the directory layout and resolve the font once.
    pub fn with_layout(layout: AssetLayout, config: ImageConfig) -> Result<Self> {
        layout.ensure()?;
        let font = CardFont::resolve(&layout.font_candidates());
        let font_stamp = match font.source() {
            FontSource::File(path) => file_stamp(path),
            FontSource::Builtin => "builtin".to_owned(),
        };
        let cache = CardCache::from_config(layout.cache_dir(), &config);
        Ok(Self {
            layout,
            config,
            renderer: Renderer::new(font),
            cache,
            font_stamp,
        })
    }

    pub fn layout(&self) -> &AssetLayout {
        &self.layout
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn cache(&self) -> &CardCache {
        &self.cache
    }

    pub fn render(&self, data: &CardData) -> Result<RgbaImage> {
        let kind = data.kind().as_str();
        let hash = data::content_hash(data)?;
        let theme = self.config.theme_for_card(kind);
        let options = self.config.render_options(kind, self.layout.texture_for(theme), seed_from_hash(&hash));
        self.renderer
            .render(data, &options)
            .with_context(|| format!("Render {kind} card"))
    }

    pub fn render_png(&self, data: &CardData) -> Result<Vec<u8>> {
        let image = self.render(data)?;
        png_bytes(&image, self.config.image_quality)
    }

    /// Render into `output/` under the templated file name.
    pub fn render_to_file(&self, data: &CardData, identifier: &str) -> Result<PathBuf> {
        self.render_to_dir(data, identifier, &self.layout.output)
    }

    /// Like [`CardService::render_to_file`] with an explicit directory. A
    /// cache hit copies the stored PNG instead of rendering.
    pub fn render_to_dir(&self, data: &CardData, identifier: &str, dir: &Path) -> Result<PathBuf> {
        let name = card_filename(data.kind(), identifier, unix_now());
        let key = self.cache_key(data)?;

        if let Some(hit) = self.cache.get(&key) {
            let bytes = std::fs::read(&hit).with_context(|| format!("Read cached card {}", hit.display()))?;
            let path = write_atomic(dir, &name, &bytes)?;
            info!(path = %path.display(), "card served from cache");
            return Ok(path);
        }

        let png = self.render_png(data)?;
        let path = write_atomic(dir, &name, &png)?;
        info!(path = %path.display(), bytes = png.len(), "saved card");

        if let Err(err) = self.cache.put(&key, &png) {
            warn!(error = %format!("{err:#}"), "failed to cache card");
        }
        Ok(path)
    }

    /// Content hash of the record salted with the pixel-affecting config.
    /// Stamps of the font and theme texture files are part of the salt.
    pub fn cache_key(&self, data: &CardData) -> Result<String> {
        let theme = self.config.theme_for_card(data.kind().as_str());
        let texture = self
            .layout
            .texture_for(theme)
            .map_or_else(|| "none".to_owned(), |path| file_stamp(&path));
        let salt = format!("{}\nfont={}\ntexture={texture}", self.config.fingerprint()?, self.font_stamp);
        data::salted_hash(data, &salt)
    }
}

/// Path, length and modification time of a file. Replacing the file in place
/// changes the stamp.
fn file_stamp(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => {
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |d| d.as_nanos());
            format!("{}:{}:{modified}", path.display(), meta.len())
        }
        Err(_) => path.display().to_string(),
    }
}

/// First 64 bits of a hex digest.
pub fn seed_from_hash(hash: &str) -> u64 {
    hash.get(..16)
        .and_then(|head| u64::from_str_radix(head, 16).ok())
        .unwrap_or_default()
}
