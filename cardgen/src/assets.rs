use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Overrides assets root discovery.
pub const ASSETS_ENV: &str = "XIUXIAN_ASSETS_DIR";
/// Explicit font file, tried before the built-in candidate list.
pub const FONT_ENV: &str = "XIUXIAN_FONT";

/// Directory layout under an assets root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
	pub root: PathBuf,
	pub fonts: PathBuf,
	pub images: PathBuf,
	pub textures: PathBuf,
	pub output: PathBuf,
}

impl AssetLayout {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		let root = root.into();
		Self {
			fonts: root.join("fonts"),
			images: root.join("images"),
			textures: root.join("textures"),
			output: root.join("output"),
			root,
		}
	}

	/// Find the assets root in a way that works both:
	/// - when running from the repo, and
	/// - when running a packaged binary (assets next to the executable).
	///
	/// `XIUXIAN_ASSETS_DIR` wins outright. Otherwise the first of the
	/// executable's directory and the current directory that already holds a
	/// `fonts/` or `output/` folder is used, then the platform data dir.
	pub fn discover() -> Self {
		if let Some(dir) = std::env::var_os(ASSETS_ENV) {
			tracing::debug!(root = ?dir, "assets root from {ASSETS_ENV}");
			return Self::new(dir);
		}

		let mut candidates: Vec<PathBuf> = Vec::new();
		if let Ok(exe) = std::env::current_exe()
			&& let Some(dir) = exe.parent()
		{
			candidates.push(dir.to_path_buf());
		}
		if let Ok(cwd) = std::env::current_dir() {
			candidates.push(cwd);
		}

		for base in &candidates {
			if base.join("fonts").is_dir() || base.join("output").is_dir() {
				tracing::debug!(root = %base.display(), "assets root discovered");
				return Self::new(base);
			}
		}

		let fallback = dirs::data_dir()
			.map(|p| p.join("xiuxian-cards"))
			.or_else(|| candidates.pop())
			.unwrap_or_else(|| PathBuf::from("."));
		tracing::debug!(root = %fallback.display(), "no assets root found; using fallback");
		Self::new(fallback)
	}

	/// Create every directory of the layout. Idempotent.
	pub fn ensure(&self) -> Result<()> {
		for dir in [&self.fonts, &self.images, &self.textures, &self.output] {
			std::fs::create_dir_all(dir).with_context(|| format!("Create assets dir {}", dir.display()))?;
		}
		Ok(())
	}

	pub fn dirs(&self) -> [(&'static str, &Path); 4] {
		[
			("fonts", self.fonts.as_path()),
			("images", self.images.as_path()),
			("textures", self.textures.as_path()),
			("output", self.output.as_path()),
		]
	}

	pub fn cache_dir(&self) -> PathBuf {
		self.output.join("cache")
	}

	pub fn config_path(&self) -> PathBuf {
		crate::ImageConfig::path_in(&self.root)
	}

	/// Font files to try, in order.
	pub fn font_candidates(&self) -> Vec<PathBuf> {
		let mut candidates = Vec::new();
		if let Some(font) = std::env::var_os(FONT_ENV) {
			candidates.push(PathBuf::from(font));
		}
		candidates.push(self.fonts.join("SourceHanSansCN-Regular.otf"));
		candidates.push(self.fonts.join("NotoSansCJK-Regular.ttc"));
		candidates.extend(
			[
				"/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
				"/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
				"/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
				"/System/Library/Fonts/PingFang.ttc",
				"C:\\Windows\\Fonts\\msyh.ttc",
			]
			.into_iter()
			.map(PathBuf::from),
		);
		candidates
	}

	/// Texture image for a theme: `textures/{theme}.png`, then `.jpg`.
	pub fn texture_for(&self, theme: &str) -> Option<PathBuf> {
		["png", "jpg"]
			.into_iter()
			.map(|ext| self.textures.join(format!("{theme}.{ext}")))
			.find(|p| p.is_file())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ensure_is_idempotent() {
		let dir = tempfile::TempDir::new().unwrap();
		let layout = AssetLayout::new(dir.path());
		layout.ensure().unwrap();
		layout.ensure().unwrap();
		for (_, path) in layout.dirs() {
			assert!(path.is_dir());
		}
		assert_eq!(layout.cache_dir(), dir.path().join("output").join("cache"));
	}

	#[test]
	fn bundled_fonts_come_before_system_fonts() {
		let layout = AssetLayout::new("/srv/cards");
		let candidates = layout.font_candidates();
		let bundled = candidates
			.iter()
			.position(|p| p == Path::new("/srv/cards/fonts/SourceHanSansCN-Regular.otf"))
			.unwrap();
		let system = candidates
			.iter()
			.position(|p| p == Path::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"))
			.unwrap();
		assert!(bundled < system);
	}

	#[test]
	fn texture_lookup() {
		let dir = tempfile::TempDir::new().unwrap();
		let layout = AssetLayout::new(dir.path());
		layout.ensure().unwrap();
		assert_eq!(layout.texture_for("sect"), None);
		std::fs::write(layout.textures.join("sect.jpg"), b"").unwrap();
		assert_eq!(layout.texture_for("sect"), Some(layout.textures.join("sect.jpg")));
	}
}
