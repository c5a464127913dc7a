//! Environment diagnostics: which font would be used and whether cards can be
//! written.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use render::{CardFont, FontSource};

use crate::AssetLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCheck {
    pub path: PathBuf,
    pub exists: bool,
    pub size: Option<u64>,
    pub readable: bool,
}

impl FontCheck {
    pub fn inspect(path: &Path) -> Self {
        let meta = std::fs::metadata(path).ok().filter(|m| m.is_file());
        let readable = meta.is_some()
            && std::fs::File::open(path)
                .and_then(|mut f| f.read(&mut [0u8; 4]))
                .is_ok_and(|n| n > 0);
        Self {
            path: path.to_path_buf(),
            exists: meta.is_some(),
            size: meta.map(|m| m.len()),
            readable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub font: FontSource,
    pub candidates: Vec<FontCheck>,
    pub dirs: Vec<(&'static str, PathBuf, bool)>,
    /// `Err` carries why the scratch file could not be written.
    pub output_writable: Result<(), String>,
}

impl Report {
    /// An outline font resolved and the output directory takes writes.
    pub fn is_healthy(&self) -> bool {
        self.font != FontSource::Builtin && self.output_writable.is_ok()
    }
}

pub fn diagnose(layout: &AssetLayout, candidates: &[PathBuf]) -> Report {
    let font = CardFont::resolve(candidates).source().clone();
    let checks = candidates.iter().map(|p| FontCheck::inspect(p)).collect();
    let dirs = layout
        .dirs()
        .into_iter()
        .map(|(name, path)| (name, path.to_path_buf(), path.is_dir()))
        .collect();

    Report {
        font,
        candidates: checks,
        dirs,
        output_writable: check_writable(&layout.output),
    }
}

fn check_writable(dir: &Path) -> Result<(), String> {
    let scratch = dir.join(".cardgen_write_test");
    std::fs::create_dir_all(dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
    std::fs::write(&scratch, b"ok").map_err(|e| format!("write {}: {e}", scratch.display()))?;
    std::fs::remove_file(&scratch).map_err(|e| format!("remove {}: {e}", scratch.display()))?;
    Ok(())
}

fn mark(ok: bool) -> &'static str {
    if ok { "✓" } else { "✗" }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Font: {}", self.font)?;
        if self.font == FontSource::Builtin {
            writeln!(f, "  ✗ no CJK font found; Chinese text will render as boxes")?;
        }

        writeln!(f, "Font candidates:")?;
        for check in &self.candidates {
            match check.size {
                Some(size) => writeln!(
                    f,
                    "  {} {} ({:.1} MB, {})",
                    mark(check.readable),
                    check.path.display(),
                    size as f64 / (1024.0 * 1024.0),
                    if check.readable { "readable" } else { "unreadable" },
                )?,
                None => writeln!(f, "  {} {} (missing)", mark(false), check.path.display())?,
            }
        }

        writeln!(f, "Asset directories:")?;
        for (name, path, present) in &self.dirs {
            writeln!(f, "  {} {name}: {}", mark(*present), path.display())?;
        }

        match &self.output_writable {
            Ok(()) => writeln!(f, "Output: {} writable", mark(true)),
            Err(err) => writeln!(f, "Output: {} not writable ({err})", mark(false)),
        }
    }
}
