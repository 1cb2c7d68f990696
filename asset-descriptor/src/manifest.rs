use std::path::{Path, PathBuf};

use crate::{read_to_string, DescriptorError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteEntry {
    pub path: PathBuf,
    /// 1-based line in the manifest.
    pub line: usize,
}

impl SpriteEntry {
    /// Name used in diagnostics and logs.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

/// Ordered list of sprite images, one path per line. Blank lines and lines
/// starting with `#` are skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpriteManifest {
    pub sprites: Vec<SpriteEntry>,
}

impl SpriteManifest {
    /// Parses `text`, resolving relative paths against `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self, DescriptorError> {
        let mut sprites = Vec::new();

        for (i, text) in text.lines().enumerate() {
            let line = i + 1;
            let text = text.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            if text.contains('\0') {
                return Err(DescriptorError::malformed(line, "path contains a NUL byte"));
            }

            sprites.push(SpriteEntry {
                path: base.join(text),
                line,
            });
        }

        Ok(Self { sprites })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&read_to_string(path)?, base)
    }

    /// Manifest over explicit paths; entries are numbered in iteration order.
    pub fn from_paths<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        let sprites = paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| SpriteEntry {
                path: path.into(),
                line: i + 1,
            })
            .collect();

        Self { sprites }
    }
}
