//! # Labels
//!
//! User-visible strings, such as the name shown next to "Undo". English defaults are built in,
//! and may be overridden per-key by a `labels.toml` in the user's preferences.

use crate::tool::ToolKind;

const DOCUMENTATION: &str = r#"# Scrawl labels. You may edit this file, but be aware that formatting and comments will not
# be preserved. Missing keys fall back to the built-in English text.

# [undo] holds the name of the undo action for each tool, keyed by tool kind, plus
# `none` which is shown when there is nothing left to undo.

# Examples:
# [undo]
# none = "Nothing to Undo"
# eraser = "Undo Eraser"

"#;

/// Key of the label shown when nothing can be undone.
pub const NOTHING_TO_UNDO: &str = "none";
/// Shared with the `scrawl` front-end, rather than this crate's own name.
const PREFERENCES_NAME: &str = "scrawl";

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(PREFERENCES_NAME);
    Some(base_dir)
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Labels {
    /// Overrides only. Lookups fall back to [`default_undo`].
    #[serde(default)]
    pub undo: hashbrown::HashMap<String, String>,
}
impl Labels {
    const FILENAME: &'static str = "labels.toml";
    /// Shared global labels, loaded from user preferences.
    /// (Or defaulted, if unavailable for some reason)
    #[must_use]
    pub fn get() -> &'static Self {
        static GLOBAL_LABELS: std::sync::OnceLock<Labels> = std::sync::OnceLock::new();

        GLOBAL_LABELS.get_or_init(|| match preferences_dir() {
            None => {
                log::debug!("no preferences dir, using default labels");
                Self::default()
            }
            Some(mut dir) => {
                dir.push(Self::FILENAME);
                Self::load_or_default(&dir)
            }
        })
    }
    #[must_use]
    fn load_or_default(path: &std::path::Path) -> Self {
        // A missing file is the common case and not worth a warning.
        if !path.exists() {
            return Self::default();
        }
        let load = || -> anyhow::Result<Self> {
            let string = std::fs::read_to_string(path)?;
            Self::from_toml_str(&string)
        };
        match load() {
            Ok(labels) => labels,
            Err(e) => {
                log::warn!("failed to load labels from {path:?}, defaulting: {e:#}");
                Self::default()
            }
        }
    }
    pub fn from_toml_str(string: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(string)?)
    }
    /// Write the current overrides to the user's preferences, replacing any existing file.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_in(&Self::dir()?, true).map(|_| ())
    }
    /// Write the current overrides to the user's preferences, unless a file is already there.
    /// Returns whether anything was written.
    pub fn save_if_missing(&self) -> anyhow::Result<bool> {
        self.save_in(&Self::dir()?, false)
    }
    fn dir() -> anyhow::Result<std::path::PathBuf> {
        preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))
    }
    fn save_in(&self, dir: &std::path::Path, overwrite: bool) -> anyhow::Result<bool> {
        // Explicity do *not* create recursively. If not found, the user probably has a good reason.
        // Ignore errors (could already exist). Any real errors will be emitted by file access below.
        let _ = std::fs::DirBuilder::new().create(dir);

        let path = dir.join(Self::FILENAME);
        let string = DOCUMENTATION.to_owned() + &toml::ser::to_string_pretty(self)?;
        if overwrite {
            std::fs::write(path, string)?;
            return Ok(true);
        }
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(mut file) => {
                std::io::Write::write_all(&mut file, string.as_bytes())?;
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
    /// Name of the action which undoes a stroke of `kind`.
    #[must_use]
    pub fn undo_name(&self, kind: ToolKind) -> &str {
        self.undo_by_key(kind.as_ref())
    }
    /// Name shown when there is nothing left to undo.
    #[must_use]
    pub fn nothing_to_undo(&self) -> &str {
        self.undo_by_key(NOTHING_TO_UNDO)
    }
    fn undo_by_key(&self, key: &str) -> &str {
        self.undo
            .get(key)
            .map_or_else(|| default_undo(key), String::as_str)
    }
}

/// Built-in English undo names.
#[must_use]
pub fn default_undo(key: &str) -> &'static str {
    match key {
        NOTHING_TO_UNDO => "Nothing to Undo",
        "pen" => "Undo Pen",
        "highlighter" => "Undo Highlighter",
        "line" => "Undo Line",
        "arrow" => "Undo Arrow",
        "rectangle" => "Undo Rectangle",
        "oval" => "Undo Oval",
        "eraser" => "Undo Eraser",
        _ => "Undo",
    }
}
