//! Persistent default flags.
//!
//! Defaults live in rc files holding whitespace-separated command-line
//! flags, `#` starting a comment line. The global file is read first, then
//! a `.gridcellrc` in the working directory, then the real command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::editor::EditorOptions;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub direct_edit: bool,
    pub no_header: bool,
    pub select_class: Option<String>,
    pub edit_class: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Switches are or-ed; valued options from `other`
    /// win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            direct_edit: self.direct_edit || other.direct_edit,
            no_header: self.no_header || other.no_header,
            select_class: other
                .select_class
                .clone()
                .or_else(|| self.select_class.clone()),
            edit_class: other
                .edit_class
                .clone()
                .or_else(|| self.edit_class.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    /// Editor options these flags select.
    pub fn editor_options(&self) -> EditorOptions {
        let defaults = EditorOptions::default();
        EditorOptions {
            edit_key: !self.direct_edit,
            select_class: self.select_class.clone().unwrap_or(defaults.select_class),
            edit_class: self.edit_class.clone().unwrap_or(defaults.edit_class),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("gridcell").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("gridcell")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("gridcell").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("gridcell")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".gridcellrc")
}

/// Read flags from an rc file. A missing file yields no flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to an rc file, creating its directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# gridcell defaults (saved with --save)".to_string()];
    if flags.direct_edit {
        lines.push("--direct-edit".to_string());
    }
    if flags.no_header {
        lines.push("--no-header".to_string());
    }
    if let Some(class) = &flags.select_class {
        lines.push(format!("--select-class {class}"));
    }
    if let Some(class) = &flags.edit_class {
        lines.push(format!("--edit-class {class}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove an rc file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--direct-edit" => flags.direct_edit = true,
            "--no-header" => flags.no_header = true,
            "--select-class" | "--edit-class" | "--debug-log" => {
                if let Some(next) = tokens.get(i + 1) {
                    set_valued(&mut flags, token, next);
                    i += 1;
                }
            }
            _ => {
                if let Some((name, value)) = token.split_once('=') {
                    set_valued(&mut flags, name, value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn set_valued(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--select-class" => flags.select_class = Some(value.to_string()),
        "--edit-class" => flags.edit_class = Some(value.to_string()),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}
