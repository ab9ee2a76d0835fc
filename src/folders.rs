//! Well-known user folders
//!
//! | Folder | Windows | macOS / Linux |
//! |--------|---------|---------------|
//! | User | home | home |
//! | Documents | `home\Documents` | `$XDG_DOCUMENTS_DIR` (Linux) or `~/Documents` |
//! | Downloads | `home\Downloads` | `$XDG_DOWNLOAD_DIR` (Linux) or `~/Downloads` |
//! | Desktop | `home\Desktop` | `$XDG_DESKTOP_DIR` (Linux) or `~/Desktop` |
//! | AppData | `%APPDATA%` | `~/.config` |
//! | LocalAppData | `%LOCALAPPDATA%` | `~/.local/share` |
//! | Temp | `%TEMP%` | `$TEMP`, `$TMPDIR` or `/tmp` |
//!
//! The scan engine never calls into this module; callers resolve a folder
//! here and hand the path to it.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::BaseDirs;
use serde::Serialize;

/// A platform-specific standard folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnownFolder {
    User,
    Documents,
    Downloads,
    Desktop,
    #[value(name = "appdata")]
    AppData,
    #[value(name = "local-appdata")]
    LocalAppData,
    Temp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    Windows,
    MacOs,
    Xdg,
}

impl Platform {
    fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Xdg
        }
    }
}

impl KnownFolder {
    pub const ALL: [KnownFolder; 7] = [
        KnownFolder::User,
        KnownFolder::Documents,
        KnownFolder::Downloads,
        KnownFolder::Desktop,
        KnownFolder::AppData,
        KnownFolder::LocalAppData,
        KnownFolder::Temp,
    ];

    /// Resolve against the running process' environment.
    pub fn resolve(self) -> PathBuf {
        self.resolve_with(|key| std::env::var(key).ok(), &home_dir())
    }

    /// Resolve with an injected environment lookup and home directory.
    pub fn resolve_with<F>(self, env: F, home: &Path) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve_for(self, Platform::current(), &env, home)
    }
}

fn resolve_for(
    folder: KnownFolder,
    platform: Platform,
    env: &dyn Fn(&str) -> Option<String>,
    home: &Path,
) -> PathBuf {
    let env_path = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    match folder {
        KnownFolder::User => home.to_path_buf(),
        KnownFolder::Documents => user_dir(platform, env, home, "XDG_DOCUMENTS_DIR", "Documents"),
        KnownFolder::Downloads => user_dir(platform, env, home, "XDG_DOWNLOAD_DIR", "Downloads"),
        KnownFolder::Desktop => user_dir(platform, env, home, "XDG_DESKTOP_DIR", "Desktop"),
        KnownFolder::AppData => match platform {
            Platform::Windows => env_path("APPDATA")
                .unwrap_or_else(|| home.join("AppData").join("Roaming")),
            _ => home.join(".config"),
        },
        KnownFolder::LocalAppData => match platform {
            Platform::Windows => env_path("LOCALAPPDATA")
                .unwrap_or_else(|| home.join("AppData").join("Local")),
            _ => home.join(".local").join("share"),
        },
        KnownFolder::Temp => env_path("TEMP")
            .or_else(|| env_path("TMPDIR"))
            .unwrap_or_else(|| PathBuf::from("/tmp")),
    }
}

fn user_dir(
    platform: Platform,
    env: &dyn Fn(&str) -> Option<String>,
    home: &Path,
    xdg_key: &str,
    default_name: &str,
) -> PathBuf {
    if platform == Platform::Xdg {
        if let Some(value) = env(xdg_key).filter(|v| !v.is_empty()) {
            return PathBuf::from(expand_home(&value, home));
        }
    }
    home.join(default_name)
}

/// Expand `$HOME` and `${HOME}` as written in `user-dirs.dirs`.
fn expand_home(value: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    value.replace("${HOME}", &home).replace("$HOME", &home)
}

/// The current user's home directory.
pub fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("/"))
}
