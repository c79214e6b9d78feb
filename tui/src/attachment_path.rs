//! Turning typed or pasted text into a local image path.
//!
//! Accepts `file://` URLs, `~/` paths, shell-quoted or escaped single paths, and Windows
//! drive/UNC paths. On WSL, drive paths are mapped under `/mnt/<drive>`.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Parse `input` as a single local path. Returns `None` for empty input or for text that
/// splits into more than one shell token.
pub fn parse_attachment_path(input: &str) -> Option<PathBuf> {
    parse_with_wsl(input, running_under_wsl())
}

fn parse_with_wsl(input: &str, wsl: bool) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(url) = url::Url::parse(input)
        && url.scheme() == "file"
    {
        return url.to_file_path().ok();
    }

    // POSIX shlex treats backslashes as escapes, so Windows paths bypass it.
    if is_windows_path(input) {
        return Some(windows_path(input, wsl));
    }

    let mut tokens = shlex::Shlex::new(input);
    let first = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    if is_windows_path(&first) {
        return Some(windows_path(&first, wsl));
    }
    Some(expand_home(first))
}

fn is_windows_path(text: &str) -> bool {
    let mut chars = text.chars();
    let drive = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.next() == Some(':')
        && matches!(chars.next(), Some('\\' | '/'));
    drive || text.starts_with("\\\\")
}

fn windows_path(text: &str, wsl: bool) -> PathBuf {
    if wsl && let Some(mapped) = map_drive_path_to_wsl(text) {
        return mapped;
    }
    PathBuf::from(text)
}

/// `C:\Users\x.png` -> `/mnt/c/Users/x.png`. UNC paths have no WSL mapping.
fn map_drive_path_to_wsl(text: &str) -> Option<PathBuf> {
    if text.starts_with("\\\\") {
        return None;
    }
    let drive = text.chars().next()?.to_ascii_lowercase();
    let rest = text.get(2..)?;
    let mut mapped = PathBuf::from(format!("/mnt/{drive}"));
    mapped.extend(rest.split(['\\', '/']).filter(|part| !part.is_empty()));
    Some(mapped)
}

fn expand_home(path: String) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

fn running_under_wsl() -> bool {
    static WSL: OnceLock<bool> = OnceLock::new();
    *WSL.get_or_init(|| {
        if !cfg!(target_os = "linux") {
            return false;
        }
        let kernel_mentions_wsl = std::fs::read_to_string("/proc/version")
            .map(|version| {
                let version = version.to_lowercase();
                version.contains("microsoft") || version.contains("wsl")
            })
            .unwrap_or(false);
        // Custom WSL kernels may not say so in /proc/version.
        kernel_mentions_wsl
            || std::env::var_os("WSL_DISTRO_NAME").is_some()
            || std::env::var_os("WSL_INTEROP").is_some()
    })
}
