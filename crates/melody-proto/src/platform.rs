use std::path::PathBuf;
use std::process::Command;

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/melody/ (XDG standard)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join("melody")
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("melody")
    }
}

pub fn config_dir() -> PathBuf {
    // On Windows, prefer a portable config.toml beside the executable
    #[cfg(windows)]
    {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let portable_config = exe_dir.join("config.toml");
                if portable_config.exists() {
                    return exe_dir.to_path_buf();
                }
            }
        }
    }

    // On macOS and Linux, always use ~/.config/melody/
    // (avoid macOS Application Support folder for consistency)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("melody")
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("melody")
    }
}

/// Open `url` in the system browser, detached from this process.
///
/// The login flow is a full browser navigation: the auth server redirects
/// back to our loopback callback listener when it is done with the user.
pub fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn()?;
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Command::new("xdg-open").arg(url).spawn()?;
    }
    #[cfg(windows)]
    {
        // `start` is a cmd builtin; the empty string is the window title slot.
        Command::new("cmd").args(["/C", "start", "", url]).spawn()?;
    }
    Ok(())
}
