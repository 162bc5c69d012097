//! Best-effort audio playback through the platform opener.

use std::path::Path;
use std::process::Command;

use anyhow::Context;

pub fn play(path: &Path) -> anyhow::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else if std::env::var_os("TERMUX_VERSION").is_some() {
        let mut c = Command::new("termux-media-player");
        c.arg("play").arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    command
        .spawn()
        .with_context(|| format!("could not launch a media player for {}", path.display()))?;
    Ok(())
}
