//! One-shot upload command.

use std::path::PathBuf;

use anyhow::{Context, bail};

use crate::config::Settings;
use crate::file::ShotFile;
use crate::upload::Uploader;

/// Upload a single file through the full pipeline and print its URL.
pub async fn run_upload(settings: Settings, file: PathBuf) -> anyhow::Result<()> {
    if !file.is_file() {
        bail!("not a file: {}", file.display());
    }

    let mut uploader = Uploader::system(settings);
    let shot = ShotFile::from_path(file);

    let uploaded = tokio::task::spawn_blocking(move || uploader.upload(shot))
        .await
        .context("upload task panicked")??;

    if let Some(url) = uploaded.url {
        println!("{url}");
    }
    Ok(())
}
