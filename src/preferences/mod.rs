use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::Theme;

pub const THEME_KEY: &str = "theme";

/// Small JSON key-value file holding the dashboard's user preferences.
pub struct PreferenceStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PreferenceStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        PreferenceStore {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("invalid preferences file {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let bytes = serde_json::to_vec_pretty(values)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("writing {}", self.path.display()))
    }

    async fn read_theme(&self) -> anyhow::Result<Theme> {
        let values = self.read_all().await?;
        Ok(match values.get(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            None => Theme::default(),
        })
    }

    async fn write_theme(&self, theme: Theme) -> anyhow::Result<Theme> {
        let mut values = self.read_all().await?;
        values.insert(THEME_KEY.to_string(), theme.as_str().to_string());
        self.write_all(&values).await?;
        debug!("Theme set to {}", theme.as_str());
        Ok(theme)
    }

    /// Stored theme; dark when nothing usable is stored.
    pub async fn theme(&self) -> anyhow::Result<Theme> {
        let _guard = self.lock.lock().await;
        self.read_theme().await
    }

    pub async fn set_theme(&self, theme: Theme) -> anyhow::Result<Theme> {
        let _guard = self.lock.lock().await;
        self.write_theme(theme).await
    }

    /// Flips the stored theme. Read and write happen under one guard.
    pub async fn toggle_theme(&self) -> anyhow::Result<Theme> {
        let _guard = self.lock.lock().await;
        let current = self.read_theme().await?;
        self.write_theme(current.toggled()).await
    }
}
