use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Studio project wiring: project and dataset identifiers, deployment flags,
/// schema revision selection and the studio workspaces.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StudioConfigInner {
    /// Hosted project identifier (opaque).
    pub project_id: String,
    /// Dataset used by host-side tooling (`SANITY_STUDIO_DATASET`).
    pub dataset: String,
    /// Deployment application id (`SANITY_STUDIO_APP_ID`), empty until deployed.
    pub app_id: String,
    /// Whether the deployed studio follows platform releases automatically.
    pub auto_updates: bool,
    pub schema: SchemaConfig,
    pub workspaces: Vec<WorkspaceConfig>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct StudioConfig {
    #[serde(flatten, default)]
    inner: Arc<StudioConfigInner>,
}

impl Deref for StudioConfig {
    type Target = StudioConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for StudioConfig {
    fn deref_mut(&mut self) -> &mut StudioConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

impl StudioConfig {
    /// Looks up a workspace by name.
    #[must_use]
    pub fn workspace(&self, name: &str) -> Option<&WorkspaceConfig> {
        self.workspaces.iter().find(|w| w.name == name)
    }
}

/// Schema selection knobs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub ads_page: AdsPageRevision,
}

/// Which revision of the ads landing page schema is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdsPageRevision {
    /// Earlier revision: headings and copy are plain strings and text areas.
    Plain,
    /// Current revision: headings and copy are rich text blocks.
    #[default]
    Rich,
}

/// One studio workspace (a dataset mounted at a base path).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub name: String,
    pub title: String,
    pub dataset: String,
    pub base_path: String,
}

// --- Default ---

impl Default for StudioConfigInner {
    fn default() -> Self {
        Self {
            project_id: "st0v8u3d".to_owned(),
            dataset: "development".to_owned(),
            app_id: String::new(),
            auto_updates: true,
            schema: SchemaConfig::default(),
            workspaces: vec![
                WorkspaceConfig::new("development", "Atria Renewable (Dev)", "development", "/dev"),
                WorkspaceConfig::new("production", "Atria Renewable (Prod)", "production", "/prod"),
            ],
        }
    }
}

impl WorkspaceConfig {
    #[must_use]
    pub fn new(name: &str, title: &str, dataset: &str, base_path: &str) -> Self {
        Self {
            name: name.to_owned(),
            title: title.to_owned(),
            dataset: dataset.to_owned(),
            base_path: base_path.to_owned(),
        }
    }
}
