//! Site settings, served through an explicit TTL cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use storefront_core::cache::TimedCache;
use storefront_core::result::AppResult;
use storefront_entity::settings::SiteSettings;

/// Data-layer collaborator holding the single site settings row.
#[async_trait]
pub trait SettingsStore: Send + Sync + std::fmt::Debug + 'static {
    /// Loads the current settings.
    async fn load(&self) -> AppResult<SiteSettings>;

    /// Replaces the stored settings.
    async fn save(&self, settings: &SiteSettings) -> AppResult<()>;
}

/// Process-local settings store, used when no database is wired in.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<SiteSettings>,
}

impl MemorySettingsStore {
    /// Creates a store seeded with `settings`.
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> AppResult<SiteSettings> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &SiteSettings) -> AppResult<()> {
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}

/// Reads settings through a [`TimedCache`] and invalidates it on update.
#[derive(Debug)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    cache: TimedCache<SiteSettings>,
}

impl SettingsService {
    /// Creates a service caching reads for `ttl`.
    pub fn new(store: Arc<dyn SettingsStore>, ttl: Duration) -> Self {
        Self {
            store,
            cache: TimedCache::new(ttl),
        }
    }

    /// Returns the current settings.
    ///
    /// A failing store yields empty settings so public pages still render;
    /// the failure is not cached.
    pub async fn get(&self) -> SiteSettings {
        match self.cache.get_or_try_refresh(|| self.store.load()).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Failed to load site settings");
                SiteSettings::default()
            }
        }
    }

    /// Persists new settings and drops the cached copy.
    pub async fn update(&self, settings: SiteSettings) -> AppResult<SiteSettings> {
        self.store.save(&settings).await?;
        self.cache.invalidate().await;
        info!(brand = %settings.brand_name, "Site settings updated");
        Ok(settings)
    }
}
