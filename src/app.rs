//! Session wiring
//!
//! Builds the collaborators and state machines for one user session from the
//! loaded settings. Nothing here is global: a session lives as long as its
//! `App` value.

use crate::settings::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use vidscope_client::{HttpBackend, HttpBackendConfig};
use vidscope_core::{AssetLocator, EventBus, PlaybackController, ResilienceAdapter, SearchSession};

pub struct App {
    pub session: SearchSession,
    pub playback: PlaybackController,
    pub adapter: ResilienceAdapter,
    pub assets: Arc<dyn AssetLocator>,
}

impl App {
    pub fn from_settings(settings: &AppConfig) -> Result<Self> {
        let backend = HttpBackend::new(
            HttpBackendConfig::new()
                .with_base_url(settings.backend.base_url.clone())
                .with_timeout(settings.backend.timeout()),
        )
        .context("Failed to create search backend")?;
        let assets: Arc<dyn AssetLocator> = Arc::new(backend.assets());

        let adapter = ResilienceAdapter::new(Arc::new(backend), settings.search.degraded_mode);
        let session = SearchSession::new(adapter.clone(), EventBus::new(settings.events.capacity));
        let playback = PlaybackController::new(assets.clone());

        info!(
            base_url = %settings.backend.base_url,
            degraded_mode = ?adapter.mode(),
            "session ready"
        );

        Ok(Self {
            session,
            playback,
            adapter,
            assets,
        })
    }
}
