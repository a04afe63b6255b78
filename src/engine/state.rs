// engine/state.rs — Session state for one operator.
// Canonical home for FactoryState: the profile store, the navigation
// selection, the effective configuration and the two service handles.
// One session owns it exclusively and awaits each action before the next,
// so there are no locks.

use std::sync::Arc;

use log::info;

use brandfactory_core::{Navigation, ProfileStore};

use crate::atoms::error::EngineResult;
use crate::atoms::traits::{AudioTranscriber, TextGenerator};
use crate::atoms::types::FactoryConfig;
use crate::engine::providers;
use crate::engine::scripts::ScriptTemplate;

pub struct FactoryState {
    pub store: ProfileStore,
    pub nav: Navigation,
    pub config: FactoryConfig,
    pub template: ScriptTemplate,
    pub generator: Arc<dyn TextGenerator>,
    /// `None` when the backend has no transcription endpoint.
    pub transcriber: Option<Arc<dyn AudioTranscriber>>,
}

impl FactoryState {
    /// Build a session around explicit service handles.
    pub fn new(
        config: FactoryConfig,
        generator: Arc<dyn TextGenerator>,
        transcriber: Option<Arc<dyn AudioTranscriber>>,
    ) -> EngineResult<Self> {
        let template = ScriptTemplate::new(config.scripts.template.clone())?;
        Ok(FactoryState {
            store: ProfileStore::new(),
            nav: Navigation::new(),
            config,
            template,
            generator,
            transcriber,
        })
    }

    /// Build a session with the providers named in the configuration.
    pub fn from_config(config: FactoryConfig) -> EngineResult<Self> {
        let generator = providers::text_generator(&config.provider)?;
        let transcriber = providers::transcriber(&config.provider)?;
        info!(
            "[engine] session ready: text={} audio={}",
            generator.name(),
            transcriber.as_ref().map(|t| t.name()).unwrap_or("disabled")
        );
        Self::new(config, generator, transcriber)
    }

    /// Replace the whole store with a snapshot. Selections are dropped.
    pub fn import_snapshot(&mut self, document: &str) -> EngineResult<()> {
        self.store.import(document)?;
        self.nav.reset_selection();
        Ok(())
    }
}
