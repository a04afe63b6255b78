// ── Brand Factory Core: Profile Store ──────────────────────────────────────
// Session-scoped root of ownership. Every Profile is reachable only through
// the store; the store is created empty and replaced wholesale on import.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::model::Profile;
use crate::snapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStore {
    #[serde(deserialize_with = "Option::deserialize")]
    pub(crate) current_profile_id: Option<String>,
    pub(crate) profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a profile, seed its interview, and make it current.
    pub fn create_profile(&mut self, name: &str) -> CoreResult<&Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("profile name must not be empty"));
        }
        let profile = Profile::new(name);
        let id = profile.id.clone();
        log::info!("[store] Profile '{}' created ({})", name, id);
        self.current_profile_id = Some(id.clone());
        Ok(self.profiles.entry(id).or_insert(profile))
    }

    /// Point the store at an existing profile. On failure the current
    /// pointer is left as it was.
    pub fn select_profile(&mut self, id: &str) -> CoreResult<()> {
        if !self.profiles.contains_key(id) {
            return Err(CoreError::not_found("profile", id));
        }
        self.current_profile_id = Some(id.to_string());
        Ok(())
    }

    /// Current profile id, or `None` when unset or dangling.
    pub fn current_profile_id(&self) -> Option<&str> {
        self.current_profile_id
            .as_deref()
            .filter(|id| self.profiles.contains_key(*id))
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.current_profile_id().and_then(|id| self.profiles.get(id))
    }

    pub fn current_profile_mut(&mut self) -> Option<&mut Profile> {
        let id = self.current_profile_id()?.to_string();
        self.profiles.get_mut(&id)
    }

    pub fn profile(&self, id: &str) -> CoreResult<&Profile> {
        self.profiles.get(id).ok_or_else(|| CoreError::not_found("profile", id))
    }

    pub fn profile_mut(&mut self, id: &str) -> CoreResult<&mut Profile> {
        self.profiles.get_mut(id).ok_or_else(|| CoreError::not_found("profile", id))
    }

    /// Profiles ordered by name for display.
    pub fn profiles_by_name(&self) -> Vec<&Profile> {
        let mut profiles: Vec<&Profile> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Serialize the whole store: every profile, transcript, topic and idea.
    pub fn export(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::format(format!("export failed: {}", e)))
    }

    /// Replace the whole store from a snapshot document. The document is fully
    /// validated before anything is touched.
    pub fn import(&mut self, document: &str) -> CoreResult<()> {
        let replacement = snapshot::parse(document)?;
        log::info!(
            "[store] Imported snapshot with {} profile(s), replacing {}",
            replacement.len(),
            self.len()
        );
        *self = replacement;
        Ok(())
    }
}
