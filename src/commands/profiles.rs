// commands/profiles.rs — Profile creation, selection and listing.
// Profile data lives in brandfactory-core; this is only the thin view layer.

use serde::Serialize;

use brandfactory_core::navigation::current_profile;
use brandfactory_core::{BrandDna, Profile, ProfileStage, Stage};

use crate::atoms::error::EngineError;
use crate::commands::fail;
use crate::engine::state::FactoryState;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub stage: String,
    pub turns: usize,
    pub topics: usize,
    pub current: bool,
}

impl ProfileSummary {
    fn of(profile: &Profile, current: Option<&str>) -> Self {
        ProfileSummary {
            id: profile.id.clone(),
            name: profile.name.clone(),
            display_name: profile.display_name().to_string(),
            stage: profile.stage().to_string(),
            turns: profile.chat_history.len(),
            topics: profile.topics.len(),
            current: current == Some(profile.id.as_str()),
        }
    }
}

pub fn create_profile(state: &mut FactoryState, name: &str) -> Result<ProfileSummary, String> {
    let id = state
        .store
        .create_profile(name)
        .map(|p| p.id.clone())
        .map_err(|e| fail("store")(e.into()))?;
    state.nav.reset_selection();
    state.nav.stage = Stage::Profiler;
    summary(state, &id)
}

pub fn select_profile(state: &mut FactoryState, id: &str) -> Result<ProfileSummary, String> {
    state
        .nav
        .select_profile(&mut state.store, id.trim())
        .map_err(|e| fail("store")(e.into()))?;
    summary(state, id.trim())
}

pub fn list_profiles(state: &FactoryState) -> Vec<ProfileSummary> {
    let current = state.store.current_profile_id();
    state
        .store
        .profiles_by_name()
        .into_iter()
        .map(|p| ProfileSummary::of(p, current))
        .collect()
}

pub fn current(state: &FactoryState) -> Result<ProfileSummary, String> {
    let profile = current_profile(&state.store).map_err(|e| EngineError::from(e).to_string())?;
    Ok(ProfileSummary::of(profile, Some(profile.id.as_str())))
}

/// The current profile's DNA, failing when none was extracted yet.
pub fn current_dna(state: &FactoryState) -> Result<BrandDna, String> {
    let profile = current_profile(&state.store).map_err(|e| EngineError::from(e).to_string())?;
    match (&profile.dna, profile.stage()) {
        (Some(dna), _) => Ok(dna.clone()),
        (None, ProfileStage::New) => {
            Err(EngineError::insufficient("the interview has not started yet").to_string())
        }
        (None, _) => Err(EngineError::insufficient("no brand profile extracted yet").to_string()),
    }
}

pub fn set_stage(state: &mut FactoryState, stage: Stage) -> Stage {
    state.nav.stage = stage;
    stage
}

fn summary(state: &FactoryState, id: &str) -> Result<ProfileSummary, String> {
    let profile = state.store.profile(id).map_err(|e| EngineError::from(e).to_string())?;
    Ok(ProfileSummary::of(profile, state.store.current_profile_id()))
}
