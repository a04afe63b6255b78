// commands/strategy.rs — Strategist stage: topics and ideas.
// All business logic lives in engine/ideas.rs.

use serde::Serialize;

use brandfactory_core::navigation::{current_profile, current_profile_mut};
use brandfactory_core::{Idea, Pillar, Stage, Topic};

use crate::atoms::error::EngineError;
use crate::commands::fail;
use crate::engine::ideas;
use crate::engine::state::FactoryState;

#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub id: String,
    pub name: String,
    pub ideas: usize,
    pub scripted: usize,
    pub selected: bool,
}

impl TopicSummary {
    fn of(topic: &Topic, selected: Option<&str>) -> Self {
        TopicSummary {
            id: topic.id.clone(),
            name: topic.name.clone(),
            ideas: topic.ideas.len(),
            scripted: topic.ideas.iter().filter(|i| i.is_scripted()).count(),
            selected: selected == Some(topic.id.as_str()),
        }
    }
}

// ── Topics ─────────────────────────────────────────────────────────────────

/// Create a topic in the current profile and select it.
pub fn create_topic(state: &mut FactoryState, name: &str) -> Result<TopicSummary, String> {
    let profile = current_profile_mut(&mut state.store).map_err(|e| fail("store")(e.into()))?;
    let id = profile
        .create_topic(name)
        .map(|t| t.id.clone())
        .map_err(|e| fail("store")(e.into()))?;
    select_topic(state, &id)
}

pub fn select_topic(state: &mut FactoryState, id: &str) -> Result<TopicSummary, String> {
    state
        .nav
        .select_topic(&state.store, id.trim())
        .map_err(|e| fail("store")(e.into()))?;
    state.nav.stage = Stage::Strategist;
    let (_, topic) = state
        .nav
        .resolve_topic(&state.store)
        .map_err(|e| EngineError::from(e).to_string())?;
    Ok(TopicSummary::of(topic, Some(topic.id.as_str())))
}

pub fn list_topics(state: &FactoryState) -> Result<Vec<TopicSummary>, String> {
    let profile = current_profile(&state.store).map_err(|e| EngineError::from(e).to_string())?;
    let selected = state.nav.topic_id();
    Ok(profile
        .topics_by_name()
        .into_iter()
        .map(|t| TopicSummary::of(t, selected))
        .collect())
}

// ── Ideas ──────────────────────────────────────────────────────────────────

/// Ideas of the selected topic, in insertion order.
pub fn list_ideas(state: &FactoryState) -> Result<Vec<Idea>, String> {
    let (_, topic) = state
        .nav
        .resolve_topic(&state.store)
        .map_err(|e| EngineError::from(e).to_string())?;
    Ok(topic.ideas.clone())
}

/// Generate a batch for the selected topic: ten for an empty topic, five
/// more otherwise. Returns the topic's full idea list.
pub async fn generate_ideas(state: &mut FactoryState) -> Result<Vec<Idea>, String> {
    let target = state.nav.topic_ref(&state.store).map_err(|e| fail("ideas")(e.into()))?;
    let generator = state.generator.clone();
    let profile = state
        .store
        .profile_mut(&target.profile_id)
        .map_err(|e| fail("ideas")(e.into()))?;
    ideas::generate_ideas(profile, &target.topic_id, generator.as_ref())
        .await
        .map(|all| all.to_vec())
        .map_err(fail("ideas"))
}

/// Add an idea by hand. `pillar` is a pillar label; blank means OTHER.
pub fn add_idea(
    state: &mut FactoryState,
    title: &str,
    pillar: Option<&str>,
    visual_hook: Option<&str>,
) -> Result<Idea, String> {
    let pillar = match pillar.map(str::trim).filter(|p| !p.is_empty()) {
        Some(label) => Some(label.parse::<Pillar>().map_err(|e| fail("ideas")(e.into()))?),
        None => None,
    };
    let target = state.nav.topic_ref(&state.store).map_err(|e| fail("ideas")(e.into()))?;
    let profile = state
        .store
        .profile_mut(&target.profile_id)
        .map_err(|e| fail("ideas")(e.into()))?;
    ideas::add_manual_idea(profile, &target.topic_id, title, pillar, visual_hook)
        .cloned()
        .map_err(fail("ideas"))
}

/// Select an idea of the selected topic and move to the Scriptwriter stage.
pub fn select_idea(state: &mut FactoryState, id: &str) -> Result<Idea, String> {
    state
        .nav
        .select_idea(&state.store, id.trim())
        .map_err(|e| fail("store")(e.into()))?;
    state.nav.stage = Stage::Scriptwriter;
    let (_, _, idea) = state
        .nav
        .resolve_idea(&state.store)
        .map_err(|e| EngineError::from(e).to_string())?;
    Ok(idea.clone())
}
