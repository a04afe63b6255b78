// ── Brand Factory Core: Navigation ─────────────────────────────────────────
// Explicit selection state: which stage the operator is in and which topic
// and idea are selected inside the current profile. The current profile
// itself lives in the store so it travels with snapshots.
//
// Selections are resolved against the store on every use. A stale selection
// is reported as NotFound, never replaced by a guessed default.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::model::{Idea, Profile, Topic};
use crate::store::ProfileStore;

const NONE_SELECTED: &str = "(none selected)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Profiler,
    Strategist,
    Scriptwriter,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Profiler => "profiler",
            Stage::Strategist => "strategist",
            Stage::Scriptwriter => "scriptwriter",
        })
    }
}

impl FromStr for Stage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "profiler" | "profile" => Ok(Stage::Profiler),
            "2" | "strategist" | "strategy" => Ok(Stage::Strategist),
            "3" | "scriptwriter" | "script" => Ok(Stage::Scriptwriter),
            other => Err(CoreError::validation(format!("unknown stage '{}'", other))),
        }
    }
}

/// Fully resolved path to a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRef {
    pub profile_id: String,
    pub topic_id: String,
}

/// Fully resolved path to an idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaRef {
    pub profile_id: String,
    pub topic_id: String,
    pub idea_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub stage: Stage,
    topic_id: Option<String>,
    idea_id: Option<String>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic_id(&self) -> Option<&str> {
        self.topic_id.as_deref()
    }

    pub fn idea_id(&self) -> Option<&str> {
        self.idea_id.as_deref()
    }

    /// Forget topic and idea selections, e.g. after the current profile
    /// changed or the store was replaced.
    pub fn reset_selection(&mut self) {
        self.topic_id = None;
        self.idea_id = None;
    }

    /// Switch profile through the store and drop selections that belonged to
    /// the previous one. Nothing changes when the id is unknown.
    pub fn select_profile(&mut self, store: &mut ProfileStore, profile_id: &str) -> CoreResult<()> {
        store.select_profile(profile_id)?;
        self.reset_selection();
        Ok(())
    }

    pub fn select_topic(&mut self, store: &ProfileStore, topic_id: &str) -> CoreResult<()> {
        current_profile(store)?.topic(topic_id)?;
        if self.topic_id.as_deref() != Some(topic_id) {
            self.idea_id = None;
        }
        self.topic_id = Some(topic_id.to_string());
        Ok(())
    }

    pub fn select_idea(&mut self, store: &ProfileStore, idea_id: &str) -> CoreResult<()> {
        let (_, topic) = self.resolve_topic(store)?;
        topic.idea(idea_id)?;
        self.idea_id = Some(idea_id.to_string());
        Ok(())
    }

    pub fn resolve_topic<'a>(&self, store: &'a ProfileStore) -> CoreResult<(&'a Profile, &'a Topic)> {
        let profile = current_profile(store)?;
        let topic_id = self
            .topic_id
            .as_deref()
            .ok_or_else(|| CoreError::not_found("topic", NONE_SELECTED))?;
        Ok((profile, profile.topic(topic_id)?))
    }

    pub fn resolve_idea<'a>(
        &self,
        store: &'a ProfileStore,
    ) -> CoreResult<(&'a Profile, &'a Topic, &'a Idea)> {
        let (profile, topic) = self.resolve_topic(store)?;
        let idea_id = self
            .idea_id
            .as_deref()
            .ok_or_else(|| CoreError::not_found("idea", NONE_SELECTED))?;
        Ok((profile, topic, topic.idea(idea_id)?))
    }

    pub fn topic_ref(&self, store: &ProfileStore) -> CoreResult<TopicRef> {
        let (profile, topic) = self.resolve_topic(store)?;
        Ok(TopicRef { profile_id: profile.id.clone(), topic_id: topic.id.clone() })
    }

    pub fn idea_ref(&self, store: &ProfileStore) -> CoreResult<IdeaRef> {
        let (profile, topic, idea) = self.resolve_idea(store)?;
        Ok(IdeaRef {
            profile_id: profile.id.clone(),
            topic_id: topic.id.clone(),
            idea_id: idea.id.clone(),
        })
    }
}

/// The store's current profile, or NotFound when none is selected.
pub fn current_profile(store: &ProfileStore) -> CoreResult<&Profile> {
    store
        .current_profile()
        .ok_or_else(|| CoreError::not_found("profile", NONE_SELECTED))
}

pub fn current_profile_mut(store: &mut ProfileStore) -> CoreResult<&mut Profile> {
    store
        .current_profile_mut()
        .ok_or_else(|| CoreError::not_found("profile", NONE_SELECTED))
}
