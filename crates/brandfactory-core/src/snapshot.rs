// ── Brand Factory Core: Snapshot Validation ────────────────────────────────
// A snapshot is the JSON form of `ProfileStore`, key for key. Parsing is
// strict: every key must be present (absent values are explicit `null`),
// map keys must match the ids they hold, and no id may appear twice.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::store::ProfileStore;

/// Counts describing a snapshot, for operator-facing summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub profiles: usize,
    pub profiled: usize,
    pub topics: usize,
    pub ideas: usize,
    pub scripted: usize,
}

/// Parse and validate a snapshot document into a fresh store.
pub fn parse(document: &str) -> CoreResult<ProfileStore> {
    let mut store: ProfileStore = serde_json::from_str(document)
        .map_err(|e| CoreError::format(format!("invalid snapshot: {}", e)))?;
    validate(&store)?;

    if let Some(current) = store.current_profile_id.as_deref() {
        if !store.profiles.contains_key(current) {
            log::warn!(
                "[store] Snapshot current_profile_id {} does not exist; importing with no current profile",
                current
            );
            store.current_profile_id = None;
        }
    }
    Ok(store)
}

fn claim<'a>(seen: &mut HashSet<&'a str>, id: &'a str) -> CoreResult<()> {
    if id.trim().is_empty() {
        return Err(CoreError::format("empty identifier"));
    }
    if !seen.insert(id) {
        return Err(CoreError::format(format!("duplicate id {}", id)));
    }
    Ok(())
}

fn validate(store: &ProfileStore) -> CoreResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (key, profile) in &store.profiles {
        if key != &profile.id {
            return Err(CoreError::format(format!(
                "profile key {} does not match its id {}",
                key, profile.id
            )));
        }
        claim(&mut seen, &profile.id)?;
        if profile.name.trim().is_empty() {
            return Err(CoreError::format(format!("profile {} has an empty name", profile.id)));
        }
        if profile.chat_history.is_empty() {
            return Err(CoreError::format(format!(
                "profile {} has an empty chat_history",
                profile.id
            )));
        }

        for (topic_key, topic) in &profile.topics {
            if topic_key != &topic.id {
                return Err(CoreError::format(format!(
                    "topic key {} does not match its id {}",
                    topic_key, topic.id
                )));
            }
            claim(&mut seen, &topic.id)?;
            if topic.name.trim().is_empty() {
                return Err(CoreError::format(format!("topic {} has an empty name", topic.id)));
            }

            for idea in &topic.ideas {
                claim(&mut seen, &idea.id)?;
                if idea.title.trim().is_empty() {
                    return Err(CoreError::format(format!("idea {} has an empty title", idea.id)));
                }
            }
        }
    }
    Ok(())
}

pub fn summarize(store: &ProfileStore) -> SnapshotSummary {
    let mut summary = SnapshotSummary { profiles: store.profiles.len(), ..Default::default() };
    for profile in store.profiles.values() {
        if profile.dna.is_some() {
            summary.profiled += 1;
        }
        summary.topics += profile.topics.len();
        for topic in profile.topics.values() {
            summary.ideas += topic.ideas.len();
            summary.scripted += topic.ideas.iter().filter(|i| i.is_scripted()).count();
        }
    }
    summary
}
