// commands/scripts.rs — Scriptwriter stage: write the selected idea's script
// and manage the session's script template.

use std::fs;
use std::path::Path;

use brandfactory_core::{Idea, Stage};

use crate::commands::fail;
use crate::engine::scripts::{self, ScriptTemplate};
use crate::engine::state::FactoryState;

/// Write (or rewrite) the script of the selected idea.
pub async fn write_script(state: &mut FactoryState) -> Result<Idea, String> {
    let target = state.nav.idea_ref(&state.store).map_err(|e| fail("script")(e.into()))?;
    let generator = state.generator.clone();
    let profile = state
        .store
        .profile_mut(&target.profile_id)
        .map_err(|e| fail("script")(e.into()))?;
    scripts::write_script(
        profile,
        &target.topic_id,
        &target.idea_id,
        &state.template,
        generator.as_ref(),
    )
    .await
    .map_err(fail("script"))?;
    state.nav.stage = Stage::Scriptwriter;

    let (_, _, idea) = state
        .nav
        .resolve_idea(&state.store)
        .map_err(|e| fail("script")(e.into()))?;
    Ok(idea.clone())
}

pub fn show_template(state: &FactoryState) -> String {
    state.template.as_str().to_string()
}

/// Replace the session template with the contents of a file.
pub fn load_template(state: &mut FactoryState, path: &Path) -> Result<(), String> {
    let text = fs::read_to_string(path).map_err(|e| fail("script")(e.into()))?;
    set_template(state, &text)
}

pub fn set_template(state: &mut FactoryState, text: &str) -> Result<(), String> {
    let template = ScriptTemplate::new(text).map_err(fail("script"))?;
    state.config.scripts.template = template.as_str().to_string();
    state.template = template;
    Ok(())
}

pub fn reset_template(state: &mut FactoryState) {
    state.template = ScriptTemplate::default();
    state.config.scripts.template = state.template.as_str().to_string();
}
