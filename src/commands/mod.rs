// Brand Factory Command Modules — operator action layer.
//
// Each sub-module is a thin wrapper over the engine for one stage of the
// workflow. Heavy logic lives in engine/; these modules only resolve the
// current selection, delegate, and turn results into display views and
// operator-facing `String` errors.

pub mod config;
pub mod interview;
pub mod profiles;
pub mod scripts;
pub mod snapshot;
pub mod strategy;

use log::error;

use crate::atoms::error::EngineError;

/// Log an engine error under `op` and convert it for the operator.
pub(crate) fn fail(op: &'static str) -> impl FnOnce(EngineError) -> String {
    move |e| {
        error!("[{}] {}", op, e);
        e.to_string()
    }
}
