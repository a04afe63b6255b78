// Brand Factory Engine — interview, extraction, ideation and scripting
// on top of the brandfactory-core data model. Every network-backed
// operation goes through the TextGenerator / AudioTranscriber traits and
// mutates state only after the service call succeeds.

pub mod config;
pub mod extractor;
pub mod ideas;
pub mod interview;
pub mod prompts;
pub mod providers;
pub mod response;
pub mod scripts;
pub mod state;
