pub mod handlers;
pub mod synthesizer;
