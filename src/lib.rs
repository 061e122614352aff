//! Launchpad - asset launch orchestration and batch metadata ingestion
//!
//! The headless core behind multi-step asset-launch flows: a [`sequencer`]
//! that drives named asynchronous steps (deploy, mint, set claim
//! conditions, airdrop) with per-step progress and resume-from-failure
//! retry, and an [`ingest`] pipeline that turns a user file drop (CSV/JSON
//! manifest plus asset files) into validated, normalized records. The
//! blockchain SDK itself sits behind caller-supplied seams; nothing here
//! signs or submits transactions.

pub mod ingest;
pub mod launch;
pub mod logging;
pub mod sequencer;
