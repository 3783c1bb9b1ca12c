//! Conversational response engine
//!
//! The orchestrator in [`engine`] prefers the remote model and falls back to
//! the deterministic rule engine built from [`classifier`], [`catalog`], and
//! [`resolver`].

pub mod catalog;
pub mod classifier;
mod engine;
pub mod random;
pub mod resolver;

pub use engine::ConversationEngine;
