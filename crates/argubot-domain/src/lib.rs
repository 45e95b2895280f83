//! Argubot Domain Layer
//!
//! This crate contains the core vocabulary shared by every other Argubot crate.
//! It has ZERO external dependencies and defines the fundamental concepts,
//! value objects, and trait interfaces that the other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Claim**: a single assertion in a debate corpus, immutable once loaded
//! - **Polarity**: whether a child claim supports or opposes its parent
//! - **Dialogue**: the append-only transcript an agent responds to
//! - **Chat messages**: role-tagged messages sent to a generation service
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Trait definitions for the generation capability and for agents
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod dialogue;
pub mod message;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, Polarity, SourceLocation};
pub use dialogue::{Dialogue, Turn};
pub use message::{ChatMessage, ChatRole};
pub use traits::{Agent, Generator};
