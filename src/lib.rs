//! Tiller — turn-driver orchestration core for tool-using conversational
//! agents.
//!
//! Coordinates a multi-turn conversation between a caller and a generative
//! model that may invoke external tools mid-conversation, under a
//! human-in-the-loop plan-approval gate, with cooperative cancellation and
//! per-tool failure isolation. Rendering, persistence, concrete tools, and
//! the model's wire protocol all live behind traits ([`ModelProvider`],
//! [`ToolExecutor`], [`CallbackSink`]).
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tiller::prelude::*;
//!
//! let driver = TurnDriver::new(provider, Arc::new(registry));
//! let settings = GenerationSettings::builder()
//!     .tools(declarations)
//!     .build();
//! let result = driver
//!     .run(vec![Turn::caller("2+2?")], settings, CancellationToken::new(), sink)
//!     .await;
//! assert_eq!(result.status, RunStatus::Completed);
//! ```
//!
//! [`ModelProvider`]: provider::ModelProvider
//! [`ToolExecutor`]: tools::ToolExecutor
//! [`CallbackSink`]: turn_loop::CallbackSink

pub mod error;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod turn_loop;
pub mod types;
pub mod util;
