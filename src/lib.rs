//! # opsflow
//!
//! Schema-validated natural-language flows for IT operations.
//!
//! Every operation in this crate is a **flow**: a declared input shape, a
//! declared output shape, and a prompt template. One generic
//! [`Invoker`](invoker::Invoker) renders the template from a validated input
//! record, submits it to an external text-generation service, and validates
//! the response against the declared output shape before returning it. A call
//! either yields a record that satisfies its contract or fails with one of
//! two errors; a partially valid record is never returned.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use opsflow::prelude::*;
//!
//! # async fn run() -> Result<(), opsflow::InvocationError> {
//! let service = EngineConfig::from_env().into_service();
//! let invoker = Invoker::new(service);
//!
//! let flow = catalog::summarize_alerts();
//! let input = Record::new().with("alerts", "3 critical disk alerts at 02:00");
//! let output = invoker.invoke(&flow, &input).await?;
//!
//! println!("{}", output.get_str("summary").unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`core`]: records, shape descriptors, flow definitions, and the standard
//!   catalog of fifteen IT-operations flows
//! - [`invoker`]: the Structured Prompt Invoker
//! - [`llm`]: typestate client for the external generation service (Gemini,
//!   Ollama)
//! - [`chat`]: append-only conversation state for the troubleshooting chat
//! - [`config`]: environment-based provider configuration
//! - [`prelude`]: commonly used types (import with `use opsflow::prelude::*`)

pub mod chat;
pub mod config;
pub mod core;
pub mod error;
pub mod invoker;
pub mod llm;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use crate::core::catalog::{self, Catalog};
pub use crate::core::flow::FlowDefinition;
pub use crate::core::record::Record;
pub use crate::core::shape::{FieldSpec, FieldType, Shape, Violation, ViolationKind};

pub use crate::chat::{Conversation, Message, Role};
pub use crate::config::EngineConfig;
pub use crate::error::InvocationError;
pub use crate::invoker::Invoker;
pub use crate::llm::{Client, GenerationService, ProviderError};

/// Commonly used types for working with flows.
///
/// # Example
/// ```rust
/// use opsflow::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        catalog, Catalog, Client, Conversation, EngineConfig, FieldSpec, FieldType,
        FlowDefinition, GenerationService, InvocationError, Invoker, Message, ProviderError,
        Record, Role, Shape,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Value as JsonValue;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
