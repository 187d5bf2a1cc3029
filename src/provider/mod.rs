//! Model provider trait.
//!
//! Transport, wire protocol, authentication, and retries are the
//! implementor's concern; this crate only consumes the fragment sequence.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::TillerError;
use crate::types::{GenerationSettings, StreamFragment, Turn};

/// A lazy, finite, non-restartable sequence of output fragments for one
/// model turn.
pub type FragmentStream = BoxStream<'static, Result<StreamFragment, TillerError>>;

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub turns: Vec<Turn>,
    pub settings: GenerationSettings,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name, for diagnostics.
    fn provider_name(&self) -> &str;

    /// Start one model turn over the given history and settings.
    ///
    /// A returned error is fatal to the run; retry policy, if any, lives
    /// inside the provider.
    async fn generate(&self, request: &ModelRequest) -> Result<FragmentStream, TillerError>;
}
