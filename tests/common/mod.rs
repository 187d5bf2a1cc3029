//! Shared test helpers: scripted provider, recording sink, scripted executor.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;

use tiller::error::TillerError;
use tiller::provider::{FragmentStream, ModelProvider, ModelRequest};
use tiller::tools::ToolExecutor;
use tiller::turn_loop::{CallbackSink, CancellationToken, ToolCallEvent};
use tiller::types::{FinishReason, FunctionCall, GroundingMetadata, StreamFragment};

/// A provider that replays queued fragment sequences, one per `generate`
/// call, and records every request it sees.
pub struct ScriptedProvider {
    turns: Mutex<VecDeque<Result<FragmentStream, TillerError>>>,
    requests: Mutex<Vec<ModelRequest>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            turns: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Queue one model turn built from canned fragments.
    pub fn queue_fragments(&self, fragments: Vec<Result<StreamFragment, TillerError>>) {
        self.turns
            .lock()
            .unwrap()
            .push_back(Ok(futures::stream::iter(fragments).boxed()));
    }

    /// Queue one model turn backed by an arbitrary stream.
    pub fn queue_stream(&self, stream: FragmentStream) {
        self.turns.lock().unwrap().push_back(Ok(stream));
    }

    /// Queue a provider-level failure for the next `generate` call.
    pub fn queue_failure(&self, error: TillerError) {
        self.turns.lock().unwrap().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &ModelRequest) -> Result<FragmentStream, TillerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TillerError::Provider("no scripted turn queued".into())))
    }
}

/// Everything a sink observed, in emission order.
#[derive(Debug, Clone)]
pub enum SinkEvent {
    Chunk(String),
    NewToolCalls(Vec<ToolCallEvent>),
    ToolResult { event_id: String, result: String },
    Complete { text: String, grounding: Option<GroundingMetadata> },
    Error(String),
    Cancel,
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn chunks(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Chunk(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Settled tool results as `(event_id, result)`, in settle order.
    pub fn tool_results(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::ToolResult { event_id, result } => Some((event_id, result)),
                _ => None,
            })
            .collect()
    }

    pub fn new_tool_call_batches(&self) -> Vec<Vec<ToolCallEvent>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::NewToolCalls(events) => Some(events),
                _ => None,
            })
            .collect()
    }

    pub fn completed(&self) -> Option<(String, Option<GroundingMetadata>)> {
        self.events().into_iter().find_map(|e| match e {
            SinkEvent::Complete { text, grounding } => Some((text, grounding)),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn cancel_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Cancel))
            .count()
    }

    /// Total terminal callbacks observed; must be exactly 1 per run.
    pub fn terminal_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    SinkEvent::Complete { .. } | SinkEvent::Error(_) | SinkEvent::Cancel
                )
            })
            .count()
    }

    /// The last event must be the terminal one.
    pub fn last_is_terminal(&self) -> bool {
        matches!(
            self.events().last(),
            Some(SinkEvent::Complete { .. } | SinkEvent::Error(_) | SinkEvent::Cancel)
        )
    }
}

impl CallbackSink for RecordingSink {
    fn on_text_chunk(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Chunk(text.to_string()));
    }

    fn on_new_tool_calls(&self, events: &[ToolCallEvent]) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::NewToolCalls(events.to_vec()));
    }

    fn on_tool_result(&self, event_id: &str, result: &str) {
        self.events.lock().unwrap().push(SinkEvent::ToolResult {
            event_id: event_id.to_string(),
            result: result.to_string(),
        });
    }

    fn on_complete(&self, final_text: &str, grounding: Option<&GroundingMetadata>) {
        self.events.lock().unwrap().push(SinkEvent::Complete {
            text: final_text.to_string(),
            grounding: grounding.cloned(),
        });
    }

    fn on_error(&self, error: &TillerError) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Error(error.to_string()));
    }

    fn on_cancel(&self) {
        self.events.lock().unwrap().push(SinkEvent::Cancel);
    }
}

/// Per-tool canned behavior for the scripted executor.
pub enum ToolBehavior {
    Ok(String),
    Err(String),
    /// Sleep, then succeed. Pair with a paused tokio clock.
    DelayedOk { delay_ms: u64, text: String },
    /// Sleep, cancel the run's token, then succeed anyway.
    CancelThenOk {
        token: CancellationToken,
        delay_ms: u64,
        text: String,
    },
}

/// An executor driven entirely by per-tool behaviors.
#[derive(Default)]
pub struct ScriptedExecutor {
    behaviors: HashMap<String, ToolBehavior>,
    calls: AtomicUsize,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, name: &str, text: &str) -> Self {
        self.behaviors
            .insert(name.to_string(), ToolBehavior::Ok(text.to_string()));
        self
    }

    pub fn err(mut self, name: &str, message: &str) -> Self {
        self.behaviors
            .insert(name.to_string(), ToolBehavior::Err(message.to_string()));
        self
    }

    pub fn delayed(mut self, name: &str, delay_ms: u64, text: &str) -> Self {
        self.behaviors.insert(
            name.to_string(),
            ToolBehavior::DelayedOk {
                delay_ms,
                text: text.to_string(),
            },
        );
        self
    }

    pub fn cancelling(
        mut self,
        name: &str,
        token: &CancellationToken,
        delay_ms: u64,
        text: &str,
    ) -> Self {
        self.behaviors.insert(
            name.to_string(),
            ToolBehavior::CancelThenOk {
                token: token.clone(),
                delay_ms,
                text: text.to_string(),
            },
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolExecutor for ScriptedExecutor {
    async fn execute(&self, name: &str, _args: &serde_json::Value) -> Result<String, TillerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviors.get(name) {
            None => Err(TillerError::tool(name, format!("Tool '{name}' not found"))),
            Some(ToolBehavior::Ok(text)) => Ok(text.clone()),
            Some(ToolBehavior::Err(message)) => Err(TillerError::tool(name, message.clone())),
            Some(ToolBehavior::DelayedOk { delay_ms, text }) => {
                tokio::time::sleep(std::time::Duration::from_millis(*delay_ms)).await;
                Ok(text.clone())
            }
            Some(ToolBehavior::CancelThenOk {
                token,
                delay_ms,
                text,
            }) => {
                tokio::time::sleep(std::time::Duration::from_millis(*delay_ms)).await;
                token.cancel();
                Ok(text.clone())
            }
        }
    }
}

// -- Fragment shorthands --

pub fn text_frag(text: &str) -> Result<StreamFragment, TillerError> {
    Ok(StreamFragment::text(text))
}

pub fn call_frag(name: &str, args: serde_json::Value) -> Result<StreamFragment, TillerError> {
    Ok(StreamFragment::call(FunctionCall::new(name, args)))
}

pub fn stop_frag() -> Result<StreamFragment, TillerError> {
    Ok(StreamFragment::finish(FinishReason::Stop))
}

pub fn length_frag() -> Result<StreamFragment, TillerError> {
    Ok(StreamFragment::finish(FinishReason::Length))
}
