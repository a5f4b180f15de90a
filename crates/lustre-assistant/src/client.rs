//! The text-completion seam and the conversation kept around it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::AssistantError;

/// Messages kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// What a completion service is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    /// Context block placed before the conversation.
    pub system: String,
    /// Conversation so far, oldest first, ending with the user's question.
    pub messages: Vec<ChatMessage>,
}

/// A request/response text service.
pub trait CompletionService {
    fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError>;
}

impl<T: CompletionService + ?Sized> CompletionService for &T {
    fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        (**self).complete(request)
    }
}

impl<T: CompletionService + ?Sized> CompletionService for Box<T> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        (**self).complete(request)
    }
}

/// A conversation with a completion service over a fixed context.
///
/// History is bounded: once it exceeds the limit the oldest messages are
/// dropped, and it always starts with a user message.
#[derive(Debug)]
pub struct Assistant<C> {
    service: C,
    context: String,
    history: VecDeque<ChatMessage>,
    history_limit: usize,
}

impl<C: CompletionService> Assistant<C> {
    pub fn new(service: C, context: impl Into<String>) -> Self {
        Self {
            service,
            context: context.into(),
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` messages. A limit below 2 keeps one exchange.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(2);
        self.trim();
        self
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Replace the context, e.g. after metrics were re-aggregated.
    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    pub fn history(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Send a question and record the reply.
    ///
    /// On failure the question is dropped from the history so that a retry
    /// sends the same conversation.
    pub fn ask(&mut self, question: impl Into<String>) -> Result<String, AssistantError> {
        self.history.push_back(ChatMessage::user(question));
        let request = CompletionRequest {
            system: self.context.clone(),
            messages: self.history.iter().cloned().collect(),
        };

        let reply = match self.service.complete(&request) {
            Ok(reply) if reply.trim().is_empty() => Err(AssistantError::EmptyResponse),
            other => other,
        };

        match reply {
            Ok(reply) => {
                self.history.push_back(ChatMessage::assistant(reply.clone()));
                self.trim();
                Ok(reply)
            }
            Err(e) => {
                self.history.pop_back();
                tracing::warn!(error = %e, retry = e.should_retry(), "completion failed");
                Err(e)
            }
        }
    }

    fn trim(&mut self) {
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
        while self
            .history
            .front()
            .is_some_and(|m| m.role == Role::Assistant)
        {
            self.history.pop_front();
        }
    }
}
