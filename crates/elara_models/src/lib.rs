//! Generative model backends for Elara.
//!
//! - [`OpenRouterClient`] talks to the OpenRouter chat-completions API.
//! - [`ScriptedModel`] replays a fixed sequence of outcomes; it stands in for
//!   a real provider in tests and offline runs.
//!
//! Both implement [`elara_interface::TextModel`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openrouter;
mod scripted;

pub use openrouter::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, OpenRouterClient,
    OpenRouterConfig,
};
pub use scripted::ScriptedModel;
