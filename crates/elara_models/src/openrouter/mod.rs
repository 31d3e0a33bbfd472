//! OpenRouter chat-completions backend.

mod client;
mod config;
mod dto;

pub use client::OpenRouterClient;
pub use config::OpenRouterConfig;
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse};
