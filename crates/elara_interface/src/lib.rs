//! Trait definitions for generative text backends.
//!
//! The normalization subsystem never needs to know how text was produced:
//! an HTTP provider, a local stub, or a scripted test double all sit behind
//! [`TextModel`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use elara_core::GenerateRequest;
use elara_error::ElaraResult;
use std::sync::Arc;

/// A backend that turns a prompt into raw model text.
///
/// Implementations return the unmodified completion text; they must not
/// attempt any repair or parsing of their own.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Ask the model for text.
    async fn generate(&self, req: &GenerateRequest) -> ElaraResult<String>;

    /// Provider name (e.g., "openrouter").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "mistralai/mistral-nemo:free").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: TextModel + ?Sized> TextModel for Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> ElaraResult<String> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
