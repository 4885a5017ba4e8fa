//! External collaborators
//!
//! Weather lookup, LLM advice text and recommendation history sit outside the
//! engine. Each is a `Send + Sync` trait so the server can hold trait objects
//! and tests can substitute stubs.
//!
//! - `weather.rs` - WeatherProvider + HTTP client
//! - `advice.rs` - AdviceGenerator + chat-completion client, placeholder fallback
//! - `history.rs` - HistoryStore + in-memory store, dashboard stats

pub mod weather;
pub mod advice;
pub mod history;

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by object-safe async trait methods
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub use weather::{HttpWeatherProvider, WeatherProvider};
pub use advice::{
    advice_or_placeholder, AdviceContext, AdviceGenerator, ChatCompletionAdvisor, Language,
    ADVICE_PLACEHOLDER,
};
pub use history::{HistoryRecord, HistoryStats, HistoryStore, InMemoryHistoryStore, NewHistoryRecord};
