//! Context building for the Lustre chat assistants.
//!
//! The admin assistant is told aggregated [`BusinessMetrics`]; the
//! storefront assistant a short catalog summary. Both talk to a text
//! completion service through the [`CompletionService`] trait; no transport
//! is provided here.
//!
//! ```rust
//! use chrono::Utc;
//! use lustre_assistant::{render_admin_context, BusinessMetrics};
//!
//! let metrics = BusinessMetrics::aggregate(&[], &[], Utc::now());
//! assert!(render_admin_context(&metrics).contains("Total orders: 0"));
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod metrics;

pub use client::{
    Assistant, ChatMessage, CompletionRequest, CompletionService, Role, DEFAULT_HISTORY_LIMIT,
};
pub use context::{render_admin_context, render_storefront_context};
pub use error::AssistantError;
pub use metrics::{BusinessMetrics, MetricsOptions};
