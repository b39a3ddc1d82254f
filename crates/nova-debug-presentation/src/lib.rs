//! Label, icon and detail rendering for Java debug elements.
//!
//! This crate provides:
//! - [`ModelPresentation`], the entry point that turns any [`DebugElement`]
//!   into display text, an icon descriptor and a colour hint.
//! - Value rendering with hex/char/unsigned annotations ([`format`]).
//! - Breakpoint and thread narration ([`breakpoints`], [`threads`]).
//! - Timeout-bounded detail (`toString()`) evaluation ([`detail`]).
//! - TOML configuration and `tracing` setup ([`config`]).
//!
//! [`DebugElement`]: nova_debug_model::DebugElement

pub mod attributes;
pub mod breakpoints;
pub mod config;
pub mod detail;
pub mod error;
pub mod eval_context;
pub mod format;
pub mod images;
pub mod naming;
mod presentation;
pub mod signature;
pub mod threads;

use nova_debug_model::ModelResult;

pub use attributes::{AttributeStore, AttributeValue, RenderPolicy, ShowDetails};
pub use config::{init_tracing, PresentationConfig};
pub use detail::{DetailCoordinator, DetailFormatter, DetailFormatterRegistry, DetailRequest};
pub use error::ConfigError;
pub use eval_context::{ActiveEvaluationContext, EvaluationContextProvider, NoEvaluationContext};
pub use images::{AdornmentFlags, BaseImage, ImageDescriptor, ImageSize};
pub use presentation::{
    ColorRole, ModelPresentation, GARBAGE_COLLECTED_OBJECT, NOT_RESPONDING,
    NO_MONITOR_INFORMATION, UNKNOWN_VALUE,
};

/// Turns a recoverable fault into `None`; only a disconnect is returned.
pub(crate) fn tolerate<T>(result: ModelResult<T>) -> ModelResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_unrecoverable() => Err(err),
        Err(err) => {
            tracing::debug!(
                target: "nova.debug.presentation",
                error = %err,
                "ignoring unavailable element state"
            );
            Ok(None)
        }
    }
}
