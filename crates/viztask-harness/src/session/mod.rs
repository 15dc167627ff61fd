//! Session composition.
//!
//! A [`HarnessSession`] owns one window, at most one GPU context, one task,
//! and the render loop that drives them. Its [`StopToken`] tears the loop and
//! its event listeners down deterministically.

mod config;
mod runtime;
mod stop;

pub use config::HarnessConfig;
pub use runtime::HarnessSession;
pub use stop::StopToken;
