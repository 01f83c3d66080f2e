//! # vigil-monitor
//!
//! The link-monitoring pipeline for one message stream.
//!
//! Each iteration of [`Monitor`] fetches the trailing message window
//! ([`window`]), finds targets not yet processed ([`extract`]), and drives
//! each one through the [`StageProcessor`]: fetch the page, assess it, parse
//! the assessment ([`sections`]), classify it ([`classify`]), notify
//! ([`notify`]) and persist.
//!
//! External systems are reached only through the capability traits in
//! `vigil_core::capabilities`, so the whole pipeline runs against fakes in
//! tests.

pub mod classify;
pub mod extract;
pub mod monitor;
pub mod notify;
pub mod processor;
pub mod sections;
pub mod settings;
pub mod window;

mod error;
mod timeout;

pub use classify::{AlertDecision, classify};
pub use error::MonitorError;
pub use extract::{DiscoveredTarget, TargetExtractor};
pub use monitor::{IterationReport, Monitor};
pub use notify::NotifyReport;
pub use processor::{PipelineRun, ProcessorSettings, StageProcessor};
pub use sections::parse_sections;
pub use settings::MonitorSettings;
