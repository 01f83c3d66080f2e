//! Entity structs shared between the pipeline, the stores, and the adapters.

mod assessment;
mod audit;
mod message;
mod seen;

pub use assessment::Assessment;
pub use audit::AuditRecord;
pub use message::{Message, datetime_to_timestamp, timestamp_to_datetime};
pub use seen::SeenEntry;
