//! Vehicle history
//!
//! Every change to a vehicle or its expenses is appended to `audit.log` as
//! one JSON line: what happened, the vehicle's title and link at the time,
//! the before/after values and a short summary of the changed fields.
//!
//! ```rust,ignore
//! use dealer_desk::audit::{AuditEntry, AuditLog, AuditQuery};
//!
//! let log = AuditLog::new(paths.audit_log());
//! log.record(&AuditEntry::edited(&before, &after))?;
//! let history = log.entries(&AuditQuery::recent(10).for_vehicle(after.id.clone()))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditAction, AuditEntry};
pub use logger::{AuditLog, AuditQuery};
