//! Audit trail for Pennywise
//!
//! Every stored change to expenses and earnings is appended to `audit.log`
//! as a typed [`AuditEvent`], with the records as they were before and after.

mod entry;
mod logger;

pub use entry::{AuditEntry, AuditEvent};
pub use logger::AuditLog;
