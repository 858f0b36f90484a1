//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache maintenance: sweeps expired entries and logs statistics

mod cleanup;

pub use cleanup::{spawn_cleanup_task, MaintenanceHandle};
