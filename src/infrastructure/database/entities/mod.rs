//! SeaORM entities for the pending-image tables

pub mod pending_delete;
pub mod pending_upload;
