//! Infrastructure: local persistence and remote collaborator seams

pub mod database;
pub mod remote;
