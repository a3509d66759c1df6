//! API layer - in-process access to the settings service

pub mod native;
