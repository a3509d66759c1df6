//! Infrastructure layer - durable store implementations

pub mod storage;
