//! Core data model: records, shape descriptors, flow definitions, and the
//! standard catalog.

pub mod catalog;
pub mod flow;
pub mod record;
pub mod shape;
