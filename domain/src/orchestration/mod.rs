//! Orchestration domain: stages, resolutions and outcome value objects.

pub mod entities;
pub mod value_objects;
