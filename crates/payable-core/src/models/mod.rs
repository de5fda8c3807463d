//! Data models for annotations, invoice records and configuration.

pub mod annotation;
pub mod config;
pub mod invoice;
