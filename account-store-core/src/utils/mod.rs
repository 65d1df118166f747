//! Utility functions module

pub mod labels;
