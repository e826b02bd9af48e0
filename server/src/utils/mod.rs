//! Utility functions for the application

pub mod terminal;
pub mod xpath;
