// Service module exports

pub mod occurrence;
pub mod settings;
