pub mod basic_models;
pub mod extraction;
