//! Business logic use cases

pub mod startup;
