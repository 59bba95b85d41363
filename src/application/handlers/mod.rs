//! Handlers orchestrating domain logic through ports.

pub mod cycle;
