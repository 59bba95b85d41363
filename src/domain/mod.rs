//! Domain layer - pure types and algorithms, no I/O.

pub mod cycle;
pub mod entitlement;
pub mod foundation;
pub mod selection;
