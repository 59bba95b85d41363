//! Dayflow - Practice Cycle & Playlist Generation Engine
//!
//! This crate provisions multi-day practice cycles for enrolled users and
//! generates per-day video playlists that respect a duration budget,
//! role-based sequencing rules, recency exclusion, and subscription-based
//! day locking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
