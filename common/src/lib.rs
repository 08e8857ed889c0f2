//! Shared core of the volunteer signup board: the slot catalog, the signup
//! API client, per-browser ownership memory, the slot row state machine and
//! the roster aggregator. Browser-specific pieces (HTTP, `localStorage`,
//! rendering) plug in through the traits defined here.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod ownership;
pub mod requests;
pub mod roster;
pub mod slot_row;
