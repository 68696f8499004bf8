//! Core types for caltile.
//!
//! This crate turns a flat list of schedule events into calendar view models:
//! - `grid` tiles a month into 7-day week rows
//! - `binning` attributes events to day cells and hour rows
//! - `layout` assigns horizontal lanes to events sharing an hour row
//! - `navigation` holds the calendar state and its transitions
//!
//! Everything here is pure: inputs are borrowed, outputs are freshly allocated.

pub mod binning;
pub mod color;
pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod feed;
pub mod grid;
pub mod label;
pub mod layout;
pub mod navigation;
pub mod view;

pub use date::CalendarDate;
pub use error::{CalTileError, CalTileResult};
pub use event::CalendarEvent;
