//! This crate implements the processing pipeline behind the choir's event
//! report: it fetches the published iCalendar feed, parses its `VEVENT`
//! blocks, tags every event with voice-part and group codes, and keeps the
//! recent entries for the tab-separated extract consumed downstream.
//!
//! The feed URL is private to the organization, so no default is baked in.

pub use chrono_tz;

pub mod classify;
pub mod datetime;
pub mod event;
pub mod feed_client;
pub mod filter;
pub mod property;
pub mod report;
pub mod unfold;
