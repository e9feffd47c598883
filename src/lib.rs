//! Points-table scoring for track-and-field marks and a daily recovery index.
//!
//! Both engines are pure functions over read-only tables: build an
//! [`scoring::EventTable`] or [`scoring::MetricTable`] once (from the built-in
//! defaults or a [`config::Config`]) and share it by reference.

pub mod config;
pub mod logging;
pub mod output;
pub mod request;
pub mod scoring;
pub mod training;
