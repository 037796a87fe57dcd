#![forbid(unsafe_code)]

//! Core: input events, pixel geometry, and typed signals.
//!
//! # Role in slidekit
//! `slidekit-core` is the input and notification layer. It owns the
//! normalized event types a slider model consumes and the observer registry
//! it reports changes through.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, pointer, wheel, focus).
//! - **Geometry**: pixel `Rect`/`Point` used for hit testing.
//! - **Signal**: typed, per-instance callback lists with RAII subscriptions.
//!
//! # How it fits in the system
//! `slidekit-widgets` consumes `slidekit-core::event` values, asks the host
//! renderer for geometry in terms of `slidekit-core::geometry`, and emits
//! `slidekit-core::signal` notifications back to the host.

pub mod event;
pub mod geometry;
pub mod signal;
