/*
 * Copyright 2026 the rtcbridge authors
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Shared vocabulary for the rtcbridge adaptation layer.
//!
//! This crate carries no behavior beyond pure value mapping: the stable numeric
//! API ids for every dispatch surface, the native-style value enums and their
//! wire codes, the JSON parameter and event payload shapes, and the total
//! translator functions that convert between the underlying RTC client's
//! vocabulary and the native codes.

pub mod api;
pub mod callback;
pub mod client;
pub mod events;
pub mod native;
pub mod params;
pub mod translate;

pub use callback::Callback;

/// An `(event name, JSON payload)` pair as delivered to a registered event
/// handler.
pub type EventPayload = (String, String);

/// Event handler callback registered through `set_event_handler`.
///
/// Exactly one handler is registered per session; registering a new one
/// replaces the old one.
pub type EventHandler = Callback<EventPayload>;
