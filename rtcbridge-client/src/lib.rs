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

//! Adapts a native RTC calling convention onto a browser-style client object
//! model. Callers drive everything through `callApi(apiId, jsonParams)` on
//! one of three surfaces — engine, channel, device manager — and receive
//! events back as `(name, jsonPayload)` pairs in the same convention.
//!
//! The crate owns the translation only: enum code mapping, JSON parameter
//! decoding, track lifecycle, publish/subscribe bookkeeping and event
//! re-emission. The actual RTC work lives behind the [`rtc::RtcProvider`] and
//! [`rtc::RtcClient`] traits, supplied by the embedder.
//!
//! # Outline of usage
//!
//! ```ignore
//! let engine = RtcEngine::new(provider);
//! engine.set_event_handler(handler);
//! engine.call_api(apiId, jsonParams, None).await?;
//!
//! let devices = engine.device_manager();
//! devices.call_api_audio(apiId, jsonParams).await?;
//!
//! let channels = ChannelRegistry::new(engine.clone());
//! channels.call_api(apiId, jsonParams, None).await?;
//! ```
//!
//! All handles are cheap clones over shared single-threaded state; nothing in
//! this crate is `Send`.

pub mod channel;
pub mod device;
pub mod engine;
pub mod error;
pub mod rtc;

pub use channel::ChannelRegistry;
pub use device::DeviceManager;
pub use engine::RtcEngine;
pub use error::BridgeError;

pub use rtcbridge_types::{Callback, EventHandler, EventPayload};
