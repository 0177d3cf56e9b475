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

//! Lightweight trace bus shared across the bridge.
//! Works on both native and `wasm32` targets (no Tokio required).
//!
//! Every dispatched API call and every re-emitted event can publish a
//! [`TraceEvent`] here; subscribers (debug overlays, log shippers) pull them
//! off the bus at their own pace. Publishing is fire-and-forget: with no
//! subscriber attached the events are simply dropped.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceKind {
    /// An API call entering a dispatch surface.
    ApiCall,
    /// An event leaving through a registered handler.
    EventOut,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Dispatch surface that produced this trace ("engine", "channel", "adm",
    /// "vdm").
    pub surface: &'static str,
    pub kind: TraceKind,
    /// API or event name.
    pub name: String,
    /// JSON parameter or payload string, when one was attached.
    pub detail: Option<String>,
    /// Unix time in milliseconds when the trace was captured.
    pub ts_ms: u64,
}

use flume::{Receiver, Sender};

static BUS: Lazy<(Sender<TraceEvent>, Receiver<TraceEvent>)> = Lazy::new(flume::unbounded);

/// Obtain a sender that can publish trace events.
pub fn global_sender() -> &'static Sender<TraceEvent> {
    &BUS.0
}

/// Subscribe to the trace stream. Each subscriber receives **all** future events.
pub fn subscribe() -> Receiver<TraceEvent> {
    BUS.1.clone()
}

/// Current wall-clock time in milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Shorthand for publishing a [`TraceEvent`] without checking the send result.
#[macro_export]
macro_rules! trace_event {
    ($surface:expr, $kind:expr, $name:expr) => {
        $crate::trace_event!($surface, $kind, $name, None)
    };
    ($surface:expr, $kind:expr, $name:expr, $detail:expr) => {
        let _ = $crate::global_sender().send($crate::TraceEvent {
            surface: $surface,
            kind: $kind,
            name: $name.to_string(),
            detail: $detail,
            ts_ms: $crate::now_ms(),
        });
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_sees_published_events() {
        let rx = subscribe();
        trace_event!("engine", TraceKind::ApiCall, "joinChannel", Some("{}".into()));
        // Other tests share the global bus, so scan for our own event.
        let ev = std::iter::from_fn(|| rx.try_recv().ok())
            .find(|e| e.name == "joinChannel")
            .expect("event on bus");
        assert_eq!(ev.surface, "engine");
        assert_eq!(ev.kind, TraceKind::ApiCall);
        assert_eq!(ev.name, "joinChannel");
        assert_eq!(ev.detail.as_deref(), Some("{}"));
        assert!(ev.ts_ms > 0);
    }

    #[test]
    fn publishing_without_subscribers_does_not_block() {
        trace_event!("adm", TraceKind::EventOut, "noop");
    }
}
