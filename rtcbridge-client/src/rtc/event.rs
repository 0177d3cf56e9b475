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

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use rtcbridge_types::client::{
    ClientConnectionState, DisconnectReason, MediaKind, RelayError, RelayEvent, RelayState,
    UserInfoUpdate, UserLeftReason,
};

/// Notifications consumed from the underlying client.
#[derive(Clone, Debug)]
pub enum ClientEvent {
    ConnectionStateChanged {
        current: ClientConnectionState,
        reason: Option<DisconnectReason>,
    },
    UserJoined {
        uid: u64,
    },
    UserLeft {
        uid: u64,
        reason: UserLeftReason,
    },
    UserPublished {
        uid: u64,
        kind: MediaKind,
    },
    UserUnpublished {
        uid: u64,
        kind: MediaKind,
    },
    UserInfoUpdated {
        uid: u64,
        update: UserInfoUpdate,
    },
    StreamFallback {
        uid: u64,
        to_audio_only: bool,
    },
    /// Speaker levels in the client's 0..=100 scale.
    VolumeIndicator {
        volumes: Vec<(u64, u8)>,
    },
    /// Own-link quality in the client's 0..=5 scale.
    NetworkQuality {
        uplink: u8,
        downlink: u8,
    },
    LiveStreamingError {
        url: String,
        code: String,
    },
    LiveStreamingWarning {
        url: String,
        code: String,
    },
    StreamInjectStatus {
        status: i64,
        uid: u64,
        url: String,
    },
    MediaRelayStateChanged {
        state: RelayState,
        code: RelayError,
    },
    MediaRelayEvent {
        event: RelayEvent,
    },
    TokenPrivilegeWillExpire,
    Exception {
        code: i64,
        msg: String,
        uid: u64,
    },
}

/// The bridge's listener. The client drives each returned future to
/// completion before delivering the next event.
pub type ClientEventListener = Rc<dyn Fn(ClientEvent) -> LocalBoxFuture<'static, ()>>;
