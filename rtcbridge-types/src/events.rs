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

//! Outbound event payload shapes.
//!
//! Every event crosses the facade as `(name, json_string)`; the structs here
//! pin the field names of each payload. Channel-scoped events get a
//! `channelId` field merged in by the channel registry before re-emission, so
//! the shapes themselves stay channel-agnostic.

use serde::{Deserialize, Serialize};

/// A joined identity is either the numeric uid the caller asked for or the
/// string account the client assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinedId {
    Uid(u64),
    Account(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct JoinChannelSuccessPayload {
    pub channel: String,
    pub uid: JoinedId,
    pub elapsed: i64,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ConnectionStateChangedPayload {
    pub state: i32,
    pub reason: i32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct UserJoinedPayload {
    pub uid: u64,
    pub elapsed: i64,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct UserOfflinePayload {
    pub uid: u64,
    pub reason: i32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct RemoteAudioStateChangedPayload {
    pub uid: u64,
    pub state: i32,
    pub reason: i32,
    pub elapsed: i64,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct RemoteVideoStateChangedPayload {
    pub uid: u64,
    pub state: i32,
    pub reason: i32,
    pub elapsed: i64,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAudioStateChangedPayload {
    pub state: i32,
    pub error: i32,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalVideoStateChangedPayload {
    pub local_video_state: i32,
    pub error: i32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioVolumeInfo {
    pub uid: u64,
    pub volume: u32,
    pub vad: u32,
    pub channel_id: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioVolumeIndicationPayload {
    pub speakers: Vec<AudioVolumeInfo>,
    pub speaker_number: usize,
    pub total_volume: u32,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkQualityPayload {
    pub uid: u64,
    pub tx_quality: i32,
    pub rx_quality: i32,
}

/// Call statistics attached to the leave notification. The client exposes no
/// equivalent aggregate, so every field reports zero.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtcStats {
    pub duration: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub tx_audio_bytes: u64,
    pub tx_video_bytes: u64,
    pub rx_audio_bytes: u64,
    pub rx_video_bytes: u64,
    pub tx_k_bit_rate: u32,
    pub rx_k_bit_rate: u32,
    pub tx_audio_k_bit_rate: u32,
    pub rx_audio_k_bit_rate: u32,
    pub tx_video_k_bit_rate: u32,
    pub rx_video_k_bit_rate: u32,
    pub lastmile_delay: u32,
    pub tx_packet_loss_rate: u32,
    pub rx_packet_loss_rate: u32,
    pub user_count: u32,
    pub cpu_app_usage: f64,
    pub cpu_total_usage: f64,
    pub gateway_rtt: u32,
    pub memory_app_usage_ratio: f64,
    pub memory_total_usage_ratio: f64,
    pub memory_app_usage_in_kbytes: u32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct LeaveChannelPayload {
    pub stats: RtcStats,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtmpStreamingStateChangedPayload {
    pub url: String,
    pub state: i32,
    pub err_code: i32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtmpStreamingEventPayload {
    pub url: String,
    pub event_code: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct StreamInjectedStatusPayload {
    pub url: String,
    pub uid: u64,
    pub status: i32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ChannelMediaRelayStateChangedPayload {
    pub state: i32,
    pub code: i32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ChannelMediaRelayEventPayload {
    pub code: i32,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSubscribeFallbackPayload {
    pub uid: u64,
    pub is_fallback_or_recover: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorPayload {
    pub err: i32,
    pub msg: String,
}

/// Event names as they appear on the wire. Bare names, no handler prefix.
pub mod names {
    pub const JOIN_CHANNEL_SUCCESS: &str = "JoinChannelSuccess";
    pub const LEAVE_CHANNEL: &str = "LeaveChannel";
    pub const CONNECTION_STATE_CHANGED: &str = "ConnectionStateChanged";
    pub const USER_JOINED: &str = "UserJoined";
    pub const USER_OFFLINE: &str = "UserOffline";
    pub const REMOTE_AUDIO_STATE_CHANGED: &str = "RemoteAudioStateChanged";
    pub const REMOTE_VIDEO_STATE_CHANGED: &str = "RemoteVideoStateChanged";
    pub const LOCAL_AUDIO_STATE_CHANGED: &str = "LocalAudioStateChanged";
    pub const LOCAL_VIDEO_STATE_CHANGED: &str = "LocalVideoStateChanged";
    pub const AUDIO_VOLUME_INDICATION: &str = "AudioVolumeIndication";
    pub const NETWORK_QUALITY: &str = "NetworkQuality";
    pub const TOKEN_PRIVILEGE_WILL_EXPIRE: &str = "TokenPrivilegeWillExpire";
    pub const RTMP_STREAMING_STATE_CHANGED: &str = "RtmpStreamingStateChanged";
    pub const RTMP_STREAMING_EVENT: &str = "RtmpStreamingEvent";
    pub const STREAM_INJECTED_STATUS: &str = "StreamInjectedStatus";
    pub const CHANNEL_MEDIA_RELAY_STATE_CHANGED: &str = "ChannelMediaRelayStateChanged";
    pub const CHANNEL_MEDIA_RELAY_EVENT: &str = "ChannelMediaRelayEvent";
    pub const REMOTE_SUBSCRIBE_FALLBACK_TO_AUDIO_ONLY: &str =
        "RemoteSubscribeFallbackToAudioOnly";
    pub const ERROR: &str = "Error";
}
