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

//! Vocabulary of the underlying RTC client.
//!
//! The bridge consumes the client's connection states, disconnect reasons and
//! event codes, and hands back roles, stream kinds and fit policies in the
//! client's own terms. The actual client object lives behind a trait in the
//! `rtcbridge-client` crate; only its value vocabulary is shared here so the
//! translators can stay pure.

/// Audio or video, as the client names its media kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

/// Connection lifecycle in the client's vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Disconnecting,
}

/// Why the client dropped the connection, when it says so.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisconnectReason {
    LeaveChannel,
    NetworkError,
    ServerError,
    UidBanned,
    IpBanned,
    ChannelBanned,
}

/// Reason string attached to the client's user-left notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserLeftReason {
    Quit,
    ServerTimeout,
    BecomeAudience,
}

/// Remote mute/enable notifications carried by user-info-updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserInfoUpdate {
    MuteAudio,
    MuteVideo,
    EnableLocalVideo,
    UnmuteAudio,
    UnmuteVideo,
    DisableLocalVideo,
}

/// Peer-to-peer vs. broadcast, in the client's terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    Rtc,
    Live,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoCodec {
    H264,
    Vp8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientRole {
    Host,
    Audience,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudienceLatency {
    Low,
    UltraLow,
}

/// High/low remote stream selection in client vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteStreamKind {
    High,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackOption {
    Disable,
    LowStream,
    AudioOnly,
}

/// Geofencing region in client vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionArea {
    China,
    NorthAmerica,
    Europe,
    Asia,
    Japan,
    India,
    Global,
}

/// Frame fit policy understood by the client's renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitMode {
    Cover,
    Contain,
    Fill,
}

impl FitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FitMode::Cover => "cover",
            FitMode::Contain => "contain",
            FitMode::Fill => "fill",
        }
    }
}

/// Cross-channel media relay state in client vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayState {
    Idle,
    Connecting,
    Running,
    Failure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayEvent {
    NetworkDisconnected,
    NetworkConnected,
    PacketJoinedSrcChannel,
    PacketJoinedDestChannel,
    PacketSentToDestChannel,
    PacketReceivedVideoFromSrc,
    PacketReceivedAudioFromSrc,
    PacketUpdateDestChannel,
    PacketUpdateDestChannelRefused,
    PacketUpdateDestChannelNotChange,
    PacketUpdateDestChannelIsNull,
    VideoProfileUpdate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayError {
    Ok,
    ServerErrorResponse,
    ServerNoResponse,
    NoResourceAvailable,
    FailedJoinSrc,
    FailedJoinDest,
    FailedPacketReceivedFromSrc,
    FailedPacketSentToDest,
    ServerConnectionLost,
}

/// Audio encoder preset names the client accepts.
pub type AudioEncoderPreset = &'static str;
