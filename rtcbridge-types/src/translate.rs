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

//! Pure translators between the underlying client's vocabulary and the native
//! wire codes.
//!
//! Every function here is total: inputs that carry no defined mapping resolve
//! to an explicit default rather than an error, because event emission must
//! never fail on an unrecognized client value.

use crate::client::*;
use crate::native::*;

pub fn connection_state_to_native(state: ClientConnectionState) -> ConnectionStateType {
    match state {
        ClientConnectionState::Disconnected | ClientConnectionState::Disconnecting => {
            ConnectionStateType::Disconnected
        }
        ClientConnectionState::Connecting => ConnectionStateType::Connecting,
        ClientConnectionState::Connected => ConnectionStateType::Connected,
        ClientConnectionState::Reconnecting => ConnectionStateType::Reconnecting,
    }
}

/// A state change without a reason is reported as a plain connecting
/// transition, matching the native default.
pub fn disconnect_reason_to_native(reason: Option<DisconnectReason>) -> ConnectionChangedReason {
    match reason {
        Some(DisconnectReason::LeaveChannel) => ConnectionChangedReason::LeaveChannel,
        Some(DisconnectReason::NetworkError) => ConnectionChangedReason::Interrupted,
        Some(DisconnectReason::ServerError) => ConnectionChangedReason::RejectedByServer,
        Some(DisconnectReason::UidBanned)
        | Some(DisconnectReason::IpBanned)
        | Some(DisconnectReason::ChannelBanned) => ConnectionChangedReason::BannedByServer,
        None => ConnectionChangedReason::Connecting,
    }
}

/// The client scores link quality 0 (unknown) through 6 (down) on the same
/// scale as the native enum.
pub fn network_quality_to_native(score: u8) -> QualityType {
    QualityType::from_code(score as i64)
}

pub fn user_left_reason_to_native(reason: UserLeftReason) -> UserOfflineReason {
    match reason {
        UserLeftReason::Quit => UserOfflineReason::Quit,
        UserLeftReason::ServerTimeout => UserOfflineReason::Dropped,
        UserLeftReason::BecomeAudience => UserOfflineReason::BecomeAudience,
    }
}

pub fn relay_state_to_native(state: RelayState) -> ChannelMediaRelayState {
    match state {
        RelayState::Idle => ChannelMediaRelayState::Idle,
        RelayState::Connecting => ChannelMediaRelayState::Connecting,
        RelayState::Running => ChannelMediaRelayState::Running,
        RelayState::Failure => ChannelMediaRelayState::Failure,
    }
}

pub fn relay_event_to_native(event: RelayEvent) -> ChannelMediaRelayEventCode {
    match event {
        RelayEvent::NetworkDisconnected => ChannelMediaRelayEventCode::Disconnect,
        RelayEvent::NetworkConnected => ChannelMediaRelayEventCode::Connected,
        RelayEvent::PacketJoinedSrcChannel => ChannelMediaRelayEventCode::JoinedSourceChannel,
        RelayEvent::PacketJoinedDestChannel => {
            ChannelMediaRelayEventCode::JoinedDestinationChannel
        }
        RelayEvent::PacketSentToDestChannel => {
            ChannelMediaRelayEventCode::SentToDestinationChannel
        }
        RelayEvent::PacketReceivedVideoFromSrc => {
            ChannelMediaRelayEventCode::ReceivedVideoPacketFromSource
        }
        RelayEvent::PacketReceivedAudioFromSrc => {
            ChannelMediaRelayEventCode::ReceivedAudioPacketFromSource
        }
        RelayEvent::PacketUpdateDestChannel => {
            ChannelMediaRelayEventCode::UpdateDestinationChannel
        }
        RelayEvent::PacketUpdateDestChannelRefused => {
            ChannelMediaRelayEventCode::UpdateDestinationChannelRefused
        }
        RelayEvent::PacketUpdateDestChannelNotChange => {
            ChannelMediaRelayEventCode::UpdateDestinationChannelNotChange
        }
        RelayEvent::PacketUpdateDestChannelIsNull => {
            ChannelMediaRelayEventCode::UpdateDestinationChannelIsNull
        }
        RelayEvent::VideoProfileUpdate => ChannelMediaRelayEventCode::VideoProfileUpdate,
    }
}

pub fn relay_error_to_native(error: RelayError) -> ChannelMediaRelayErrorCode {
    match error {
        RelayError::Ok => ChannelMediaRelayErrorCode::Ok,
        RelayError::ServerErrorResponse => ChannelMediaRelayErrorCode::ServerErrorResponse,
        RelayError::ServerNoResponse => ChannelMediaRelayErrorCode::ServerNoResponse,
        RelayError::NoResourceAvailable => ChannelMediaRelayErrorCode::NoResourceAvailable,
        RelayError::FailedJoinSrc => ChannelMediaRelayErrorCode::FailedJoinSourceChannel,
        RelayError::FailedJoinDest => ChannelMediaRelayErrorCode::FailedJoinDestinationChannel,
        RelayError::FailedPacketReceivedFromSrc => {
            ChannelMediaRelayErrorCode::FailedPacketReceivedFromSource
        }
        RelayError::FailedPacketSentToDest => {
            ChannelMediaRelayErrorCode::FailedPacketSentToDestination
        }
        RelayError::ServerConnectionLost => ChannelMediaRelayErrorCode::ServerConnectionLost,
    }
}

/// The client reports live-streaming problems as string codes.
pub fn rtmp_error_to_native(code: &str) -> RtmpStreamPublishError {
    match code {
        "LIVE_STREAMING_INVALID_ARGUMENT" => RtmpStreamPublishError::InvalidArgument,
        "LIVE_STREAMING_INTERNAL_SERVER_ERROR" => RtmpStreamPublishError::InternalServerError,
        "LIVE_STREAMING_PUBLISH_STREAM_NOT_AUTHORIZED" => RtmpStreamPublishError::NotAuthorized,
        "LIVE_STREAMING_TRANSCODING_NOT_SUPPORTED" => {
            RtmpStreamPublishError::FormatNotSupported
        }
        "LIVE_STREAMING_CDN_ERROR" => RtmpStreamPublishError::RtmpServerError,
        "LIVE_STREAMING_INVALID_RAW_STREAM" => RtmpStreamPublishError::ConnectionTimeout,
        "LIVE_STREAMING_WARN_STREAM_NUM_REACH_LIMIT" => RtmpStreamPublishError::ReachLimit,
        "LIVE_STREAMING_WARN_FREQUENT_REQUEST" => RtmpStreamPublishError::TooOften,
        _ => RtmpStreamPublishError::InternalServerError,
    }
}

/// Inject-stream status arrives as a bare number on the client side.
pub fn inject_status_to_native(status: i64) -> InjectStreamStatus {
    InjectStreamStatus::from_code(status)
}

/// Native log levels collapse onto the client's 0-4 scale (the client treats
/// 3 as error and 4 as silence).
pub fn log_level_to_client(level: LogLevel) -> u8 {
    match level {
        LogLevel::None => 4,
        LogLevel::Info => 1,
        LogLevel::Warn => 2,
        LogLevel::Error | LogLevel::Fatal => 3,
    }
}

pub fn log_filter_to_level(filter: LogFilter) -> LogLevel {
    match filter {
        LogFilter::Off => LogLevel::None,
        LogFilter::Debug | LogFilter::Info => LogLevel::Info,
        LogFilter::Warn => LogLevel::Warn,
        LogFilter::Error => LogLevel::Error,
        LogFilter::Critical => LogLevel::Fatal,
    }
}

pub fn area_code_to_client(area: AreaCode) -> RegionArea {
    match area {
        AreaCode::China => RegionArea::China,
        AreaCode::NorthAmerica => RegionArea::NorthAmerica,
        AreaCode::Europe => RegionArea::Europe,
        AreaCode::Asia => RegionArea::Asia,
        AreaCode::Japan => RegionArea::Japan,
        AreaCode::India => RegionArea::India,
        AreaCode::Global => RegionArea::Global,
    }
}

/// The game profile has no client-side equivalent and leaves the mode
/// untouched.
pub fn channel_profile_to_mode(profile: ChannelProfile) -> Option<ChannelMode> {
    match profile {
        ChannelProfile::Communication => Some(ChannelMode::Rtc),
        ChannelProfile::LiveBroadcasting => Some(ChannelMode::Live),
        ChannelProfile::Game => None,
    }
}

pub fn client_role_to_client(role: ClientRoleType) -> ClientRole {
    match role {
        ClientRoleType::Broadcaster => ClientRole::Host,
        ClientRoleType::Audience => ClientRole::Audience,
    }
}

pub fn audience_latency_to_client(level: AudienceLatencyLevel) -> AudienceLatency {
    match level {
        AudienceLatencyLevel::LowLatency => AudienceLatency::Low,
        AudienceLatencyLevel::UltraLowLatency => AudienceLatency::UltraLow,
    }
}

/// The client takes encryption modes as lowercase strings; `ModeEnd` disables
/// encryption.
pub fn encryption_mode_to_client(mode: EncryptionModeType) -> &'static str {
    match mode {
        EncryptionModeType::Aes128Xts => "aes-128-xts",
        EncryptionModeType::Aes128Ecb => "aes-128-ecb",
        EncryptionModeType::Aes256Xts => "aes-256-xts",
        EncryptionModeType::Sm4128Ecb => "sm4-128-ecb",
        EncryptionModeType::Aes128Gcm => "aes-128-gcm",
        EncryptionModeType::Aes256Gcm => "aes-256-gcm",
        EncryptionModeType::ModeEnd => "none",
    }
}

pub fn remote_stream_kind_to_client(kind: RemoteVideoStreamKind) -> RemoteStreamKind {
    match kind {
        RemoteVideoStreamKind::High => RemoteStreamKind::High,
        RemoteVideoStreamKind::Low => RemoteStreamKind::Low,
    }
}

pub fn fallback_option_to_client(option: StreamFallbackOptions) -> FallbackOption {
    match option {
        StreamFallbackOptions::Disabled => FallbackOption::Disable,
        StreamFallbackOptions::VideoStreamLow => FallbackOption::LowStream,
        StreamFallbackOptions::AudioOnly => FallbackOption::AudioOnly,
    }
}

/// Adaptive mode renders as cover; picking a fit dynamically per frame is not
/// worth the churn on the rendering surface.
pub fn render_mode_to_fit(mode: RenderMode) -> FitMode {
    match mode {
        RenderMode::Hidden => FitMode::Cover,
        RenderMode::Fit => FitMode::Contain,
        RenderMode::Adaptive => FitMode::Cover,
        RenderMode::Fill => FitMode::Fill,
    }
}

/// Resolves a mirror mode to the effective boolean. Only the local view (uid
/// 0) mirrors in auto mode.
pub fn resolve_mirror(uid: u64, mode: MirrorMode) -> bool {
    if uid == 0 {
        matches!(mode, MirrorMode::Auto | MirrorMode::Enabled)
    } else {
        mode == MirrorMode::Enabled
    }
}

pub fn audio_profile_to_preset(profile: AudioProfileType) -> AudioEncoderPreset {
    match profile {
        AudioProfileType::Default => "music_standard",
        AudioProfileType::SpeechStandard => "speech_standard",
        AudioProfileType::MusicStandard => "music_standard",
        AudioProfileType::MusicStandardStereo => "standard_stereo",
        AudioProfileType::MusicHighQuality => "high_quality",
        AudioProfileType::MusicHighQualityStereo => "high_quality_stereo",
        AudioProfileType::Iot => "speech_low_quality",
    }
}

/// The client's proxy server modes: 0 off, 3 UDP, 5 TCP.
pub fn cloud_proxy_to_client(proxy: CloudProxyType) -> u32 {
    match proxy {
        CloudProxyType::NoneProxy => 0,
        CloudProxyType::UdpProxy => 3,
        CloudProxyType::TcpProxy => 5,
    }
}

/// Exception codes the client raises that have a native error counterpart.
/// Anything else is logged and dropped rather than surfaced as an `Error`
/// event.
pub fn is_known_error_code(code: i64) -> bool {
    matches!(
        code,
        1001 | 1002 | 1003 | 1005 | 1501 | 2001 | 2003 | 3001 | 3002 | 3003
    )
}

/// Rescales the client's 0..100 volume level onto the native 0..255 scale.
pub fn volume_level_to_native(level: f64) -> i64 {
    ((level / 100.0) * 255.0).floor() as i64
}
