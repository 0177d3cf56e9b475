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

//! Native-convention value enums and their wire codes.
//!
//! Parameters arrive and events leave as plain integers; each enum here pins
//! the stable code of every value. Conversion from raw codes is total: a code
//! that does not match falls back to the enum's documented default, never an
//! error.

macro_rules! native_codes {
    (
        $(#[$meta:meta])*
        $name:ident(default = $default:ident) { $($variant:ident = $code:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $code,)*
        }

        impl $name {
            /// Total conversion from a raw wire code; unknown codes map to
            /// the default value.
            pub fn from_code(code: i64) -> Self {
                match code {
                    $($code => Self::$variant,)*
                    _ => Self::$default,
                }
            }

            pub fn code(self) -> i32 {
                self as i32
            }
        }
    };
}

native_codes! {
    /// Connection lifecycle as reported to native callers.
    ConnectionStateType(default = Disconnected) {
        Disconnected = 1,
        Connecting = 2,
        Connected = 3,
        Reconnecting = 4,
        Failed = 5,
    }
}

native_codes! {
    /// Why the connection state last changed.
    ConnectionChangedReason(default = Connecting) {
        Connecting = 0,
        JoinSuccess = 1,
        Interrupted = 2,
        BannedByServer = 3,
        JoinFailed = 4,
        LeaveChannel = 5,
        InvalidAppId = 6,
        InvalidChannelName = 7,
        InvalidToken = 8,
        TokenExpired = 9,
        RejectedByServer = 10,
    }
}

native_codes! {
    /// Link quality scale shared by uplink and downlink reports.
    QualityType(default = Unknown) {
        Unknown = 0,
        Excellent = 1,
        Good = 2,
        Poor = 3,
        Bad = 4,
        VeryBad = 5,
        Down = 6,
    }
}

native_codes! {
    RemoteAudioState(default = Stopped) {
        Stopped = 0,
        Starting = 1,
        Decoding = 2,
        Frozen = 3,
        Failed = 4,
    }
}

native_codes! {
    RemoteAudioStateReason(default = Internal) {
        Internal = 0,
        NetworkCongestion = 1,
        NetworkRecovery = 2,
        LocalMuted = 3,
        LocalUnmuted = 4,
        RemoteMuted = 5,
        RemoteUnmuted = 6,
        RemoteOffline = 7,
    }
}

native_codes! {
    RemoteVideoState(default = Stopped) {
        Stopped = 0,
        Starting = 1,
        Decoding = 2,
        Frozen = 3,
        Failed = 4,
    }
}

native_codes! {
    RemoteVideoStateReason(default = Internal) {
        Internal = 0,
        NetworkCongestion = 1,
        NetworkRecovery = 2,
        LocalMuted = 3,
        LocalUnmuted = 4,
        RemoteMuted = 5,
        RemoteUnmuted = 6,
        RemoteOffline = 7,
        AudioFallback = 8,
        AudioFallbackRecovery = 9,
    }
}

native_codes! {
    LocalAudioStreamState(default = Stopped) {
        Stopped = 0,
        Recording = 1,
        Encoding = 2,
        Failed = 3,
    }
}

native_codes! {
    LocalAudioStreamError(default = Ok) {
        Ok = 0,
        Failure = 1,
        DeviceNoPermission = 2,
        DeviceBusy = 3,
        RecordFailure = 4,
        EncodeFailure = 5,
    }
}

native_codes! {
    LocalVideoStreamState(default = Stopped) {
        Stopped = 0,
        Capturing = 1,
        Encoding = 2,
        Failed = 3,
    }
}

native_codes! {
    LocalVideoStreamError(default = Ok) {
        Ok = 0,
        Failure = 1,
        DeviceNoPermission = 2,
        DeviceBusy = 3,
        CaptureFailure = 4,
        EncodeFailure = 5,
    }
}

native_codes! {
    /// Peer-to-peer vs. broadcast session mode.
    ChannelProfile(default = Communication) {
        Communication = 0,
        LiveBroadcasting = 1,
        Game = 2,
    }
}

native_codes! {
    ClientRoleType(default = Broadcaster) {
        Broadcaster = 1,
        Audience = 2,
    }
}

native_codes! {
    AudienceLatencyLevel(default = LowLatency) {
        LowLatency = 1,
        UltraLowLatency = 2,
    }
}

native_codes! {
    LogLevel(default = Info) {
        None = 0x0000,
        Info = 0x0001,
        Warn = 0x0002,
        Error = 0x0004,
        Fatal = 0x0008,
    }
}

native_codes! {
    LogFilter(default = Info) {
        Off = 0,
        Debug = 0x080f,
        Info = 0x000f,
        Warn = 0x000e,
        Error = 0x000c,
        Critical = 0x0008,
    }
}

native_codes! {
    EncryptionModeType(default = ModeEnd) {
        Aes128Xts = 1,
        Aes128Ecb = 2,
        Aes256Xts = 3,
        Sm4128Ecb = 4,
        Aes128Gcm = 5,
        Aes256Gcm = 6,
        ModeEnd = 7,
    }
}

native_codes! {
    RemoteVideoStreamKind(default = High) {
        High = 0,
        Low = 1,
    }
}

native_codes! {
    StreamFallbackOptions(default = Disabled) {
        Disabled = 0,
        VideoStreamLow = 1,
        AudioOnly = 2,
    }
}

native_codes! {
    /// How a video frame is fitted to its rendering surface.
    RenderMode(default = Hidden) {
        Hidden = 1,
        Fit = 2,
        Adaptive = 3,
        Fill = 4,
    }
}

native_codes! {
    MirrorMode(default = Auto) {
        Auto = 0,
        Enabled = 1,
        Disabled = 2,
    }
}

native_codes! {
    AudioProfileType(default = Default) {
        Default = 0,
        SpeechStandard = 1,
        MusicStandard = 2,
        MusicStandardStereo = 3,
        MusicHighQuality = 4,
        MusicHighQualityStereo = 5,
        Iot = 6,
    }
}

native_codes! {
    CloudProxyType(default = NoneProxy) {
        NoneProxy = 0,
        UdpProxy = 1,
        TcpProxy = 2,
    }
}

native_codes! {
    RtmpStreamPublishState(default = Idle) {
        Idle = 0,
        Connecting = 1,
        Running = 2,
        Recovering = 3,
        Failure = 4,
    }
}

native_codes! {
    RtmpStreamPublishError(default = InternalServerError) {
        Ok = 0,
        InvalidArgument = 1,
        EncryptedStreamNotAllowed = 2,
        ConnectionTimeout = 3,
        InternalServerError = 4,
        RtmpServerError = 5,
        TooOften = 6,
        ReachLimit = 7,
        NotAuthorized = 8,
        StreamNotFound = 9,
        FormatNotSupported = 10,
    }
}

native_codes! {
    RtmpStreamingEvent(default = FailedLoadImage) {
        FailedLoadImage = 1,
    }
}

native_codes! {
    InjectStreamStatus(default = StartUnknown) {
        StartSuccess = 0,
        StartAlreadyExists = 1,
        StartUnauthorized = 2,
        StartTimedout = 3,
        StartFailed = 4,
        StopSuccess = 5,
        StopNotFound = 6,
        StopUnauthorized = 7,
        StopTimedout = 8,
        StopFailed = 9,
        Broken = 10,
        StartUnknown = 11,
    }
}

native_codes! {
    UserOfflineReason(default = Quit) {
        Quit = 0,
        Dropped = 1,
        BecomeAudience = 2,
    }
}

native_codes! {
    ChannelMediaRelayState(default = Idle) {
        Idle = 0,
        Connecting = 1,
        Running = 2,
        Failure = 3,
    }
}

native_codes! {
    ChannelMediaRelayEventCode(default = Disconnect) {
        Disconnect = 0,
        Connected = 1,
        JoinedSourceChannel = 2,
        JoinedDestinationChannel = 3,
        SentToDestinationChannel = 4,
        ReceivedVideoPacketFromSource = 5,
        ReceivedAudioPacketFromSource = 6,
        UpdateDestinationChannel = 7,
        UpdateDestinationChannelRefused = 8,
        UpdateDestinationChannelNotChange = 9,
        UpdateDestinationChannelIsNull = 10,
        VideoProfileUpdate = 11,
    }
}

native_codes! {
    ChannelMediaRelayErrorCode(default = Ok) {
        Ok = 0,
        ServerErrorResponse = 1,
        ServerNoResponse = 2,
        NoResourceAvailable = 3,
        FailedJoinSourceChannel = 4,
        FailedJoinDestinationChannel = 5,
        FailedPacketReceivedFromSource = 6,
        FailedPacketSentToDestination = 7,
        ServerConnectionLost = 8,
    }
}

native_codes! {
    /// Geofencing regions selectable through the initialization context.
    AreaCode(default = Global) {
        China = 1,
        NorthAmerica = 2,
        Europe = 4,
        Asia = 8,
        Japan = 16,
        India = 32,
        Global = -1,
    }
}
