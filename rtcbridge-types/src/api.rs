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

//! Stable numeric API ids for the four dispatch surfaces.
//!
//! Callers address every operation by integer id; the facade resolves the id
//! against a fixed table. An id that does not resolve is a silent no-op, so
//! these enums convert from raw integers through `from_id` rather than
//! erroring on unknown values.

macro_rules! api_ids {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $id:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $($variant = $id,)*
        }

        impl $name {
            /// Resolves a raw caller-supplied id. Unknown ids yield `None`,
            /// which the facade treats as a forward-compatible no-op.
            pub fn from_id(id: u32) -> Option<Self> {
                match id {
                    $($id => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The wire id of this operation.
            pub fn id(self) -> u32 {
                self as u32
            }
        }
    };
}

api_ids! {
    /// Operations on the engine surface.
    ApiTypeEngine {
        Initialize = 0,
        Release = 1,
        SetChannelProfile = 2,
        SetClientRole = 3,
        JoinChannel = 4,
        LeaveChannel = 5,
        RenewToken = 6,
        JoinChannelWithUserAccount = 7,
        EnableVideo = 8,
        DisableVideo = 9,
        SetVideoEncoderConfiguration = 10,
        SetupLocalVideo = 11,
        SetupRemoteVideo = 12,
        StartPreview = 13,
        StopPreview = 14,
        EnableAudio = 15,
        EnableLocalAudio = 16,
        DisableAudio = 17,
        SetAudioProfile = 18,
        MuteLocalAudioStream = 19,
        MuteAllRemoteAudioStreams = 20,
        SetDefaultMuteAllRemoteAudioStreams = 21,
        AdjustUserPlaybackSignalVolume = 22,
        MuteRemoteAudioStream = 23,
        MuteLocalVideoStream = 24,
        EnableLocalVideo = 25,
        MuteAllRemoteVideoStreams = 26,
        SetDefaultMuteAllRemoteVideoStreams = 27,
        MuteRemoteVideoStream = 28,
        SetRemoteVideoStreamType = 29,
        SetRemoteDefaultVideoStreamType = 30,
        EnableAudioVolumeIndication = 31,
        SetLogFilter = 32,
        UploadLogFile = 33,
        EnableDualStreamMode = 34,
        AdjustRecordingSignalVolume = 35,
        AdjustPlaybackSignalVolume = 36,
        SetRemoteSubscribeFallbackOption = 37,
        StartScreenCaptureByDisplayId = 38,
        StartScreenCaptureByScreenRect = 39,
        StartScreenCaptureByWindowId = 40,
        StopScreenCapture = 41,
        StartScreenCapture = 42,
        GetVersion = 43,
        SetEncryptionSecret = 44,
        SetEncryptionMode = 45,
        EnableEncryption = 46,
        AddPublishStreamUrl = 47,
        RemovePublishStreamUrl = 48,
        SetLiveTranscoding = 49,
        SetBeautyEffectOptions = 50,
        AddInjectStreamUrl = 51,
        StartChannelMediaRelay = 52,
        UpdateChannelMediaRelay = 53,
        StopChannelMediaRelay = 54,
        RemoveInjectStreamUrl = 55,
        SendCustomReportMessage = 56,
        GetConnectionState = 57,
        SetParameters = 58,
        SetAppType = 59,
        SetCloudProxy = 60,
    }
}

api_ids! {
    /// Operations on the per-channel surface. Every parameter object carries a
    /// `channelId` resolved against the channel registry.
    ApiTypeChannel {
        CreateChannel = 0,
        Release = 1,
        JoinChannel = 2,
        JoinChannelWithUserAccount = 3,
        LeaveChannel = 4,
        Publish = 5,
        Unpublish = 6,
        ChannelId = 7,
        RenewToken = 8,
        SetEncryptionSecret = 9,
        SetEncryptionMode = 10,
        EnableEncryption = 11,
        SetClientRole = 12,
        SetDefaultMuteAllRemoteAudioStreams = 13,
        SetDefaultMuteAllRemoteVideoStreams = 14,
        MuteLocalAudioStream = 15,
        MuteLocalVideoStream = 16,
        MuteAllRemoteAudioStreams = 17,
        AdjustUserPlaybackSignalVolume = 18,
        MuteRemoteAudioStream = 19,
        MuteAllRemoteVideoStreams = 20,
        MuteRemoteVideoStream = 21,
        SetRemoteVideoStreamType = 22,
        SetRemoteDefaultVideoStreamType = 23,
        AddPublishStreamUrl = 24,
        RemovePublishStreamUrl = 25,
        SetLiveTranscoding = 26,
        AddInjectStreamUrl = 27,
        RemoveInjectStreamUrl = 28,
        StartChannelMediaRelay = 29,
        UpdateChannelMediaRelay = 30,
        StopChannelMediaRelay = 31,
        GetConnectionState = 32,
    }
}

api_ids! {
    /// Operations on the audio device manager surface.
    ApiTypeAudioDeviceManager {
        EnumeratePlaybackDevices = 0,
        SetPlaybackDevice = 1,
        GetPlaybackDevice = 2,
        GetPlaybackDeviceInfo = 3,
        EnumerateRecordingDevices = 4,
        SetRecordingDevice = 5,
        GetRecordingDevice = 6,
        GetRecordingDeviceInfo = 7,
        SetRecordingDeviceVolume = 8,
        GetRecordingDeviceVolume = 9,
    }
}

api_ids! {
    /// Operations on the video device manager surface.
    ApiTypeVideoDeviceManager {
        EnumerateVideoDevices = 0,
        SetDevice = 1,
        GetDevice = 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_ids() {
        assert_eq!(
            ApiTypeEngine::from_id(ApiTypeEngine::JoinChannel.id()),
            Some(ApiTypeEngine::JoinChannel)
        );
        assert_eq!(
            ApiTypeChannel::from_id(ApiTypeChannel::MuteRemoteVideoStream.id()),
            Some(ApiTypeChannel::MuteRemoteVideoStream)
        );
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        assert_eq!(ApiTypeEngine::from_id(9999), None);
        assert_eq!(ApiTypeVideoDeviceManager::from_id(42), None);
    }
}
