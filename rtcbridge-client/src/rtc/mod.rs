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

//! Boundary traits for the underlying RTC client.
//!
//! Everything behind these traits is an external collaborator: connection,
//! publish/subscribe, codecs, transport and statistics all live in the client
//! implementation. The bridge only drives the object model and consumes its
//! events; failures cross the boundary as opaque `anyhow::Error` values.

mod event;
mod track;

pub use event::{ClientEvent, ClientEventListener};
pub use track::{
    LocalAudioTrack, LocalTrackHandle, LocalVideoTrack, RemoteAudioTrack, RemoteVideoTrack,
};

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;

use rtcbridge_types::client::{
    AudienceLatency, ChannelMode, ClientConnectionState, ClientRole, FallbackOption, FitMode,
    MediaKind, RegionArea, RemoteStreamKind, VideoCodec,
};
use rtcbridge_types::events::JoinedId;
use rtcbridge_types::params::{
    ChannelMediaRelayConfiguration, InjectStreamConfig, LiveTranscoding, ScreenCaptureParameters,
    VideoEncoderConfiguration,
};

/// Opaque rendering-target handle, forwarded to `play` unexamined.
pub type ViewHandle = Rc<dyn Any>;

/// Mode and codec the client is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub mode: ChannelMode,
    pub codec: VideoCodec,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: ChannelMode::Rtc,
            codec: VideoCodec::H264,
        }
    }
}

/// Identity a caller joins with: a numeric uid (0 lets the client assign one)
/// or a string user account.
#[derive(Clone, Debug, PartialEq)]
pub enum JoinIdentity {
    Uid(u64),
    Account(String),
}

/// One enumerated capture or playback device.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_id: String,
    pub device_name: String,
}

/// The slice of call statistics the client can actually report.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientStats {
    pub duration: u64,
    pub user_count: u32,
    pub rtt_ms: u32,
}

/// Uplink/downlink quality for one connection, in the client's 0..=5 scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkQualityInfo {
    pub uplink: u8,
    pub downlink: u8,
}

/// What the client currently knows about one remote user.
#[derive(Clone, Copy, Debug)]
pub struct RemoteUserSnapshot {
    pub uid: u64,
    pub has_audio: bool,
    pub has_video: bool,
}

/// Screen capture may install an audio+video pair when the platform captures
/// system audio alongside the display.
pub struct ScreenTracks {
    pub video: Rc<dyn LocalVideoTrack>,
    pub audio: Option<Rc<dyn LocalAudioTrack>>,
}

/// Factory and process-wide surface of the underlying client library.
#[async_trait(?Send)]
pub trait RtcProvider {
    fn create_client(&self, config: &ClientConfig) -> Rc<dyn RtcClient>;

    async fn create_microphone_track(
        &self,
        device_id: Option<&str>,
        encoder_preset: Option<&'static str>,
    ) -> anyhow::Result<Rc<dyn LocalAudioTrack>>;

    async fn create_camera_track(
        &self,
        device_id: Option<&str>,
        encoder: Option<&VideoEncoderConfiguration>,
    ) -> anyhow::Result<Rc<dyn LocalVideoTrack>>;

    async fn create_screen_tracks(
        &self,
        config: &ScreenCaptureParameters,
    ) -> anyhow::Result<ScreenTracks>;

    async fn playback_devices(&self) -> anyhow::Result<Vec<DeviceInfo>>;
    async fn recording_devices(&self) -> anyhow::Result<Vec<DeviceInfo>>;
    async fn video_devices(&self) -> anyhow::Result<Vec<DeviceInfo>>;

    /// Process-wide settings; they affect every client created afterwards.
    fn set_log_level(&self, level: u8);
    fn enable_log_upload(&self, enabled: bool);
    fn set_area_code(&self, areas: &[RegionArea]);
    fn set_parameter(&self, parameters: &str);

    fn version(&self) -> String;
}

/// One connection handle of the underlying client.
#[async_trait(?Send)]
pub trait RtcClient {
    async fn join(
        &self,
        token: Option<&str>,
        channel: &str,
        identity: JoinIdentity,
    ) -> anyhow::Result<JoinedId>;
    async fn leave(&self) -> anyhow::Result<()>;

    async fn publish(&self, track: LocalTrackHandle) -> anyhow::Result<()>;
    async fn unpublish(&self, track: LocalTrackHandle) -> anyhow::Result<()>;

    async fn subscribe_audio(&self, uid: u64) -> anyhow::Result<Rc<dyn RemoteAudioTrack>>;
    async fn subscribe_video(&self, uid: u64) -> anyhow::Result<Rc<dyn RemoteVideoTrack>>;
    async fn unsubscribe(&self, uid: u64, kind: MediaKind) -> anyhow::Result<()>;

    async fn set_client_role(
        &self,
        role: ClientRole,
        latency: Option<AudienceLatency>,
    ) -> anyhow::Result<()>;
    async fn renew_token(&self, token: &str) -> anyhow::Result<()>;

    async fn set_remote_video_stream_type(
        &self,
        uid: u64,
        kind: RemoteStreamKind,
    ) -> anyhow::Result<()>;
    async fn set_default_remote_video_stream_type(
        &self,
        kind: RemoteStreamKind,
    ) -> anyhow::Result<()>;
    async fn set_stream_fallback_option(
        &self,
        uid: u64,
        option: FallbackOption,
    ) -> anyhow::Result<()>;

    async fn set_encryption_config(
        &self,
        mode: &str,
        secret: Option<&str>,
    ) -> anyhow::Result<()>;

    async fn enable_dual_stream(&self, enabled: bool) -> anyhow::Result<()>;
    fn enable_audio_volume_indicator(&self);

    async fn start_live_streaming(&self, url: &str, transcoding: bool) -> anyhow::Result<()>;
    async fn stop_live_streaming(&self, url: &str) -> anyhow::Result<()>;
    async fn set_live_transcoding(&self, config: &LiveTranscoding) -> anyhow::Result<()>;

    async fn add_injected_stream(
        &self,
        url: &str,
        config: &InjectStreamConfig,
    ) -> anyhow::Result<()>;
    async fn remove_injected_stream(&self, url: &str) -> anyhow::Result<()>;

    async fn start_channel_media_relay(
        &self,
        config: &ChannelMediaRelayConfiguration,
    ) -> anyhow::Result<()>;
    async fn update_channel_media_relay(
        &self,
        config: &ChannelMediaRelayConfiguration,
    ) -> anyhow::Result<()>;
    async fn stop_channel_media_relay(&self) -> anyhow::Result<()>;

    async fn send_custom_report(
        &self,
        id: &str,
        category: &str,
        event: &str,
        label: &str,
        value: i64,
    ) -> anyhow::Result<()>;

    fn start_proxy_server(&self, mode: u32);
    fn stop_proxy_server(&self);

    fn connection_state(&self) -> ClientConnectionState;
    fn channel_name(&self) -> Option<String>;
    fn remote_users(&self) -> Vec<RemoteUserSnapshot>;
    fn stats(&self) -> ClientStats;
    fn remote_network_quality(&self) -> HashMap<u64, NetworkQualityInfo>;

    /// Installs the single event listener. The implementation must drive each
    /// returned future to completion before delivering the next event; events
    /// fired before registration are lost, not replayed.
    fn set_event_listener(&self, listener: ClientEventListener);
}

/// How a remote video frame is fitted and mirrored on its surface.
#[derive(Clone)]
pub struct SurfaceBinding {
    pub view: ViewHandle,
    pub fit: FitMode,
    pub mirror: bool,
}
