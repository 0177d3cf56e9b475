#![allow(dead_code)]

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

//! In-memory client doubles. Every provider/client/track operation is pushed
//! onto one shared op log so tests can assert exact call sequences.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::anyhow;
use async_trait::async_trait;

use rtcbridge_client::rtc::{
    ClientConfig, ClientEvent, ClientEventListener, ClientStats, DeviceInfo, JoinIdentity,
    LocalAudioTrack, LocalTrackHandle, LocalVideoTrack, NetworkQualityInfo, RemoteAudioTrack,
    RemoteUserSnapshot, RemoteVideoTrack, RtcClient, RtcProvider, ScreenTracks, ViewHandle,
};
use rtcbridge_client::{Callback, RtcEngine};
use rtcbridge_types::api::ApiTypeEngine;
use rtcbridge_types::client::{
    AudienceLatency, ClientConnectionState, ClientRole, FallbackOption, FitMode, MediaKind,
    RegionArea, RemoteStreamKind,
};
use rtcbridge_types::events::JoinedId;
use rtcbridge_types::params::{
    BeautyOptions, ChannelMediaRelayConfiguration, InjectStreamConfig, LiveTranscoding,
    ScreenCaptureParameters, VideoEncoderConfiguration,
};

type OpLog = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
pub struct FakeAudioTrack {
    pub enabled: Cell<bool>,
    pub volume: Cell<u32>,
    pub closed: Cell<bool>,
    pub ended: RefCell<Option<Rc<dyn Fn()>>>,
}

impl FakeAudioTrack {
    pub fn fire_ended(&self) {
        if let Some(cb) = self.ended.borrow().clone() {
            cb();
        }
    }
}

#[async_trait(?Send)]
impl LocalAudioTrack for FakeAudioTrack {
    async fn set_enabled(&self, enabled: bool) -> anyhow::Result<()> {
        self.enabled.set(enabled);
        Ok(())
    }

    fn set_volume(&self, volume: u32) {
        self.volume.set(volume);
    }

    fn close(&self) {
        self.closed.set(true);
    }

    fn on_track_ended(&self, callback: Rc<dyn Fn()>) {
        *self.ended.borrow_mut() = Some(callback);
    }
}

#[derive(Default)]
pub struct FakeVideoTrack {
    pub enabled: Cell<bool>,
    pub playing: Cell<bool>,
    pub closed: Cell<bool>,
    pub encoder: RefCell<Option<VideoEncoderConfiguration>>,
    pub beauty: Cell<bool>,
    pub ended: RefCell<Option<Rc<dyn Fn()>>>,
}

impl FakeVideoTrack {
    pub fn fire_ended(&self) {
        if let Some(cb) = self.ended.borrow().clone() {
            cb();
        }
    }
}

#[async_trait(?Send)]
impl LocalVideoTrack for FakeVideoTrack {
    async fn set_enabled(&self, enabled: bool) -> anyhow::Result<()> {
        self.enabled.set(enabled);
        Ok(())
    }

    fn play(&self, _view: ViewHandle, _fit: FitMode, _mirror: bool) {
        self.playing.set(true);
    }

    fn stop(&self) {
        self.playing.set(false);
    }

    async fn set_encoder_config(&self, config: &VideoEncoderConfiguration) -> anyhow::Result<()> {
        *self.encoder.borrow_mut() = Some(config.clone());
        Ok(())
    }

    async fn set_beauty_effect(
        &self,
        enabled: bool,
        _options: &BeautyOptions,
    ) -> anyhow::Result<()> {
        self.beauty.set(enabled);
        Ok(())
    }

    fn close(&self) {
        self.closed.set(true);
    }

    fn on_track_ended(&self, callback: Rc<dyn Fn()>) {
        *self.ended.borrow_mut() = Some(callback);
    }
}

#[derive(Default)]
pub struct FakeRemoteAudioTrack {
    pub playing: Cell<bool>,
    pub volume: Cell<u32>,
    pub playback_device: RefCell<Option<String>>,
    pub first_frame: RefCell<Option<Rc<dyn Fn()>>>,
}

impl FakeRemoteAudioTrack {
    pub fn fire_first_frame(&self) {
        if let Some(cb) = self.first_frame.borrow().clone() {
            cb();
        }
    }
}

#[async_trait(?Send)]
impl RemoteAudioTrack for FakeRemoteAudioTrack {
    fn play(&self) {
        self.playing.set(true);
    }

    fn stop(&self) {
        self.playing.set(false);
    }

    fn set_volume(&self, volume: u32) {
        self.volume.set(volume);
    }

    async fn set_playback_device(&self, device_id: &str) -> anyhow::Result<()> {
        *self.playback_device.borrow_mut() = Some(device_id.to_string());
        Ok(())
    }

    fn on_first_frame_decoded(&self, callback: Rc<dyn Fn()>) {
        *self.first_frame.borrow_mut() = Some(callback);
    }
}

#[derive(Default)]
pub struct FakeRemoteVideoTrack {
    pub playing: Cell<bool>,
    pub first_frame: RefCell<Option<Rc<dyn Fn()>>>,
}

impl FakeRemoteVideoTrack {
    pub fn fire_first_frame(&self) {
        if let Some(cb) = self.first_frame.borrow().clone() {
            cb();
        }
    }
}

impl RemoteVideoTrack for FakeRemoteVideoTrack {
    fn play(&self, _view: ViewHandle, _fit: FitMode, _mirror: bool) {
        self.playing.set(true);
    }

    fn stop(&self) {
        self.playing.set(false);
    }

    fn on_first_frame_decoded(&self, callback: Rc<dyn Fn()>) {
        *self.first_frame.borrow_mut() = Some(callback);
    }
}

pub struct FakeClient {
    ops: OpLog,
    pub listener: RefCell<Option<ClientEventListener>>,
    pub users: RefCell<Vec<RemoteUserSnapshot>>,
    pub remote_audio: RefCell<HashMap<u64, Rc<FakeRemoteAudioTrack>>>,
    pub remote_video: RefCell<HashMap<u64, Rc<FakeRemoteVideoTrack>>>,
    pub stats: Cell<ClientStats>,
    pub quality: RefCell<HashMap<u64, NetworkQualityInfo>>,
    pub state: Cell<ClientConnectionState>,
    pub channel: RefCell<Option<String>>,
    pub fail_join: Cell<bool>,
    pub fail_subscribe: Cell<bool>,
}

impl FakeClient {
    fn new(ops: OpLog) -> Self {
        Self {
            ops,
            listener: RefCell::new(None),
            users: RefCell::new(Vec::new()),
            remote_audio: RefCell::new(HashMap::new()),
            remote_video: RefCell::new(HashMap::new()),
            stats: Cell::new(ClientStats::default()),
            quality: RefCell::new(HashMap::new()),
            state: Cell::new(ClientConnectionState::Disconnected),
            channel: RefCell::new(None),
            fail_join: Cell::new(false),
            fail_subscribe: Cell::new(false),
        }
    }

    fn log(&self, op: impl Into<String>) {
        self.ops.borrow_mut().push(op.into());
    }

    pub fn add_user(&self, uid: u64, has_audio: bool, has_video: bool) {
        self.users.borrow_mut().push(RemoteUserSnapshot {
            uid,
            has_audio,
            has_video,
        });
    }

    pub fn remote_audio_track(&self, uid: u64) -> Option<Rc<FakeRemoteAudioTrack>> {
        self.remote_audio.borrow().get(&uid).cloned()
    }

    pub fn remote_video_track(&self, uid: u64) -> Option<Rc<FakeRemoteVideoTrack>> {
        self.remote_video.borrow().get(&uid).cloned()
    }

    /// Delivers one event through the registered listener, driving the
    /// returned future to completion the way a real client would.
    pub async fn emit(&self, event: ClientEvent) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(event).await;
        }
    }
}

#[async_trait(?Send)]
impl RtcClient for FakeClient {
    async fn join(
        &self,
        _token: Option<&str>,
        channel: &str,
        identity: JoinIdentity,
    ) -> anyhow::Result<JoinedId> {
        if self.fail_join.get() {
            return Err(anyhow!("join refused"));
        }
        self.log(format!("join({channel})"));
        *self.channel.borrow_mut() = Some(channel.to_string());
        self.state.set(ClientConnectionState::Connected);
        Ok(match identity {
            JoinIdentity::Uid(0) => JoinedId::Uid(1),
            JoinIdentity::Uid(uid) => JoinedId::Uid(uid),
            JoinIdentity::Account(account) => JoinedId::Account(account),
        })
    }

    async fn leave(&self) -> anyhow::Result<()> {
        self.log("leave");
        *self.channel.borrow_mut() = None;
        self.state.set(ClientConnectionState::Disconnected);
        Ok(())
    }

    async fn publish(&self, track: LocalTrackHandle) -> anyhow::Result<()> {
        match track {
            LocalTrackHandle::Audio(_) => self.log("publish(audio)"),
            LocalTrackHandle::Video(_) => self.log("publish(video)"),
        }
        Ok(())
    }

    async fn unpublish(&self, track: LocalTrackHandle) -> anyhow::Result<()> {
        match track {
            LocalTrackHandle::Audio(_) => self.log("unpublish(audio)"),
            LocalTrackHandle::Video(_) => self.log("unpublish(video)"),
        }
        Ok(())
    }

    async fn subscribe_audio(&self, uid: u64) -> anyhow::Result<Rc<dyn RemoteAudioTrack>> {
        if self.fail_subscribe.get() {
            return Err(anyhow!("subscribe refused"));
        }
        self.log(format!("subscribe_audio({uid})"));
        let track = Rc::new(FakeRemoteAudioTrack::default());
        self.remote_audio.borrow_mut().insert(uid, track.clone());
        Ok(track)
    }

    async fn subscribe_video(&self, uid: u64) -> anyhow::Result<Rc<dyn RemoteVideoTrack>> {
        if self.fail_subscribe.get() {
            return Err(anyhow!("subscribe refused"));
        }
        self.log(format!("subscribe_video({uid})"));
        let track = Rc::new(FakeRemoteVideoTrack::default());
        self.remote_video.borrow_mut().insert(uid, track.clone());
        Ok(track)
    }

    async fn unsubscribe(&self, uid: u64, kind: MediaKind) -> anyhow::Result<()> {
        self.log(format!("unsubscribe({uid},{})", kind.as_str()));
        Ok(())
    }

    async fn set_client_role(
        &self,
        role: ClientRole,
        latency: Option<AudienceLatency>,
    ) -> anyhow::Result<()> {
        self.log(format!("set_client_role({role:?},{latency:?})"));
        Ok(())
    }

    async fn renew_token(&self, _token: &str) -> anyhow::Result<()> {
        self.log("renew_token");
        Ok(())
    }

    async fn set_remote_video_stream_type(
        &self,
        uid: u64,
        kind: RemoteStreamKind,
    ) -> anyhow::Result<()> {
        self.log(format!("set_remote_video_stream_type({uid},{kind:?})"));
        Ok(())
    }

    async fn set_default_remote_video_stream_type(
        &self,
        kind: RemoteStreamKind,
    ) -> anyhow::Result<()> {
        self.log(format!("set_default_remote_video_stream_type({kind:?})"));
        Ok(())
    }

    async fn set_stream_fallback_option(
        &self,
        uid: u64,
        option: FallbackOption,
    ) -> anyhow::Result<()> {
        self.log(format!("set_stream_fallback_option({uid},{option:?})"));
        Ok(())
    }

    async fn set_encryption_config(&self, mode: &str, secret: Option<&str>) -> anyhow::Result<()> {
        self.log(format!(
            "set_encryption_config({mode},{})",
            secret.unwrap_or("-")
        ));
        Ok(())
    }

    async fn enable_dual_stream(&self, enabled: bool) -> anyhow::Result<()> {
        self.log(format!("enable_dual_stream({enabled})"));
        Ok(())
    }

    fn enable_audio_volume_indicator(&self) {
        self.log("enable_audio_volume_indicator");
    }

    async fn start_live_streaming(&self, url: &str, transcoding: bool) -> anyhow::Result<()> {
        self.log(format!("start_live_streaming({url},{transcoding})"));
        Ok(())
    }

    async fn stop_live_streaming(&self, url: &str) -> anyhow::Result<()> {
        self.log(format!("stop_live_streaming({url})"));
        Ok(())
    }

    async fn set_live_transcoding(&self, _config: &LiveTranscoding) -> anyhow::Result<()> {
        self.log("set_live_transcoding");
        Ok(())
    }

    async fn add_injected_stream(
        &self,
        url: &str,
        _config: &InjectStreamConfig,
    ) -> anyhow::Result<()> {
        self.log(format!("add_injected_stream({url})"));
        Ok(())
    }

    async fn remove_injected_stream(&self, url: &str) -> anyhow::Result<()> {
        self.log(format!("remove_injected_stream({url})"));
        Ok(())
    }

    async fn start_channel_media_relay(
        &self,
        _config: &ChannelMediaRelayConfiguration,
    ) -> anyhow::Result<()> {
        self.log("start_channel_media_relay");
        Ok(())
    }

    async fn update_channel_media_relay(
        &self,
        _config: &ChannelMediaRelayConfiguration,
    ) -> anyhow::Result<()> {
        self.log("update_channel_media_relay");
        Ok(())
    }

    async fn stop_channel_media_relay(&self) -> anyhow::Result<()> {
        self.log("stop_channel_media_relay");
        Ok(())
    }

    async fn send_custom_report(
        &self,
        id: &str,
        category: &str,
        event: &str,
        label: &str,
        value: i64,
    ) -> anyhow::Result<()> {
        self.log(format!(
            "send_custom_report({id},{category},{event},{label},{value})"
        ));
        Ok(())
    }

    fn start_proxy_server(&self, mode: u32) {
        self.log(format!("start_proxy_server({mode})"));
    }

    fn stop_proxy_server(&self) {
        self.log("stop_proxy_server");
    }

    fn connection_state(&self) -> ClientConnectionState {
        self.state.get()
    }

    fn channel_name(&self) -> Option<String> {
        self.channel.borrow().clone()
    }

    fn remote_users(&self) -> Vec<RemoteUserSnapshot> {
        self.users.borrow().clone()
    }

    fn stats(&self) -> ClientStats {
        self.stats.get()
    }

    fn remote_network_quality(&self) -> HashMap<u64, NetworkQualityInfo> {
        self.quality.borrow().clone()
    }

    fn set_event_listener(&self, listener: ClientEventListener) {
        *self.listener.borrow_mut() = Some(listener);
    }
}

pub struct FakeProvider {
    ops: OpLog,
    pub clients: RefCell<Vec<Rc<FakeClient>>>,
    pub audio_tracks: RefCell<Vec<Rc<FakeAudioTrack>>>,
    pub video_tracks: RefCell<Vec<Rc<FakeVideoTrack>>>,
    pub recording: RefCell<Vec<DeviceInfo>>,
    pub playback: RefCell<Vec<DeviceInfo>>,
    pub cameras: RefCell<Vec<DeviceInfo>>,
    pub screen_audio: Cell<bool>,
    pub fail_microphone: Cell<bool>,
    pub fail_camera: Cell<bool>,
}

impl FakeProvider {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            ops: Rc::new(RefCell::new(Vec::new())),
            clients: RefCell::new(Vec::new()),
            audio_tracks: RefCell::new(Vec::new()),
            video_tracks: RefCell::new(Vec::new()),
            recording: RefCell::new(Vec::new()),
            playback: RefCell::new(Vec::new()),
            cameras: RefCell::new(Vec::new()),
            screen_audio: Cell::new(false),
            fail_microphone: Cell::new(false),
            fail_camera: Cell::new(false),
        })
    }

    fn log(&self, op: impl Into<String>) {
        self.ops.borrow_mut().push(op.into());
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops.borrow().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    pub fn last_client(&self) -> Rc<FakeClient> {
        self.clients
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("no client created yet"))
    }

    pub fn last_audio_track(&self) -> Rc<FakeAudioTrack> {
        self.audio_tracks
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("no audio track created yet"))
    }

    pub fn last_video_track(&self) -> Rc<FakeVideoTrack> {
        self.video_tracks
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("no video track created yet"))
    }

    pub fn add_recording_device(&self, id: &str, name: &str) {
        self.recording.borrow_mut().push(DeviceInfo {
            device_id: id.to_string(),
            device_name: name.to_string(),
        });
    }

    pub fn add_playback_device(&self, id: &str, name: &str) {
        self.playback.borrow_mut().push(DeviceInfo {
            device_id: id.to_string(),
            device_name: name.to_string(),
        });
    }

    pub fn add_camera(&self, id: &str, name: &str) {
        self.cameras.borrow_mut().push(DeviceInfo {
            device_id: id.to_string(),
            device_name: name.to_string(),
        });
    }
}

#[async_trait(?Send)]
impl RtcProvider for FakeProvider {
    fn create_client(&self, config: &ClientConfig) -> Rc<dyn RtcClient> {
        self.log(format!("create_client({:?})", config.mode));
        let client = Rc::new(FakeClient::new(self.ops.clone()));
        self.clients.borrow_mut().push(client.clone());
        client
    }

    async fn create_microphone_track(
        &self,
        device_id: Option<&str>,
        encoder_preset: Option<&'static str>,
    ) -> anyhow::Result<Rc<dyn LocalAudioTrack>> {
        if self.fail_microphone.get() {
            return Err(anyhow!("microphone denied"));
        }
        self.log(format!(
            "create_microphone({},{})",
            device_id.unwrap_or("-"),
            encoder_preset.unwrap_or("-")
        ));
        let track = Rc::new(FakeAudioTrack::default());
        self.audio_tracks.borrow_mut().push(track.clone());
        Ok(track)
    }

    async fn create_camera_track(
        &self,
        device_id: Option<&str>,
        _encoder: Option<&VideoEncoderConfiguration>,
    ) -> anyhow::Result<Rc<dyn LocalVideoTrack>> {
        if self.fail_camera.get() {
            return Err(anyhow!("camera denied"));
        }
        self.log(format!("create_camera({})", device_id.unwrap_or("-")));
        let track = Rc::new(FakeVideoTrack::default());
        self.video_tracks.borrow_mut().push(track.clone());
        Ok(track)
    }

    async fn create_screen_tracks(
        &self,
        _config: &ScreenCaptureParameters,
    ) -> anyhow::Result<ScreenTracks> {
        self.log("create_screen");
        let video = Rc::new(FakeVideoTrack::default());
        self.video_tracks.borrow_mut().push(video.clone());
        let audio = if self.screen_audio.get() {
            let track = Rc::new(FakeAudioTrack::default());
            self.audio_tracks.borrow_mut().push(track.clone());
            Some(track as Rc<dyn LocalAudioTrack>)
        } else {
            None
        };
        Ok(ScreenTracks { video, audio })
    }

    async fn playback_devices(&self) -> anyhow::Result<Vec<DeviceInfo>> {
        Ok(self.playback.borrow().clone())
    }

    async fn recording_devices(&self) -> anyhow::Result<Vec<DeviceInfo>> {
        Ok(self.recording.borrow().clone())
    }

    async fn video_devices(&self) -> anyhow::Result<Vec<DeviceInfo>> {
        Ok(self.cameras.borrow().clone())
    }

    fn set_log_level(&self, level: u8) {
        self.log(format!("set_log_level({level})"));
    }

    fn enable_log_upload(&self, enabled: bool) {
        self.log(format!("enable_log_upload({enabled})"));
    }

    fn set_area_code(&self, areas: &[RegionArea]) {
        self.log(format!("set_area_code({areas:?})"));
    }

    fn set_parameter(&self, parameters: &str) {
        self.log(format!("set_parameter({parameters})"));
    }

    fn version(&self) -> String {
        "fake-4.0.0".to_string()
    }
}

pub struct Harness {
    pub provider: Rc<FakeProvider>,
    pub engine: RtcEngine,
    pub events: Rc<RefCell<Vec<(String, String)>>>,
}

impl Harness {
    pub fn event_names(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn last_payload(&self, name: &str) -> Option<serde_json::Value> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|(event, _)| event == name)
            .map(|(_, payload)| serde_json::from_str(payload).unwrap())
    }
}

pub fn harness() -> Harness {
    let provider = FakeProvider::new();
    let engine = RtcEngine::new(provider.clone());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    engine.set_event_handler(Callback::from(move |(name, payload): (String, String)| {
        sink.borrow_mut().push((name, payload));
    }));
    Harness {
        provider,
        engine,
        events,
    }
}

pub async fn initialized() -> Harness {
    let h = harness();
    h.engine
        .call_api(
            ApiTypeEngine::Initialize.id(),
            r#"{"context":{"appId":"test-app"}}"#,
            None,
        )
        .await
        .unwrap();
    h
}

pub async fn joined(channel: &str, uid: u64) -> Harness {
    let h = initialized().await;
    let params = format!(r#"{{"token":null,"channelId":"{channel}","uid":{uid}}}"#);
    h.engine
        .call_api(ApiTypeEngine::JoinChannel.id(), &params, None)
        .await
        .unwrap();
    h
}
