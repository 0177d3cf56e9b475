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

//! The session engine.
//!
//! One [`RtcEngine`] represents one logical connection: the default session,
//! or a named channel session owned by the channel registry. The handle is
//! cheap to clone; all state lives behind a single `Rc<RefCell<Inner>>` and
//! borrows are never held across await points. Concurrent calls on the same
//! session are not serialized internally; interleaving state-mutating calls
//! is a caller hazard.

mod bridge;
mod dispatch;
mod subsystem;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use futures::future::join_all;
use log::{error, warn};
use serde::Serialize;

use rtcbridge_diagnostics::{trace_event, TraceKind};
use rtcbridge_types::client::MediaKind;
use rtcbridge_types::events::{
    names, JoinChannelSuccessPayload, LeaveChannelPayload, RemoteAudioStateChangedPayload,
    RemoteVideoStateChangedPayload, RtcStats,
};
use rtcbridge_types::native::{
    AudienceLatencyLevel, ChannelProfile, ClientRoleType, CloudProxyType, ConnectionStateType,
    EncryptionModeType, LogFilter, MirrorMode, RemoteAudioState, RemoteAudioStateReason,
    RemoteVideoState, RemoteVideoStateReason, RemoteVideoStreamKind, RenderMode,
    StreamFallbackOptions,
};
use rtcbridge_types::params::{
    BeautyOptions, ChannelMediaRelayConfiguration, ClientRoleOptions, CustomReportParams,
    EncryptionConfig, EngineContext, InjectStreamConfig, LiveTranscoding,
    ScreenCaptureParameters, VideoCanvasDesc,
};
use rtcbridge_types::translate::{
    audience_latency_to_client, channel_profile_to_mode, client_role_to_client,
    cloud_proxy_to_client, connection_state_to_native, encryption_mode_to_client,
    fallback_option_to_client, log_filter_to_level, log_level_to_client, remote_stream_kind_to_client,
    render_mode_to_fit, resolve_mirror,
};
use rtcbridge_types::{Callback, EventHandler};

use crate::channel::merge_channel_id;
use crate::device::DeviceManager;
use crate::error::BridgeError;
use crate::rtc::{
    ClientConfig, JoinIdentity, LocalTrackHandle, RtcClient, RtcProvider, SurfaceBinding,
    ViewHandle,
};

pub(crate) struct Inner {
    pub(crate) config: ClientConfig,
    pub(crate) context: Option<EngineContext>,
    pub(crate) client: Option<Rc<dyn RtcClient>>,
    pub(crate) handler: EventHandler,
    pub(crate) audio_enabled: bool,
    pub(crate) video_enabled: bool,
    pub(crate) local_audio_enabled: bool,
    pub(crate) local_video_enabled: bool,
    pub(crate) mute_local_audio: bool,
    pub(crate) mute_local_video: bool,
    pub(crate) default_mute_remote_audio: bool,
    pub(crate) default_mute_remote_video: bool,
    pub(crate) encryption_mode: String,
    pub(crate) encryption_secret: Option<String>,
    pub(crate) app_type: Option<i64>,
    pub(crate) joined: bool,
    pub(crate) audio_published: bool,
    pub(crate) video_published: bool,
    pub(crate) channels: HashMap<String, RtcEngine>,
    // Shared with every channel session's event wrapper.
    pub(crate) channel_handler: Rc<RefCell<EventHandler>>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            config: ClientConfig::default(),
            context: None,
            client: None,
            handler: EventHandler::default(),
            audio_enabled: true,
            video_enabled: false,
            local_audio_enabled: true,
            local_video_enabled: true,
            mute_local_audio: false,
            mute_local_video: false,
            default_mute_remote_audio: false,
            default_mute_remote_video: false,
            encryption_mode: "none".to_string(),
            encryption_secret: None,
            app_type: None,
            joined: false,
            audio_published: false,
            video_published: false,
            channels: HashMap::new(),
            channel_handler: Rc::new(RefCell::new(EventHandler::default())),
        }
    }
}

/// Cheap-to-clone handle over one session.
#[derive(Clone)]
pub struct RtcEngine {
    pub(crate) provider: Rc<dyn RtcProvider>,
    pub(crate) devices: DeviceManager,
    pub(crate) inner: Rc<RefCell<Inner>>,
}

/// Non-owning handle captured by event listeners and track hooks so a
/// dropped session does not keep itself alive through its own callbacks.
#[derive(Clone)]
pub(crate) struct WeakRtcEngine {
    provider: Rc<dyn RtcProvider>,
    devices: DeviceManager,
    inner: Weak<RefCell<Inner>>,
}

impl WeakRtcEngine {
    pub(crate) fn upgrade(&self) -> Option<RtcEngine> {
        self.inner.upgrade().map(|inner| RtcEngine {
            provider: self.provider.clone(),
            devices: self.devices.clone(),
            inner,
        })
    }
}

impl RtcEngine {
    pub fn new(provider: Rc<dyn RtcProvider>) -> Self {
        Self {
            devices: DeviceManager::new(provider.clone()),
            provider,
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    pub fn device_manager(&self) -> DeviceManager {
        self.devices.clone()
    }

    /// Registers the single event handler; a new registration replaces the
    /// previous one. Events fired before registration are lost.
    pub fn set_event_handler(&self, handler: EventHandler) {
        self.inner.borrow_mut().handler = handler;
    }

    pub(crate) fn downgrade(&self) -> WeakRtcEngine {
        WeakRtcEngine {
            provider: self.provider.clone(),
            devices: self.devices.clone(),
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn client(&self) -> Result<Rc<dyn RtcClient>, BridgeError> {
        self.inner
            .borrow()
            .client
            .clone()
            .ok_or(BridgeError::NotInitialized)
    }

    pub(crate) fn emit_event(&self, name: &str, payload: String) {
        trace_event!("engine", TraceKind::EventOut, name, Some(payload.clone()));
        let handler = self.inner.borrow().handler.clone();
        handler.emit((name.to_string(), payload));
    }

    pub(crate) fn emit_json<T: Serialize>(&self, name: &str, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(json) => self.emit_event(name, json),
            Err(err) => error!("failed to encode {name} payload: {err}"),
        }
    }

    // === initialization & teardown ===

    /// Records the context, applies the process-wide subsystem settings, and
    /// creates the underlying client with its listener bridge attached.
    pub fn initialize(&self, context: EngineContext) -> Result<(), BridgeError> {
        subsystem::configure(self.provider.as_ref(), &context);
        let config = self.inner.borrow().config;
        let client = self.provider.create_client(&config);
        bridge::attach(self, client.as_ref());
        let mut inner = self.inner.borrow_mut();
        inner.context = Some(context);
        inner.client = Some(client);
        Ok(())
    }

    /// Tears down this session and every channel session it owns. Always
    /// succeeds: a failed leave is logged and swallowed, and all state
    /// returns to construction-time defaults.
    pub async fn release(&self) {
        let channels: Vec<RtcEngine> = {
            let mut inner = self.inner.borrow_mut();
            inner.channels.drain().map(|(_, session)| session).collect()
        };
        for session in channels {
            session.release_session().await;
        }
        self.release_session().await;
    }

    pub(crate) async fn release_session(&self) {
        let joined = self.inner.borrow().joined;
        if joined {
            if let Err(err) = self.leave_channel().await {
                warn!("leave during release failed: {err}");
            }
        }
        self.devices.reset();
        let mut inner = self.inner.borrow_mut();
        let channel_handler = inner.channel_handler.clone();
        *inner = Inner::default();
        inner.channel_handler = channel_handler;
    }

    /// Switches peer-to-peer vs. broadcast mode. A real mode change
    /// invalidates any in-progress call: it leaves the channel, releases
    /// tracks, and recreates the client handle.
    pub async fn set_channel_profile(&self, profile: i64) -> Result<(), BridgeError> {
        let mode = match channel_profile_to_mode(ChannelProfile::from_code(profile)) {
            Some(mode) => mode,
            None => return Ok(()),
        };
        let (current, has_client) = {
            let inner = self.inner.borrow();
            (inner.config.mode, inner.client.is_some())
        };
        if mode == current {
            return Ok(());
        }
        self.inner.borrow_mut().config.mode = mode;
        if has_client {
            if self.inner.borrow().joined {
                self.leave_channel().await?;
            }
            self.devices.release_tracks();
            let config = self.inner.borrow().config;
            let client = self.provider.create_client(&config);
            bridge::attach(self, client.as_ref());
            self.inner.borrow_mut().client = Some(client);
        }
        Ok(())
    }

    pub async fn set_client_role(
        &self,
        role: i64,
        options: Option<ClientRoleOptions>,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        let role = client_role_to_client(ClientRoleType::from_code(role));
        let latency = options
            .and_then(|o| o.audience_latency_level)
            .map(|level| audience_latency_to_client(AudienceLatencyLevel::from_code(level)));
        client.set_client_role(role, latency).await?;
        Ok(())
    }

    // === join / leave ===

    /// Joins, then sets up local media per the current flags. Join success is
    /// reported even when media setup fails afterwards: the success event is
    /// emitted first and the media error propagates to the caller.
    pub async fn join_channel(
        &self,
        token: Option<String>,
        channel_id: String,
        identity: JoinIdentity,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        let assigned = client.join(token.as_deref(), &channel_id, identity).await?;
        self.inner.borrow_mut().joined = true;
        let media = self.publish_local_tracks().await;
        self.emit_json(
            names::JOIN_CHANNEL_SUCCESS,
            &JoinChannelSuccessPayload {
                channel: channel_id,
                uid: assigned,
                elapsed: 0,
            },
        );
        media
    }

    /// Issues the underlying leave, releases every track, and emits the
    /// fixed-shape statistics snapshot (fields the client cannot report stay
    /// zero).
    pub async fn leave_channel(&self) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.leave().await?;
        self.devices.release_tracks();
        {
            let mut inner = self.inner.borrow_mut();
            inner.joined = false;
            inner.audio_published = false;
            inner.video_published = false;
        }
        let stats = client.stats();
        self.emit_json(
            names::LEAVE_CHANNEL,
            &LeaveChannelPayload {
                stats: RtcStats {
                    duration: stats.duration,
                    user_count: stats.user_count,
                    gateway_rtt: stats.rtt_ms,
                    ..Default::default()
                },
            },
        );
        Ok(())
    }

    pub async fn renew_token(&self, token: String) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.renew_token(&token).await?;
        Ok(())
    }

    /// Creates and publishes whichever local tracks the current flags call
    /// for; used at join and by the channel surface's explicit publish.
    pub(crate) async fn publish_local_tracks(&self) -> Result<(), BridgeError> {
        self.converge_local_audio().await?;
        self.converge_local_video().await
    }

    /// Unpublishes every currently published local track.
    pub(crate) async fn unpublish_local_tracks(&self) -> Result<(), BridgeError> {
        let client = self.client()?;
        let (audio_published, video_published) = {
            let inner = self.inner.borrow();
            (inner.audio_published, inner.video_published)
        };
        if audio_published {
            if let Some(track) = self.devices.local_audio() {
                client.unpublish(LocalTrackHandle::Audio(track)).await?;
            }
            self.inner.borrow_mut().audio_published = false;
        }
        if video_published {
            if let Some(track) = self.devices.local_video() {
                client.unpublish(LocalTrackHandle::Video(track)).await?;
            }
            self.inner.borrow_mut().video_published = false;
        }
        Ok(())
    }

    // === local media convergence ===
    //
    // Enable/disable governs local processing (track.set_enabled); mute
    // governs remote visibility (publish/unpublish). Each flag setter runs
    // one convergence pass, so toggling any flag while joined settles the
    // published state in a single operation and repeated calls are
    // idempotent.

    pub(crate) async fn converge_local_audio(&self) -> Result<(), BridgeError> {
        let (client, joined, want_track, mute, published) = {
            let inner = self.inner.borrow();
            (
                inner.client.clone(),
                inner.joined,
                inner.audio_enabled && inner.local_audio_enabled,
                inner.mute_local_audio,
                inner.audio_published,
            )
        };
        let client = match client {
            Some(client) if joined => client,
            _ => return Ok(()),
        };
        let mut track = self.devices.local_audio();
        if track.is_none() && want_track {
            let (created, is_new) = self.devices.get_or_create_microphone(false).await?;
            if is_new {
                bridge::hook_audio_ended(self, created.as_ref());
            }
            track = Some(created);
        }
        let track = match track {
            Some(track) => track,
            None => return Ok(()),
        };
        track.set_enabled(want_track).await?;
        let want_published = want_track && !mute;
        if want_published && !published {
            client.publish(LocalTrackHandle::Audio(track)).await?;
            self.inner.borrow_mut().audio_published = true;
        } else if !want_published && published {
            client.unpublish(LocalTrackHandle::Audio(track)).await?;
            self.inner.borrow_mut().audio_published = false;
        }
        Ok(())
    }

    pub(crate) async fn converge_local_video(&self) -> Result<(), BridgeError> {
        let (client, joined, want_track, mute, published) = {
            let inner = self.inner.borrow();
            (
                inner.client.clone(),
                inner.joined,
                inner.video_enabled && inner.local_video_enabled,
                inner.mute_local_video,
                inner.video_published,
            )
        };
        let client = match client {
            Some(client) if joined => client,
            _ => return Ok(()),
        };
        let mut track = self.devices.local_video();
        if track.is_none() && want_track {
            let (created, is_new) = self.devices.get_or_create_camera(false).await?;
            if is_new {
                bridge::hook_video_ended(self, created.as_ref());
            }
            track = Some(created);
        }
        let track = match track {
            Some(track) => track,
            None => return Ok(()),
        };
        track.set_enabled(want_track).await?;
        let want_published = want_track && !mute;
        if want_published && !published {
            client.publish(LocalTrackHandle::Video(track)).await?;
            self.inner.borrow_mut().video_published = true;
            self.devices.play_local_video();
        } else if !want_published && published {
            client.unpublish(LocalTrackHandle::Video(track)).await?;
            self.inner.borrow_mut().video_published = false;
        }
        Ok(())
    }

    // === flag setters ===

    pub async fn set_audio_enabled(&self, enabled: bool) -> Result<(), BridgeError> {
        self.inner.borrow_mut().audio_enabled = enabled;
        self.converge_local_audio().await
    }

    pub async fn set_local_audio_enabled(&self, enabled: bool) -> Result<(), BridgeError> {
        self.inner.borrow_mut().local_audio_enabled = enabled;
        self.converge_local_audio().await
    }

    pub async fn set_mute_local_audio(&self, mute: bool) -> Result<(), BridgeError> {
        self.inner.borrow_mut().mute_local_audio = mute;
        self.converge_local_audio().await
    }

    pub async fn set_video_enabled(&self, enabled: bool) -> Result<(), BridgeError> {
        self.inner.borrow_mut().video_enabled = enabled;
        self.converge_local_video().await
    }

    pub async fn set_local_video_enabled(&self, enabled: bool) -> Result<(), BridgeError> {
        self.inner.borrow_mut().local_video_enabled = enabled;
        self.converge_local_video().await
    }

    pub async fn set_mute_local_video(&self, mute: bool) -> Result<(), BridgeError> {
        self.inner.borrow_mut().mute_local_video = mute;
        self.converge_local_video().await
    }

    pub fn set_default_mute_remote_audio(&self, mute: bool) {
        self.inner.borrow_mut().default_mute_remote_audio = mute;
    }

    pub fn set_default_mute_remote_video(&self, mute: bool) {
        self.inner.borrow_mut().default_mute_remote_video = mute;
    }

    // === remote streams ===

    /// Mute: unsubscribe, drop the tracked entry, report "stopped". Unmute:
    /// subscribe, track, and report "starting" once the first frame decodes.
    pub(crate) async fn set_remote_audio_muted(
        &self,
        uid: u64,
        mute: bool,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        if mute {
            if self.devices.remote_audio(uid).is_none() {
                return Ok(());
            }
            client.unsubscribe(uid, MediaKind::Audio).await?;
            if let Some(track) = self.devices.remove_remote_audio(uid) {
                track.stop();
            }
            self.emit_json(
                names::REMOTE_AUDIO_STATE_CHANGED,
                &RemoteAudioStateChangedPayload {
                    uid,
                    state: RemoteAudioState::Stopped.code(),
                    reason: RemoteAudioStateReason::LocalMuted.code(),
                    elapsed: 0,
                },
            );
        } else {
            let track = client.subscribe_audio(uid).await?;
            if self.devices.insert_remote_audio(uid, track.clone()) {
                track.play();
                let weak = self.downgrade();
                track.on_first_frame_decoded(Rc::new(move || {
                    if let Some(engine) = weak.upgrade() {
                        engine.emit_json(
                            names::REMOTE_AUDIO_STATE_CHANGED,
                            &RemoteAudioStateChangedPayload {
                                uid,
                                state: RemoteAudioState::Starting.code(),
                                reason: RemoteAudioStateReason::LocalUnmuted.code(),
                                elapsed: 0,
                            },
                        );
                    }
                }));
            }
        }
        Ok(())
    }

    pub(crate) async fn set_remote_video_muted(
        &self,
        uid: u64,
        mute: bool,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        if mute {
            if self.devices.remote_video(uid).is_none() {
                return Ok(());
            }
            client.unsubscribe(uid, MediaKind::Video).await?;
            if let Some(track) = self.devices.remove_remote_video(uid) {
                track.stop();
            }
            self.emit_json(
                names::REMOTE_VIDEO_STATE_CHANGED,
                &RemoteVideoStateChangedPayload {
                    uid,
                    state: RemoteVideoState::Stopped.code(),
                    reason: RemoteVideoStateReason::LocalMuted.code(),
                    elapsed: 0,
                },
            );
        } else {
            let track = client.subscribe_video(uid).await?;
            if self.devices.insert_remote_video(uid, track.clone()) {
                self.devices.play_remote_video(uid);
                let weak = self.downgrade();
                track.on_first_frame_decoded(Rc::new(move || {
                    if let Some(engine) = weak.upgrade() {
                        engine.emit_json(
                            names::REMOTE_VIDEO_STATE_CHANGED,
                            &RemoteVideoStateChangedPayload {
                                uid,
                                state: RemoteVideoState::Starting.code(),
                                reason: RemoteVideoStateReason::LocalUnmuted.code(),
                                elapsed: 0,
                            },
                        );
                    }
                }));
            }
        }
        Ok(())
    }

    /// Muting a uid that matches no currently known remote user is a silent
    /// no-op.
    pub async fn mute_remote_audio_stream(&self, uid: u64, mute: bool) -> Result<(), BridgeError> {
        let client = self.client()?;
        if !client.remote_users().iter().any(|user| user.uid == uid) {
            return Ok(());
        }
        self.set_remote_audio_muted(uid, mute).await
    }

    pub async fn mute_remote_video_stream(&self, uid: u64, mute: bool) -> Result<(), BridgeError> {
        let client = self.client()?;
        if !client.remote_users().iter().any(|user| user.uid == uid) {
            return Ok(());
        }
        self.set_remote_video_muted(uid, mute).await
    }

    /// Fans out to every known remote user, dispatched together and awaited
    /// together; the first failure fails the whole batch.
    pub async fn mute_all_remote_audio_streams(&self, mute: bool) -> Result<(), BridgeError> {
        let client = self.client()?;
        let users = client.remote_users();
        let results = join_all(
            users
                .iter()
                .map(|user| self.set_remote_audio_muted(user.uid, mute)),
        )
        .await;
        results.into_iter().collect::<Result<(), _>>()
    }

    pub async fn mute_all_remote_video_streams(&self, mute: bool) -> Result<(), BridgeError> {
        let client = self.client()?;
        let users = client.remote_users();
        let results = join_all(
            users
                .iter()
                .map(|user| self.set_remote_video_muted(user.uid, mute)),
        )
        .await;
        results.into_iter().collect::<Result<(), _>>()
    }

    /// Volume for one remote user's audio; unknown uids are a silent no-op.
    pub fn adjust_user_playback_volume(&self, uid: u64, volume: u32) {
        if let Some(track) = self.devices.remote_audio(uid) {
            track.set_volume(volume);
        }
    }

    pub async fn set_remote_video_stream_type(
        &self,
        uid: u64,
        stream_type: i64,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        let kind = remote_stream_kind_to_client(RemoteVideoStreamKind::from_code(stream_type));
        client.set_remote_video_stream_type(uid, kind).await?;
        Ok(())
    }

    pub async fn set_remote_default_video_stream_type(
        &self,
        stream_type: i64,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        let kind = remote_stream_kind_to_client(RemoteVideoStreamKind::from_code(stream_type));
        client.set_default_remote_video_stream_type(kind).await?;
        Ok(())
    }

    pub async fn set_remote_subscribe_fallback_option(
        &self,
        option: i64,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        let option = fallback_option_to_client(StreamFallbackOptions::from_code(option));
        let users = client.remote_users();
        let results = join_all(
            users
                .iter()
                .map(|user| client.set_stream_fallback_option(user.uid, option)),
        )
        .await;
        results
            .into_iter()
            .collect::<Result<(), _>>()
            .map_err(Into::into)
    }

    // === preview & surface binding ===

    pub async fn start_preview(&self) -> Result<(), BridgeError> {
        self.client()?;
        let want = {
            let inner = self.inner.borrow();
            inner.video_enabled && inner.local_video_enabled
        };
        if !want {
            return Ok(());
        }
        let (track, is_new) = self.devices.get_or_create_camera(false).await?;
        if is_new {
            bridge::hook_video_ended(self, track.as_ref());
        }
        self.devices.play_local_video();
        Ok(())
    }

    pub fn stop_preview(&self) {
        if let Some(track) = self.devices.local_video() {
            track.stop();
        }
    }

    /// Stores (or clears) the local binding and replays an active local
    /// track into it.
    pub fn setup_local_video(&self, desc: Option<VideoCanvasDesc>, view: Option<ViewHandle>) {
        match (desc, view) {
            (Some(desc), Some(view)) => {
                let fit =
                    render_mode_to_fit(RenderMode::from_code(desc.render_mode.unwrap_or(0)));
                let mirror = resolve_mirror(0, MirrorMode::from_code(desc.mirror_mode.unwrap_or(0)));
                self.devices.set_binding(0, Some(SurfaceBinding { view, fit, mirror }));
                self.devices.play_local_video();
            }
            _ => self.devices.set_binding(0, None),
        }
    }

    /// Binds a remote uid's surface in this session or, when the descriptor
    /// names a channel, in that channel's session.
    pub fn setup_remote_video(
        &self,
        desc: Option<VideoCanvasDesc>,
        view: Option<ViewHandle>,
    ) -> Result<(), BridgeError> {
        let desc = match desc {
            Some(desc) => desc,
            None => return Ok(()),
        };
        let target = match desc.channel_id.as_deref() {
            Some(id) if !id.is_empty() => self
                .channel_session(id)
                .ok_or(BridgeError::NotInitialized)?,
            _ => self.clone(),
        };
        match view {
            Some(view) => {
                let fit =
                    render_mode_to_fit(RenderMode::from_code(desc.render_mode.unwrap_or(0)));
                let mirror =
                    resolve_mirror(desc.uid, MirrorMode::from_code(desc.mirror_mode.unwrap_or(0)));
                target
                    .devices
                    .set_binding(desc.uid, Some(SurfaceBinding { view, fit, mirror }));
                target.devices.play_remote_video(desc.uid);
            }
            None => target.devices.set_binding(desc.uid, None),
        }
        Ok(())
    }

    // === screen capture ===

    /// Replaces the local video with a screen capture. Published tracks are
    /// retired before the hardware handles are swapped, then the normal
    /// convergence rules decide what the new tracks publish.
    pub async fn start_screen_capture(
        &self,
        config: ScreenCaptureParameters,
    ) -> Result<(), BridgeError> {
        self.client()?;
        self.unpublish_local_tracks().await?;
        let (video, audio) = self.devices.create_screen(config).await?;
        bridge::hook_video_ended(self, video.as_ref());
        if let Some(audio) = &audio {
            bridge::hook_audio_ended(self, audio.as_ref());
        }
        self.publish_local_tracks().await
    }

    /// Retires only the screen-derived tracks; an independently published
    /// microphone keeps flowing.
    pub async fn stop_screen_capture(&self) -> Result<(), BridgeError> {
        let client = self.client()?;
        if !self.devices.is_screen_active() {
            return Ok(());
        }
        let screen_audio = self.devices.is_screen_audio_active();
        if self.inner.borrow().video_published {
            if let Some(track) = self.devices.local_video() {
                client.unpublish(LocalTrackHandle::Video(track)).await?;
            }
            self.inner.borrow_mut().video_published = false;
        }
        if screen_audio && self.inner.borrow().audio_published {
            if let Some(track) = self.devices.local_audio() {
                client.unpublish(LocalTrackHandle::Audio(track)).await?;
            }
            self.inner.borrow_mut().audio_published = false;
        }
        self.devices.close_screen();
        if screen_audio {
            // The system-audio track went with the capture; restore the
            // microphone under the normal flags.
            self.converge_local_audio().await?;
        }
        Ok(())
    }

    // === audio & misc settings ===

    pub fn enable_audio_volume_indication(&self) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.enable_audio_volume_indicator();
        Ok(())
    }

    pub async fn enable_dual_stream_mode(&self, enabled: bool) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.enable_dual_stream(enabled).await?;
        Ok(())
    }

    /// Explicit caller request; applies immediately rather than through the
    /// pinned initialization settings.
    pub fn set_log_filter(&self, filter: i64) {
        let level = log_level_to_client(log_filter_to_level(LogFilter::from_code(filter)));
        self.provider.set_log_level(level);
    }

    pub fn upload_log_file(&self) -> String {
        self.provider.enable_log_upload(true);
        String::new()
    }

    pub fn get_version(&self) -> String {
        self.provider.version()
    }

    pub fn set_parameters(&self, parameters: &str) {
        self.provider.set_parameter(parameters);
    }

    pub fn set_app_type(&self, app_type: i64) {
        self.inner.borrow_mut().app_type = Some(app_type);
    }

    pub fn set_cloud_proxy(&self, proxy_type: i64) -> Result<(), BridgeError> {
        let client = self.client()?;
        match cloud_proxy_to_client(CloudProxyType::from_code(proxy_type)) {
            0 => client.stop_proxy_server(),
            mode => client.start_proxy_server(mode),
        }
        Ok(())
    }

    pub fn get_connection_state(&self) -> i32 {
        match self.inner.borrow().client.clone() {
            Some(client) => connection_state_to_native(client.connection_state()).code(),
            None => ConnectionStateType::Disconnected.code(),
        }
    }

    // === encryption ===

    pub async fn set_encryption_secret(&self, secret: String) -> Result<(), BridgeError> {
        self.inner.borrow_mut().encryption_secret = Some(secret);
        self.apply_encryption().await
    }

    /// The mode arrives in the client's own string vocabulary.
    pub async fn set_encryption_mode(&self, mode: String) -> Result<(), BridgeError> {
        self.inner.borrow_mut().encryption_mode = mode;
        self.apply_encryption().await
    }

    pub async fn enable_encryption(
        &self,
        enabled: bool,
        config: EncryptionConfig,
    ) -> Result<(), BridgeError> {
        {
            let mut inner = self.inner.borrow_mut();
            inner.encryption_mode = if enabled {
                encryption_mode_to_client(EncryptionModeType::from_code(config.encryption_mode))
                    .to_string()
            } else {
                "none".to_string()
            };
            inner.encryption_secret = config.encryption_key;
        }
        self.apply_encryption().await
    }

    async fn apply_encryption(&self) -> Result<(), BridgeError> {
        let client = self.client()?;
        let (mode, secret) = {
            let inner = self.inner.borrow();
            (inner.encryption_mode.clone(), inner.encryption_secret.clone())
        };
        client.set_encryption_config(&mode, secret.as_deref()).await?;
        Ok(())
    }

    // === live streaming, inject, relay, reporting ===

    pub async fn add_publish_stream_url(
        &self,
        url: String,
        transcoding_enabled: bool,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.start_live_streaming(&url, transcoding_enabled).await?;
        Ok(())
    }

    pub async fn remove_publish_stream_url(&self, url: String) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.stop_live_streaming(&url).await?;
        Ok(())
    }

    pub async fn set_live_transcoding(&self, config: LiveTranscoding) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.set_live_transcoding(&config).await?;
        Ok(())
    }

    /// Applies to an active camera track; without one this is a silent no-op.
    pub async fn set_beauty_effect(
        &self,
        enabled: bool,
        options: BeautyOptions,
    ) -> Result<(), BridgeError> {
        if let Some(track) = self.devices.local_video() {
            track.set_beauty_effect(enabled, &options).await?;
        }
        Ok(())
    }

    pub async fn add_inject_stream_url(
        &self,
        url: String,
        config: InjectStreamConfig,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.add_injected_stream(&url, &config).await?;
        Ok(())
    }

    pub async fn remove_inject_stream_url(&self, url: String) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.remove_injected_stream(&url).await?;
        Ok(())
    }

    pub async fn start_channel_media_relay(
        &self,
        config: ChannelMediaRelayConfiguration,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.start_channel_media_relay(&config).await?;
        Ok(())
    }

    pub async fn update_channel_media_relay(
        &self,
        config: ChannelMediaRelayConfiguration,
    ) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.update_channel_media_relay(&config).await?;
        Ok(())
    }

    pub async fn stop_channel_media_relay(&self) -> Result<(), BridgeError> {
        let client = self.client()?;
        client.stop_channel_media_relay().await?;
        Ok(())
    }

    pub async fn send_custom_report(&self, report: CustomReportParams) -> Result<(), BridgeError> {
        let client = self.client()?;
        client
            .send_custom_report(
                &report.id,
                &report.category,
                &report.event,
                &report.label,
                report.value,
            )
            .await?;
        Ok(())
    }

    // === channel sessions ===

    pub(crate) fn channel_session(&self, channel_id: &str) -> Option<RtcEngine> {
        self.inner.borrow().channels.get(channel_id).cloned()
    }

    /// Creates an independently initialized session for the channel id,
    /// seeded from this session's flags and context. Idempotent: an existing
    /// entry is kept, never replaced.
    pub fn create_channel(&self, channel_id: String) -> Result<(), BridgeError> {
        if self.inner.borrow().channels.contains_key(&channel_id) {
            return Ok(());
        }
        let context = self
            .inner
            .borrow()
            .context
            .clone()
            .ok_or(BridgeError::NotInitialized)?;
        let session = RtcEngine::new(self.provider.clone());
        {
            let parent = self.inner.borrow();
            let mut child = session.inner.borrow_mut();
            child.config = parent.config;
            child.audio_enabled = parent.audio_enabled;
            child.video_enabled = parent.video_enabled;
            child.local_audio_enabled = parent.local_audio_enabled;
            child.local_video_enabled = parent.local_video_enabled;
            child.mute_local_audio = parent.mute_local_audio;
            child.mute_local_video = parent.mute_local_video;
            child.default_mute_remote_audio = parent.default_mute_remote_audio;
            child.default_mute_remote_video = parent.default_mute_remote_video;
            child.encryption_mode = parent.encryption_mode.clone();
            child.encryption_secret = parent.encryption_secret.clone();
            child.app_type = parent.app_type;
        }
        // Channel events flow through the registry-level handler with the
        // channel id merged into each payload.
        let handler_slot = self.inner.borrow().channel_handler.clone();
        let id_for_events = channel_id.clone();
        session.set_event_handler(Callback::from(move |(name, payload): (String, String)| {
            let merged = merge_channel_id(&payload, &id_for_events);
            let handler = handler_slot.borrow().clone();
            handler.emit((name, merged));
        }));
        session.initialize(context)?;
        self.inner.borrow_mut().channels.insert(channel_id, session);
        Ok(())
    }

    /// Removes and releases the channel session; an unknown id is a usage
    /// error, not a silent no-op.
    pub async fn release_channel(&self, channel_id: &str) -> Result<(), BridgeError> {
        let session = self
            .inner
            .borrow_mut()
            .channels
            .remove(channel_id)
            .ok_or(BridgeError::NotInitialized)?;
        session.release_session().await;
        Ok(())
    }

    pub(crate) fn channel_handler_slot(&self) -> Rc<RefCell<EventHandler>> {
        self.inner.borrow().channel_handler.clone()
    }
}
