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

//! Listener bridge: underlying client events in, normalized events out.
//!
//! The listener holds only a weak session handle so a dropped session cannot
//! be kept alive by its own client callbacks. Failures while reacting to an
//! event (a subscribe that the client rejects, say) have no caller to
//! propagate to; they are logged and the event is otherwise dropped.

use std::rc::Rc;

use log::warn;

use rtcbridge_types::client::{MediaKind, UserInfoUpdate};
use rtcbridge_types::events::{
    names, AudioVolumeIndicationPayload, AudioVolumeInfo, ChannelMediaRelayEventPayload,
    ChannelMediaRelayStateChangedPayload, ConnectionStateChangedPayload, ErrorPayload,
    LocalAudioStateChangedPayload, LocalVideoStateChangedPayload, NetworkQualityPayload,
    RemoteAudioStateChangedPayload, RemoteSubscribeFallbackPayload,
    RemoteVideoStateChangedPayload, RtmpStreamingEventPayload,
    RtmpStreamingStateChangedPayload, StreamInjectedStatusPayload, UserJoinedPayload,
    UserOfflinePayload,
};
use rtcbridge_types::native::{
    LocalAudioStreamError, LocalAudioStreamState, LocalVideoStreamError, LocalVideoStreamState,
    RemoteAudioState, RemoteAudioStateReason, RemoteVideoState, RemoteVideoStateReason,
    RtmpStreamPublishState, RtmpStreamingEvent,
};
use rtcbridge_types::translate::{
    connection_state_to_native, disconnect_reason_to_native, inject_status_to_native,
    is_known_error_code, network_quality_to_native, relay_error_to_native, relay_event_to_native,
    relay_state_to_native, rtmp_error_to_native, user_left_reason_to_native,
    volume_level_to_native,
};

use crate::rtc::{ClientEvent, LocalAudioTrack, LocalVideoTrack, RtcClient};

use super::RtcEngine;

/// Installs the event listener on a freshly created client.
pub(crate) fn attach(engine: &RtcEngine, client: &dyn RtcClient) {
    let weak = engine.downgrade();
    client.set_event_listener(Rc::new(move |event| {
        let weak = weak.clone();
        Box::pin(async move {
            if let Some(engine) = weak.upgrade() {
                engine.handle_client_event(event).await;
            }
        })
    }));
}

/// A dying local audio track reports as a local stream failure.
pub(crate) fn hook_audio_ended(engine: &RtcEngine, track: &dyn LocalAudioTrack) {
    let weak = engine.downgrade();
    track.on_track_ended(Rc::new(move || {
        if let Some(engine) = weak.upgrade() {
            engine.emit_json(
                names::LOCAL_AUDIO_STATE_CHANGED,
                &LocalAudioStateChangedPayload {
                    state: LocalAudioStreamState::Failed.code(),
                    error: LocalAudioStreamError::RecordFailure.code(),
                },
            );
        }
    }));
}

pub(crate) fn hook_video_ended(engine: &RtcEngine, track: &dyn LocalVideoTrack) {
    let weak = engine.downgrade();
    track.on_track_ended(Rc::new(move || {
        if let Some(engine) = weak.upgrade() {
            engine.emit_json(
                names::LOCAL_VIDEO_STATE_CHANGED,
                &LocalVideoStateChangedPayload {
                    local_video_state: LocalVideoStreamState::Failed.code(),
                    error: LocalVideoStreamError::CaptureFailure.code(),
                },
            );
        }
    }));
}

impl RtcEngine {
    pub(crate) async fn handle_client_event(&self, event: ClientEvent) {
        match event {
            ClientEvent::ConnectionStateChanged { current, reason } => {
                self.emit_json(
                    names::CONNECTION_STATE_CHANGED,
                    &ConnectionStateChangedPayload {
                        state: connection_state_to_native(current).code(),
                        reason: disconnect_reason_to_native(reason).code(),
                    },
                );
            }
            ClientEvent::UserJoined { uid } => {
                self.emit_json(names::USER_JOINED, &UserJoinedPayload { uid, elapsed: 0 });
            }
            ClientEvent::UserLeft { uid, reason } => {
                if let Some(track) = self.devices.remove_remote_audio(uid) {
                    track.stop();
                }
                if let Some(track) = self.devices.remove_remote_video(uid) {
                    track.stop();
                }
                self.emit_json(
                    names::USER_OFFLINE,
                    &UserOfflinePayload {
                        uid,
                        reason: user_left_reason_to_native(reason).code(),
                    },
                );
            }
            ClientEvent::UserPublished { uid, kind } => {
                self.on_user_published(uid, kind).await;
            }
            ClientEvent::UserUnpublished { uid, kind } => {
                self.on_user_unpublished(uid, kind);
            }
            ClientEvent::UserInfoUpdated { uid, update } => {
                self.on_user_info_updated(uid, update);
            }
            ClientEvent::StreamFallback { uid, to_audio_only } => {
                self.emit_json(
                    names::REMOTE_SUBSCRIBE_FALLBACK_TO_AUDIO_ONLY,
                    &RemoteSubscribeFallbackPayload {
                        uid,
                        is_fallback_or_recover: to_audio_only,
                    },
                );
            }
            ClientEvent::VolumeIndicator { volumes } => {
                self.on_volume_indicator(volumes);
            }
            ClientEvent::NetworkQuality { uplink, downlink } => {
                self.on_network_quality(uplink, downlink);
            }
            ClientEvent::LiveStreamingError { url, code } => {
                self.emit_json(
                    names::RTMP_STREAMING_STATE_CHANGED,
                    &RtmpStreamingStateChangedPayload {
                        url,
                        state: RtmpStreamPublishState::Failure.code(),
                        err_code: rtmp_error_to_native(&code).code(),
                    },
                );
            }
            ClientEvent::LiveStreamingWarning { url, code } => {
                // Only the image-load warning has a native-event counterpart.
                if code == "LIVE_STREAMING_WARN_IMAGE_LOAD_FAIL" {
                    self.emit_json(
                        names::RTMP_STREAMING_EVENT,
                        &RtmpStreamingEventPayload {
                            url,
                            event_code: RtmpStreamingEvent::FailedLoadImage.code(),
                        },
                    );
                }
            }
            ClientEvent::StreamInjectStatus { status, uid, url } => {
                self.emit_json(
                    names::STREAM_INJECTED_STATUS,
                    &StreamInjectedStatusPayload {
                        url,
                        uid,
                        status: inject_status_to_native(status).code(),
                    },
                );
            }
            ClientEvent::MediaRelayStateChanged { state, code } => {
                self.emit_json(
                    names::CHANNEL_MEDIA_RELAY_STATE_CHANGED,
                    &ChannelMediaRelayStateChangedPayload {
                        state: relay_state_to_native(state).code(),
                        code: relay_error_to_native(code).code(),
                    },
                );
            }
            ClientEvent::MediaRelayEvent { event } => {
                self.emit_json(
                    names::CHANNEL_MEDIA_RELAY_EVENT,
                    &ChannelMediaRelayEventPayload {
                        code: relay_event_to_native(event).code(),
                    },
                );
            }
            ClientEvent::TokenPrivilegeWillExpire => {
                self.emit_event(names::TOKEN_PRIVILEGE_WILL_EXPIRE, "{}".to_string());
            }
            ClientEvent::Exception { code, msg, uid: _ } => {
                if is_known_error_code(code) {
                    self.emit_json(
                        names::ERROR,
                        &ErrorPayload {
                            err: code as i32,
                            msg,
                        },
                    );
                }
            }
        }
    }

    /// Auto-subscribe gate: the media kind must be globally enabled and not
    /// covered by the default-mute policy. A gated publication emits nothing.
    async fn on_user_published(&self, uid: u64, kind: MediaKind) {
        let (enabled, default_mute) = {
            let inner = self.inner.borrow();
            match kind {
                MediaKind::Audio => (inner.audio_enabled, inner.default_mute_remote_audio),
                MediaKind::Video => (inner.video_enabled, inner.default_mute_remote_video),
            }
        };
        if !enabled || default_mute {
            return;
        }
        let subscribed = match kind {
            MediaKind::Audio => self.set_remote_audio_muted(uid, false).await,
            MediaKind::Video => self.set_remote_video_muted(uid, false).await,
        };
        if let Err(err) = subscribed {
            warn!("auto-subscribe of {} for {uid} failed: {err}", kind.as_str());
            return;
        }
        match kind {
            MediaKind::Audio => self.emit_json(
                names::REMOTE_AUDIO_STATE_CHANGED,
                &RemoteAudioStateChangedPayload {
                    uid,
                    state: RemoteAudioState::Decoding.code(),
                    reason: RemoteAudioStateReason::RemoteUnmuted.code(),
                    elapsed: 0,
                },
            ),
            MediaKind::Video => self.emit_json(
                names::REMOTE_VIDEO_STATE_CHANGED,
                &RemoteVideoStateChangedPayload {
                    uid,
                    state: RemoteVideoState::Decoding.code(),
                    reason: RemoteVideoStateReason::RemoteUnmuted.code(),
                    elapsed: 0,
                },
            ),
        }
    }

    /// The remote side withdrew the stream; the tracked entry goes away
    /// without waiting for an explicit unsubscribe.
    fn on_user_unpublished(&self, uid: u64, kind: MediaKind) {
        match kind {
            MediaKind::Audio => {
                if let Some(track) = self.devices.remove_remote_audio(uid) {
                    track.stop();
                }
                self.emit_json(
                    names::REMOTE_AUDIO_STATE_CHANGED,
                    &RemoteAudioStateChangedPayload {
                        uid,
                        state: RemoteAudioState::Stopped.code(),
                        reason: RemoteAudioStateReason::RemoteMuted.code(),
                        elapsed: 0,
                    },
                );
            }
            MediaKind::Video => {
                if let Some(track) = self.devices.remove_remote_video(uid) {
                    track.stop();
                }
                self.emit_json(
                    names::REMOTE_VIDEO_STATE_CHANGED,
                    &RemoteVideoStateChangedPayload {
                        uid,
                        state: RemoteVideoState::Stopped.code(),
                        reason: RemoteVideoStateReason::RemoteMuted.code(),
                        elapsed: 0,
                    },
                );
            }
        }
    }

    fn on_user_info_updated(&self, uid: u64, update: UserInfoUpdate) {
        let audio = |state: RemoteAudioState, reason: RemoteAudioStateReason| {
            self.emit_json(
                names::REMOTE_AUDIO_STATE_CHANGED,
                &RemoteAudioStateChangedPayload {
                    uid,
                    state: state.code(),
                    reason: reason.code(),
                    elapsed: 0,
                },
            )
        };
        let video = |state: RemoteVideoState, reason: RemoteVideoStateReason| {
            self.emit_json(
                names::REMOTE_VIDEO_STATE_CHANGED,
                &RemoteVideoStateChangedPayload {
                    uid,
                    state: state.code(),
                    reason: reason.code(),
                    elapsed: 0,
                },
            )
        };
        match update {
            UserInfoUpdate::MuteAudio => {
                audio(RemoteAudioState::Stopped, RemoteAudioStateReason::RemoteMuted)
            }
            UserInfoUpdate::UnmuteAudio => {
                audio(RemoteAudioState::Decoding, RemoteAudioStateReason::RemoteUnmuted)
            }
            UserInfoUpdate::MuteVideo | UserInfoUpdate::DisableLocalVideo => {
                video(RemoteVideoState::Stopped, RemoteVideoStateReason::RemoteMuted)
            }
            UserInfoUpdate::UnmuteVideo | UserInfoUpdate::EnableLocalVideo => {
                video(RemoteVideoState::Decoding, RemoteVideoStateReason::RemoteUnmuted)
            }
        }
    }

    /// Speaker levels arrive on the client's 0..=100 scale and leave on the
    /// native 0..=255 scale.
    fn on_volume_indicator(&self, volumes: Vec<(u64, u8)>) {
        let channel = self
            .inner
            .borrow()
            .client
            .clone()
            .and_then(|client| client.channel_name())
            .unwrap_or_default();
        let speakers: Vec<AudioVolumeInfo> = volumes
            .into_iter()
            .map(|(uid, level)| AudioVolumeInfo {
                uid,
                volume: volume_level_to_native(level as f64) as u32,
                vad: 0,
                channel_id: channel.clone(),
            })
            .collect();
        let total = speakers
            .iter()
            .map(|speaker| speaker.volume)
            .sum::<u32>()
            .min(255);
        self.emit_json(
            names::AUDIO_VOLUME_INDICATION,
            &AudioVolumeIndicationPayload {
                speaker_number: speakers.len(),
                total_volume: total,
                speakers,
            },
        );
    }

    /// Re-emits the own-link report as uid 0 plus one report per remote.
    fn on_network_quality(&self, uplink: u8, downlink: u8) {
        self.emit_json(
            names::NETWORK_QUALITY,
            &NetworkQualityPayload {
                uid: 0,
                tx_quality: network_quality_to_native(uplink).code(),
                rx_quality: network_quality_to_native(downlink).code(),
            },
        );
        let remotes = match self.inner.borrow().client.clone() {
            Some(client) => client.remote_network_quality(),
            None => return,
        };
        for (uid, quality) in remotes {
            self.emit_json(
                names::NETWORK_QUALITY,
                &NetworkQualityPayload {
                    uid,
                    tx_quality: network_quality_to_native(quality.uplink).code(),
                    rx_quality: network_quality_to_native(quality.downlink).code(),
                },
            );
        }
    }
}
