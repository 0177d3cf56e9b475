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

//! Engine-surface dispatch.
//!
//! The registry is a fixed map from API id to a plain fn pointer, built once.
//! Handlers parse the already-decoded JSON value into their parameter struct
//! and call the session method; a missing or malformed field is a parameter
//! error, an unknown API id resolves to null without side effects.

use std::collections::HashMap;

use futures::future::LocalBoxFuture;
use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;

use rtcbridge_diagnostics::{trace_event, TraceKind};
use rtcbridge_types::api::ApiTypeEngine;
use rtcbridge_types::native::AudioProfileType;
use rtcbridge_types::params::{
    AppTypeParams, AudioProfileParams, BeautyEffectParams, ChannelProfileParams, CanvasParams,
    ClientRoleParams, CloudProxyParams, CustomReportParams, EnableEncryptionParams, EnabledParams,
    EncryptionModeParams, FallbackOptionParams, InitializeParams, InjectStreamParams,
    JoinChannelParams, JoinChannelWithUserAccountParams, LegacyScreenCaptureParams,
    LiveTranscodingParams, LogFilterParams, MuteParams, MuteRemoteParams, PublishStreamUrlParams,
    RelayParams, RemoteStreamTypeParams, RenewTokenParams, ScreenCaptureByDisplayParams,
    ScreenCaptureByRectParams, ScreenCaptureByWindowParams, ScreenCaptureParameters, SecretParams,
    SetParametersParams, DefaultStreamTypeParams, StreamUrlParams, UserVolumeParams,
    VideoEncoderConfigParams, VolumeIndicationParams, VolumeParams, Dimensions,
};
use rtcbridge_types::translate::audio_profile_to_preset;

use crate::error::BridgeError;
use crate::rtc::{JoinIdentity, ViewHandle};

use super::RtcEngine;

type EngineHandler =
    fn(RtcEngine, Value, Option<ViewHandle>) -> LocalBoxFuture<'static, Result<Value, BridgeError>>;

static ENGINE_TABLE: Lazy<HashMap<ApiTypeEngine, EngineHandler>> = Lazy::new(|| {
    use ApiTypeEngine as E;
    let mut table: HashMap<E, EngineHandler> = HashMap::new();
    table.insert(E::Initialize, |engine, params, _| {
        Box::pin(async move {
            let p: InitializeParams = serde_json::from_value(params)?;
            engine.initialize(p.context)?;
            Ok(Value::Null)
        })
    });
    table.insert(E::Release, |engine, _, _| {
        Box::pin(async move {
            engine.release().await;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetChannelProfile, |engine, params, _| {
        Box::pin(async move {
            let p: ChannelProfileParams = serde_json::from_value(params)?;
            engine.set_channel_profile(p.profile).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetClientRole, |engine, params, _| {
        Box::pin(async move {
            let p: ClientRoleParams = serde_json::from_value(params)?;
            engine.set_client_role(p.role, p.options).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::JoinChannel, |engine, params, _| {
        Box::pin(async move {
            let p: JoinChannelParams = serde_json::from_value(params)?;
            engine
                .join_channel(p.token, p.channel_id, JoinIdentity::Uid(p.uid))
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::JoinChannelWithUserAccount, |engine, params, _| {
        Box::pin(async move {
            let p: JoinChannelWithUserAccountParams = serde_json::from_value(params)?;
            engine
                .join_channel(p.token, p.channel_id, JoinIdentity::Account(p.user_account))
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::LeaveChannel, |engine, _, _| {
        Box::pin(async move {
            engine.leave_channel().await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::RenewToken, |engine, params, _| {
        Box::pin(async move {
            let p: RenewTokenParams = serde_json::from_value(params)?;
            engine.renew_token(p.token).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::EnableVideo, |engine, _, _| {
        Box::pin(async move {
            engine.set_video_enabled(true).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::DisableVideo, |engine, _, _| {
        Box::pin(async move {
            engine.set_video_enabled(false).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::EnableAudio, |engine, _, _| {
        Box::pin(async move {
            engine.set_audio_enabled(true).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::DisableAudio, |engine, _, _| {
        Box::pin(async move {
            engine.set_audio_enabled(false).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::EnableLocalAudio, |engine, params, _| {
        Box::pin(async move {
            let p: EnabledParams = serde_json::from_value(params)?;
            engine.set_local_audio_enabled(p.enabled).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::EnableLocalVideo, |engine, params, _| {
        Box::pin(async move {
            let p: EnabledParams = serde_json::from_value(params)?;
            engine.set_local_video_enabled(p.enabled).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::MuteLocalAudioStream, |engine, params, _| {
        Box::pin(async move {
            let p: MuteParams = serde_json::from_value(params)?;
            engine.set_mute_local_audio(p.mute).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::MuteLocalVideoStream, |engine, params, _| {
        Box::pin(async move {
            let p: MuteParams = serde_json::from_value(params)?;
            engine.set_mute_local_video(p.mute).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetDefaultMuteAllRemoteAudioStreams, |engine, params, _| {
        Box::pin(async move {
            let p: MuteParams = serde_json::from_value(params)?;
            engine.set_default_mute_remote_audio(p.mute);
            Ok(Value::Null)
        })
    });
    table.insert(E::SetDefaultMuteAllRemoteVideoStreams, |engine, params, _| {
        Box::pin(async move {
            let p: MuteParams = serde_json::from_value(params)?;
            engine.set_default_mute_remote_video(p.mute);
            Ok(Value::Null)
        })
    });
    table.insert(E::MuteAllRemoteAudioStreams, |engine, params, _| {
        Box::pin(async move {
            let p: MuteParams = serde_json::from_value(params)?;
            engine.mute_all_remote_audio_streams(p.mute).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::MuteAllRemoteVideoStreams, |engine, params, _| {
        Box::pin(async move {
            let p: MuteParams = serde_json::from_value(params)?;
            engine.mute_all_remote_video_streams(p.mute).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::MuteRemoteAudioStream, |engine, params, _| {
        Box::pin(async move {
            let p: MuteRemoteParams = serde_json::from_value(params)?;
            engine.mute_remote_audio_stream(p.user_id, p.mute).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::MuteRemoteVideoStream, |engine, params, _| {
        Box::pin(async move {
            let p: MuteRemoteParams = serde_json::from_value(params)?;
            engine.mute_remote_video_stream(p.user_id, p.mute).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::AdjustUserPlaybackSignalVolume, |engine, params, _| {
        Box::pin(async move {
            let p: UserVolumeParams = serde_json::from_value(params)?;
            engine.adjust_user_playback_volume(p.uid, p.volume);
            Ok(Value::Null)
        })
    });
    table.insert(E::AdjustRecordingSignalVolume, |engine, params, _| {
        Box::pin(async move {
            let p: VolumeParams = serde_json::from_value(params)?;
            engine.devices.set_recording_volume(p.volume);
            Ok(Value::Null)
        })
    });
    table.insert(E::AdjustPlaybackSignalVolume, |engine, params, _| {
        Box::pin(async move {
            let p: VolumeParams = serde_json::from_value(params)?;
            engine.devices.set_playback_volume(p.volume);
            Ok(Value::Null)
        })
    });
    table.insert(E::SetRemoteVideoStreamType, |engine, params, _| {
        Box::pin(async move {
            let p: RemoteStreamTypeParams = serde_json::from_value(params)?;
            engine
                .set_remote_video_stream_type(p.user_id, p.stream_type)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetRemoteDefaultVideoStreamType, |engine, params, _| {
        Box::pin(async move {
            let p: DefaultStreamTypeParams = serde_json::from_value(params)?;
            engine
                .set_remote_default_video_stream_type(p.stream_type)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetRemoteSubscribeFallbackOption, |engine, params, _| {
        Box::pin(async move {
            let p: FallbackOptionParams = serde_json::from_value(params)?;
            engine.set_remote_subscribe_fallback_option(p.option).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::EnableAudioVolumeIndication, |engine, params, _| {
        Box::pin(async move {
            let _: VolumeIndicationParams = serde_json::from_value(params)?;
            engine.enable_audio_volume_indication()?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetAudioProfile, |engine, params, _| {
        Box::pin(async move {
            let p: AudioProfileParams = serde_json::from_value(params)?;
            engine
                .devices
                .set_audio_preset(audio_profile_to_preset(AudioProfileType::from_code(p.profile)));
            Ok(Value::Null)
        })
    });
    table.insert(E::SetVideoEncoderConfiguration, |engine, params, _| {
        Box::pin(async move {
            let p: VideoEncoderConfigParams = serde_json::from_value(params)?;
            engine.devices.set_encoder_config(p.config).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetupLocalVideo, |engine, params, view| {
        Box::pin(async move {
            let p: CanvasParams = serde_json::from_value(params)?;
            engine.setup_local_video(p.canvas, view);
            Ok(Value::Null)
        })
    });
    table.insert(E::SetupRemoteVideo, |engine, params, view| {
        Box::pin(async move {
            let p: CanvasParams = serde_json::from_value(params)?;
            engine.setup_remote_video(p.canvas, view)?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StartPreview, |engine, _, _| {
        Box::pin(async move {
            engine.start_preview().await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StopPreview, |engine, _, _| {
        Box::pin(async move {
            engine.stop_preview();
            Ok(Value::Null)
        })
    });
    table.insert(E::SetLogFilter, |engine, params, _| {
        Box::pin(async move {
            let p: LogFilterParams = serde_json::from_value(params)?;
            engine.set_log_filter(p.filter);
            Ok(Value::Null)
        })
    });
    table.insert(E::UploadLogFile, |engine, _, _| {
        Box::pin(async move { Ok(Value::String(engine.upload_log_file())) })
    });
    table.insert(E::EnableDualStreamMode, |engine, params, _| {
        Box::pin(async move {
            let p: EnabledParams = serde_json::from_value(params)?;
            engine.enable_dual_stream_mode(p.enabled).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StartScreenCaptureByDisplayId, |engine, params, _| {
        Box::pin(async move {
            let p: ScreenCaptureByDisplayParams = serde_json::from_value(params)?;
            engine
                .start_screen_capture(p.capture_params.unwrap_or_default())
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StartScreenCaptureByScreenRect, |engine, params, _| {
        Box::pin(async move {
            let p: ScreenCaptureByRectParams = serde_json::from_value(params)?;
            engine
                .start_screen_capture(p.capture_params.unwrap_or_default())
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StartScreenCaptureByWindowId, |engine, params, _| {
        Box::pin(async move {
            let p: ScreenCaptureByWindowParams = serde_json::from_value(params)?;
            engine
                .start_screen_capture(p.capture_params.unwrap_or_default())
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StartScreenCapture, |engine, params, _| {
        Box::pin(async move {
            let p: LegacyScreenCaptureParams = serde_json::from_value(params)?;
            let dimensions = p.rect.map(|rect| Dimensions {
                width: rect
                    .right
                    .zip(rect.left)
                    .map(|(right, left)| (right - left).max(0) as u32),
                height: rect
                    .bottom
                    .zip(rect.top)
                    .map(|(bottom, top)| (bottom - top).max(0) as u32),
            });
            engine
                .start_screen_capture(ScreenCaptureParameters {
                    dimensions,
                    frame_rate: p.capture_freq,
                    bitrate: p.bitrate,
                })
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StopScreenCapture, |engine, _, _| {
        Box::pin(async move {
            engine.stop_screen_capture().await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::GetVersion, |engine, _, _| {
        Box::pin(async move { Ok(Value::String(engine.get_version())) })
    });
    table.insert(E::SetEncryptionSecret, |engine, params, _| {
        Box::pin(async move {
            let p: SecretParams = serde_json::from_value(params)?;
            engine.set_encryption_secret(p.secret).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetEncryptionMode, |engine, params, _| {
        Box::pin(async move {
            let p: EncryptionModeParams = serde_json::from_value(params)?;
            engine.set_encryption_mode(p.encryption_mode).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::EnableEncryption, |engine, params, _| {
        Box::pin(async move {
            let p: EnableEncryptionParams = serde_json::from_value(params)?;
            engine.enable_encryption(p.enabled, p.config).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::AddPublishStreamUrl, |engine, params, _| {
        Box::pin(async move {
            let p: PublishStreamUrlParams = serde_json::from_value(params)?;
            engine
                .add_publish_stream_url(p.url, p.transcoding_enabled)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::RemovePublishStreamUrl, |engine, params, _| {
        Box::pin(async move {
            let p: StreamUrlParams = serde_json::from_value(params)?;
            engine.remove_publish_stream_url(p.url).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetLiveTranscoding, |engine, params, _| {
        Box::pin(async move {
            let p: LiveTranscodingParams = serde_json::from_value(params)?;
            engine.set_live_transcoding(p.transcoding).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SetBeautyEffectOptions, |engine, params, _| {
        Box::pin(async move {
            let p: BeautyEffectParams = serde_json::from_value(params)?;
            engine.set_beauty_effect(p.enabled, p.options).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::AddInjectStreamUrl, |engine, params, _| {
        Box::pin(async move {
            let p: InjectStreamParams = serde_json::from_value(params)?;
            engine.add_inject_stream_url(p.url, p.config).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::RemoveInjectStreamUrl, |engine, params, _| {
        Box::pin(async move {
            let p: StreamUrlParams = serde_json::from_value(params)?;
            engine.remove_inject_stream_url(p.url).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StartChannelMediaRelay, |engine, params, _| {
        Box::pin(async move {
            let p: RelayParams = serde_json::from_value(params)?;
            engine.start_channel_media_relay(p.configuration).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::UpdateChannelMediaRelay, |engine, params, _| {
        Box::pin(async move {
            let p: RelayParams = serde_json::from_value(params)?;
            engine.update_channel_media_relay(p.configuration).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::StopChannelMediaRelay, |engine, _, _| {
        Box::pin(async move {
            engine.stop_channel_media_relay().await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::SendCustomReportMessage, |engine, params, _| {
        Box::pin(async move {
            let p: CustomReportParams = serde_json::from_value(params)?;
            engine.send_custom_report(p).await?;
            Ok(Value::Null)
        })
    });
    table.insert(E::GetConnectionState, |engine, _, _| {
        Box::pin(async move { Ok(Value::from(engine.get_connection_state())) })
    });
    table.insert(E::SetParameters, |engine, params, _| {
        Box::pin(async move {
            let p: SetParametersParams = serde_json::from_value(params)?;
            engine.set_parameters(&p.parameters);
            Ok(Value::Null)
        })
    });
    table.insert(E::SetAppType, |engine, params, _| {
        Box::pin(async move {
            let p: AppTypeParams = serde_json::from_value(params)?;
            engine.set_app_type(p.app_type);
            Ok(Value::Null)
        })
    });
    table.insert(E::SetCloudProxy, |engine, params, _| {
        Box::pin(async move {
            let p: CloudProxyParams = serde_json::from_value(params)?;
            engine.set_cloud_proxy(p.proxy_type)?;
            Ok(Value::Null)
        })
    });
    table
});

impl RtcEngine {
    /// Engine-surface entry point: `(apiId, jsonParams, optional view)`.
    /// Unknown ids resolve to null as a forward-compatible no-op.
    pub async fn call_api(
        &self,
        api_id: u32,
        params: &str,
        view: Option<ViewHandle>,
    ) -> Result<Value, BridgeError> {
        let api = match ApiTypeEngine::from_id(api_id) {
            Some(api) => api,
            None => {
                warn!("unknown engine api id {api_id}, ignoring");
                return Ok(Value::Null);
            }
        };
        trace_event!(
            "engine",
            TraceKind::ApiCall,
            format!("{api:?}"),
            Some(params.to_string())
        );
        let parsed: Value = serde_json::from_str(params)?;
        match ENGINE_TABLE.get(&api) {
            Some(handler) => handler(self.clone(), parsed, view).await,
            None => Ok(Value::Null),
        }
    }
}
