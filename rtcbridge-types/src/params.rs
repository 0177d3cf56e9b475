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

//! Parameter object shapes for every dispatch surface.
//!
//! Parameters arrive as JSON strings; these structs define the expected field
//! names. There is no schema validation layer beyond deserialization itself: a
//! missing required field fails the call with a parameter error, unknown
//! fields are ignored. Enum-valued fields stay raw integers here and cross
//! into typed enums through the translators.

use serde::Deserialize;

/// App credentials, region selection and log verbosity recorded at
/// `initialize`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineContext {
    pub app_id: String,
    #[serde(default)]
    pub area_code: Option<Vec<i64>>,
    #[serde(default)]
    pub log_config: Option<LogConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_size_in_kb: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    pub context: EngineContext,
}

#[derive(Debug, Deserialize)]
pub struct ChannelProfileParams {
    pub profile: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRoleParams {
    pub role: i64,
    #[serde(default)]
    pub options: Option<ClientRoleOptions>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRoleOptions {
    #[serde(default)]
    pub audience_latency_level: Option<i64>,
}

/// Subscription defaults the caller may attach to a join; forwarded verbatim.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMediaOptions {
    #[serde(default)]
    pub auto_subscribe_audio: Option<bool>,
    #[serde(default)]
    pub auto_subscribe_video: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinChannelParams {
    #[serde(default)]
    pub token: Option<String>,
    pub channel_id: String,
    #[serde(default)]
    pub info: Option<String>,
    pub uid: u64,
    #[serde(default)]
    pub options: Option<ChannelMediaOptions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinChannelWithUserAccountParams {
    #[serde(default)]
    pub token: Option<String>,
    pub channel_id: String,
    pub user_account: String,
    #[serde(default)]
    pub options: Option<ChannelMediaOptions>,
}

#[derive(Debug, Deserialize)]
pub struct RenewTokenParams {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct EnabledParams {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct MuteParams {
    pub mute: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEncoderConfiguration {
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub frame_rate: Option<u32>,
    #[serde(default)]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub min_bitrate: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VideoEncoderConfigParams {
    pub config: VideoEncoderConfiguration,
}

/// Wire shape of a surface descriptor. The rendering target itself is not
/// serializable and travels out-of-band as the facade's `extra` argument.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCanvasDesc {
    #[serde(default)]
    pub uid: u64,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub render_mode: Option<i64>,
    #[serde(default)]
    pub mirror_mode: Option<i64>,
}

/// An absent canvas clears the binding for the target identity.
#[derive(Debug, Deserialize)]
pub struct CanvasParams {
    #[serde(default)]
    pub canvas: Option<VideoCanvasDesc>,
}

#[derive(Debug, Deserialize)]
pub struct AudioProfileParams {
    pub profile: i64,
    #[serde(default)]
    pub scenario: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserVolumeParams {
    pub uid: u64,
    pub volume: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteRemoteParams {
    pub user_id: u64,
    pub mute: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStreamTypeParams {
    pub user_id: u64,
    pub stream_type: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultStreamTypeParams {
    pub stream_type: i64,
}

#[derive(Debug, Deserialize)]
pub struct VolumeIndicationParams {
    pub interval: i64,
    pub smooth: i64,
    #[serde(default)]
    pub report_vad: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LogFilterParams {
    pub filter: i64,
}

#[derive(Debug, Deserialize)]
pub struct VolumeParams {
    pub volume: u32,
}

#[derive(Debug, Deserialize)]
pub struct FallbackOptionParams {
    pub option: i64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenCaptureParameters {
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub frame_rate: Option<u32>,
    #[serde(default)]
    pub bitrate: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Rectangle {
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub left: Option<i64>,
    #[serde(default)]
    pub top: Option<i64>,
    #[serde(default)]
    pub right: Option<i64>,
    #[serde(default)]
    pub bottom: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenCaptureByDisplayParams {
    #[serde(default)]
    pub display_id: Option<i64>,
    #[serde(default)]
    pub region_rect: Option<Rectangle>,
    #[serde(default)]
    pub capture_params: Option<ScreenCaptureParameters>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenCaptureByRectParams {
    #[serde(default)]
    pub screen_rect: Option<Rectangle>,
    #[serde(default)]
    pub region_rect: Option<Rectangle>,
    #[serde(default)]
    pub capture_params: Option<ScreenCaptureParameters>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenCaptureByWindowParams {
    #[serde(default)]
    pub window_id: Option<i64>,
    #[serde(default)]
    pub region_rect: Option<Rectangle>,
    #[serde(default)]
    pub capture_params: Option<ScreenCaptureParameters>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyScreenCaptureParams {
    #[serde(default)]
    pub window_id: Option<i64>,
    #[serde(default)]
    pub capture_freq: Option<u32>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub bitrate: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SecretParams {
    pub secret: String,
}

/// The mode arrives in the client's own string vocabulary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionModeParams {
    pub encryption_mode: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfig {
    pub encryption_mode: i64,
    #[serde(default)]
    pub encryption_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnableEncryptionParams {
    pub enabled: bool,
    pub config: EncryptionConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStreamUrlParams {
    pub url: String,
    pub transcoding_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct StreamUrlParams {
    pub url: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveTranscoding {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub video_bitrate: Option<u32>,
    #[serde(default)]
    pub video_framerate: Option<u32>,
    #[serde(default)]
    pub low_latency: Option<bool>,
    #[serde(default)]
    pub video_gop: Option<u32>,
    #[serde(default)]
    pub video_codec_profile: Option<i64>,
    #[serde(default)]
    pub background_color: Option<u32>,
    #[serde(default)]
    pub audio_sample_rate: Option<u32>,
    #[serde(default)]
    pub audio_bitrate: Option<u32>,
    #[serde(default)]
    pub audio_channels: Option<u32>,
    #[serde(default)]
    pub watermark: Option<serde_json::Value>,
    #[serde(default)]
    pub background_image: Option<serde_json::Value>,
    #[serde(default)]
    pub transcoding_users: Option<serde_json::Value>,
    #[serde(default)]
    pub transcoding_extra_info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LiveTranscodingParams {
    pub transcoding: LiveTranscoding,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeautyOptions {
    #[serde(default)]
    pub lightening_contrast_level: Option<i64>,
    #[serde(default)]
    pub lightening_level: Option<f64>,
    #[serde(default)]
    pub smoothness_level: Option<f64>,
    #[serde(default)]
    pub redness_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BeautyEffectParams {
    pub enabled: bool,
    pub options: BeautyOptions,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectStreamConfig {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub video_gop: Option<u32>,
    #[serde(default)]
    pub video_framerate: Option<u32>,
    #[serde(default)]
    pub video_bitrate: Option<u32>,
    #[serde(default)]
    pub audio_sample_rate: Option<u32>,
    #[serde(default)]
    pub audio_bitrate: Option<u32>,
    #[serde(default)]
    pub audio_channels: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct InjectStreamParams {
    pub url: String,
    pub config: InjectStreamConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayChannelInfo {
    pub channel_name: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub uid: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMediaRelayConfiguration {
    pub src_info: RelayChannelInfo,
    pub dest_infos: Vec<RelayChannelInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RelayParams {
    pub configuration: ChannelMediaRelayConfiguration,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CustomReportParams {
    pub id: String,
    pub category: String,
    pub event: String,
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetParametersParams {
    pub parameters: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTypeParams {
    pub app_type: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProxyParams {
    pub proxy_type: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdParams {
    pub device_id: String,
}

/// Wraps a per-channel parameter object: the channel identifier routes the
/// call, the remaining fields keep their engine-surface shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelScoped<T> {
    pub channel_id: String,
    #[serde(flatten)]
    pub inner: T,
}

/// For channel operations whose only parameter is the channel id.
#[derive(Debug, Default, Deserialize)]
pub struct NoArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_params_parse_from_wire_shape() {
        let p: JoinChannelParams = serde_json::from_str(
            r#"{"token":null,"channelId":"room1","uid":42,"options":{"autoSubscribeAudio":true}}"#,
        )
        .unwrap();
        assert_eq!(p.channel_id, "room1");
        assert_eq!(p.uid, 42);
        assert_eq!(p.options.unwrap().auto_subscribe_audio, Some(true));
    }

    #[test]
    fn channel_scoped_flattens() {
        let p: ChannelScoped<MuteParams> =
            serde_json::from_str(r#"{"channelId":"a","mute":true}"#).unwrap();
        assert_eq!(p.channel_id, "a");
        assert!(p.inner.mute);
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let r: Result<JoinChannelParams, _> = serde_json::from_str(r#"{"uid":42}"#);
        assert!(r.is_err());
    }

    #[test]
    fn canvas_params_tolerate_absent_descriptor() {
        let p: CanvasParams = serde_json::from_str(r#"{}"#).unwrap();
        assert!(p.canvas.is_none());
        let p: CanvasParams =
            serde_json::from_str(r#"{"canvas":{"uid":7,"renderMode":2}}"#).unwrap();
        let canvas = p.canvas.unwrap();
        assert_eq!(canvas.uid, 7);
        assert_eq!(canvas.render_mode, Some(2));
        assert_eq!(canvas.mirror_mode, None);
    }
}
