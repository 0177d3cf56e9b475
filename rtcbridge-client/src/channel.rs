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

//! Per-channel dispatch surface.
//!
//! The registry is a facade over the default session's channel map: every
//! parameter object carries a `channelId`, resolved to an independently
//! initialized session. A lookup miss is a usage error ("please create
//! first"), not a silent no-op. Channel events reach the registry-level
//! handler with the channel id merged into each payload.

use std::collections::HashMap;

use futures::future::LocalBoxFuture;
use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;

use rtcbridge_diagnostics::{trace_event, TraceKind};
use rtcbridge_types::api::ApiTypeChannel;
use rtcbridge_types::params::{
    ChannelScoped, ClientRoleParams, EnableEncryptionParams, EncryptionModeParams,
    InjectStreamParams, JoinChannelParams, JoinChannelWithUserAccountParams, LiveTranscodingParams,
    MuteParams, MuteRemoteParams, NoArgs, PublishStreamUrlParams, RelayParams,
    RemoteStreamTypeParams, RenewTokenParams, SecretParams, DefaultStreamTypeParams,
    StreamUrlParams, UserVolumeParams,
};
use rtcbridge_types::EventHandler;

use crate::engine::RtcEngine;
use crate::error::BridgeError;
use crate::rtc::{JoinIdentity, ViewHandle};

/// Inserts the channel id into a JSON object payload; non-object payloads
/// pass through unchanged.
pub(crate) fn merge_channel_id(payload: &str, channel_id: &str) -> String {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(mut map)) => {
            map.insert(
                "channelId".to_string(),
                Value::String(channel_id.to_string()),
            );
            Value::Object(map).to_string()
        }
        _ => payload.to_string(),
    }
}

/// Facade over the default session's channel sessions.
#[derive(Clone)]
pub struct ChannelRegistry {
    parent: RtcEngine,
}

type ChannelHandler = fn(
    ChannelRegistry,
    Value,
    Option<ViewHandle>,
) -> LocalBoxFuture<'static, Result<Value, BridgeError>>;

static CHANNEL_TABLE: Lazy<HashMap<ApiTypeChannel, ChannelHandler>> = Lazy::new(|| {
    use ApiTypeChannel as C;
    let mut table: HashMap<C, ChannelHandler> = HashMap::new();
    table.insert(C::CreateChannel, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            registry.parent.create_channel(p.channel_id)?;
            Ok(Value::Null)
        })
    });
    table.insert(C::Release, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            registry.parent.release_channel(&p.channel_id).await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::JoinChannel, |registry, params, _| {
        Box::pin(async move {
            let p: JoinChannelParams = serde_json::from_value(params)?;
            let session = registry.session(&p.channel_id)?;
            session
                .join_channel(p.token, p.channel_id, JoinIdentity::Uid(p.uid))
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::JoinChannelWithUserAccount, |registry, params, _| {
        Box::pin(async move {
            let p: JoinChannelWithUserAccountParams = serde_json::from_value(params)?;
            let session = registry.session(&p.channel_id)?;
            session
                .join_channel(p.token, p.channel_id, JoinIdentity::Account(p.user_account))
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::LeaveChannel, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            registry.session(&p.channel_id)?.leave_channel().await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::Publish, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .publish_local_tracks()
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::Unpublish, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .unpublish_local_tracks()
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::ChannelId, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            registry.session(&p.channel_id)?;
            Ok(Value::String(p.channel_id))
        })
    });
    table.insert(C::RenewToken, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<RenewTokenParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .renew_token(p.inner.token)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::SetEncryptionSecret, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<SecretParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_encryption_secret(p.inner.secret)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::SetEncryptionMode, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<EncryptionModeParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_encryption_mode(p.inner.encryption_mode)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::EnableEncryption, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<EnableEncryptionParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .enable_encryption(p.inner.enabled, p.inner.config)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::SetClientRole, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<ClientRoleParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_client_role(p.inner.role, p.inner.options)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(
        C::SetDefaultMuteAllRemoteAudioStreams,
        |registry, params, _| {
            Box::pin(async move {
                let p: ChannelScoped<MuteParams> = serde_json::from_value(params)?;
                registry
                    .session(&p.channel_id)?
                    .set_default_mute_remote_audio(p.inner.mute);
                Ok(Value::Null)
            })
        },
    );
    table.insert(
        C::SetDefaultMuteAllRemoteVideoStreams,
        |registry, params, _| {
            Box::pin(async move {
                let p: ChannelScoped<MuteParams> = serde_json::from_value(params)?;
                registry
                    .session(&p.channel_id)?
                    .set_default_mute_remote_video(p.inner.mute);
                Ok(Value::Null)
            })
        },
    );
    table.insert(C::MuteLocalAudioStream, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<MuteParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_mute_local_audio(p.inner.mute)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::MuteLocalVideoStream, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<MuteParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_mute_local_video(p.inner.mute)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::MuteAllRemoteAudioStreams, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<MuteParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .mute_all_remote_audio_streams(p.inner.mute)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::MuteAllRemoteVideoStreams, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<MuteParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .mute_all_remote_video_streams(p.inner.mute)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::AdjustUserPlaybackSignalVolume, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<UserVolumeParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .adjust_user_playback_volume(p.inner.uid, p.inner.volume);
            Ok(Value::Null)
        })
    });
    table.insert(C::MuteRemoteAudioStream, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<MuteRemoteParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .mute_remote_audio_stream(p.inner.user_id, p.inner.mute)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::MuteRemoteVideoStream, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<MuteRemoteParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .mute_remote_video_stream(p.inner.user_id, p.inner.mute)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::SetRemoteVideoStreamType, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<RemoteStreamTypeParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_remote_video_stream_type(p.inner.user_id, p.inner.stream_type)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::SetRemoteDefaultVideoStreamType, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<DefaultStreamTypeParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_remote_default_video_stream_type(p.inner.stream_type)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::AddPublishStreamUrl, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<PublishStreamUrlParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .add_publish_stream_url(p.inner.url, p.inner.transcoding_enabled)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::RemovePublishStreamUrl, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<StreamUrlParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .remove_publish_stream_url(p.inner.url)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::SetLiveTranscoding, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<LiveTranscodingParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .set_live_transcoding(p.inner.transcoding)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::AddInjectStreamUrl, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<InjectStreamParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .add_inject_stream_url(p.inner.url, p.inner.config)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::RemoveInjectStreamUrl, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<StreamUrlParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .remove_inject_stream_url(p.inner.url)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::StartChannelMediaRelay, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<RelayParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .start_channel_media_relay(p.inner.configuration)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::UpdateChannelMediaRelay, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<RelayParams> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .update_channel_media_relay(p.inner.configuration)
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::StopChannelMediaRelay, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            registry
                .session(&p.channel_id)?
                .stop_channel_media_relay()
                .await?;
            Ok(Value::Null)
        })
    });
    table.insert(C::GetConnectionState, |registry, params, _| {
        Box::pin(async move {
            let p: ChannelScoped<NoArgs> = serde_json::from_value(params)?;
            Ok(Value::from(
                registry.session(&p.channel_id)?.get_connection_state(),
            ))
        })
    });
    table
});

impl ChannelRegistry {
    pub fn new(parent: RtcEngine) -> Self {
        Self { parent }
    }

    /// Registers the handler receiving every channel session's events, each
    /// payload carrying its `channelId`.
    pub fn set_event_handler(&self, handler: EventHandler) {
        *self.parent.channel_handler_slot().borrow_mut() = handler;
    }

    /// The session behind a channel id, when one has been created.
    pub fn get_channel(&self, channel_id: &str) -> Option<RtcEngine> {
        self.parent.channel_session(channel_id)
    }

    fn session(&self, channel_id: &str) -> Result<RtcEngine, BridgeError> {
        self.parent
            .channel_session(channel_id)
            .ok_or(BridgeError::NotInitialized)
    }

    /// Channel-surface entry point; every parameter object carries the
    /// routing `channelId`.
    pub async fn call_api(
        &self,
        api_id: u32,
        params: &str,
        view: Option<ViewHandle>,
    ) -> Result<Value, BridgeError> {
        let api = match ApiTypeChannel::from_id(api_id) {
            Some(api) => api,
            None => {
                warn!("unknown channel api id {api_id}, ignoring");
                return Ok(Value::Null);
            }
        };
        trace_event!(
            "channel",
            TraceKind::ApiCall,
            format!("{api:?}"),
            Some(params.to_string())
        );
        let parsed: Value = serde_json::from_str(params)?;
        match CHANNEL_TABLE.get(&api) {
            Some(handler) => handler(self.clone(), parsed, view).await,
            None => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::merge_channel_id;

    #[test]
    fn merges_channel_id_into_object_payloads() {
        let merged = merge_channel_id(r#"{"uid":7}"#, "room1");
        let value: serde_json::Value = serde_json::from_str(&merged).unwrap();
        assert_eq!(value["uid"], 7);
        assert_eq!(value["channelId"], "room1");
    }

    #[test]
    fn passes_non_object_payloads_through() {
        assert_eq!(merge_channel_id("[1,2]", "a"), "[1,2]");
        assert_eq!(merge_channel_id("not json", "a"), "not json");
    }
}
