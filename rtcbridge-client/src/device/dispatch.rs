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

//! Audio and video device-manager dispatch surfaces.
//!
//! Both registries are built once; handlers are plain fn pointers taking the
//! cheap-to-clone manager handle. Enumeration results are returned as
//! JSON-stringified device lists, matching the call convention's string-typed
//! return channel.

use std::collections::HashMap;

use futures::future::LocalBoxFuture;
use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;

use rtcbridge_diagnostics::{trace_event, TraceKind};
use rtcbridge_types::api::{ApiTypeAudioDeviceManager, ApiTypeVideoDeviceManager};
use rtcbridge_types::params::{DeviceIdParams, VolumeParams};

use crate::error::BridgeError;
use crate::rtc::DeviceInfo;

use super::DeviceManager;

type DeviceHandler = fn(DeviceManager, Value) -> LocalBoxFuture<'static, Result<Value, BridgeError>>;

static ADM_TABLE: Lazy<HashMap<ApiTypeAudioDeviceManager, DeviceHandler>> = Lazy::new(|| {
    use ApiTypeAudioDeviceManager as A;
    let mut table: HashMap<A, DeviceHandler> = HashMap::new();
    table.insert(A::EnumeratePlaybackDevices, |dm, _| {
        Box::pin(async move {
            let devices = dm.provider().playback_devices().await?;
            stringified(&devices)
        })
    });
    table.insert(A::SetPlaybackDevice, |dm, params| {
        Box::pin(async move {
            let p: DeviceIdParams = serde_json::from_value(params)?;
            dm.set_playback_device(p.device_id).await?;
            Ok(Value::Null)
        })
    });
    table.insert(A::GetPlaybackDevice, |dm, _| {
        Box::pin(async move { Ok(Value::String(dm.playback_device().unwrap_or_default())) })
    });
    table.insert(A::GetPlaybackDeviceInfo, |dm, _| {
        Box::pin(async move {
            let devices = dm.provider().playback_devices().await?;
            device_info(devices, dm.playback_device())
        })
    });
    table.insert(A::EnumerateRecordingDevices, |dm, _| {
        Box::pin(async move {
            let devices = dm.provider().recording_devices().await?;
            stringified(&devices)
        })
    });
    table.insert(A::SetRecordingDevice, |dm, params| {
        Box::pin(async move {
            let p: DeviceIdParams = serde_json::from_value(params)?;
            dm.set_recording_device(p.device_id);
            Ok(Value::Null)
        })
    });
    table.insert(A::GetRecordingDevice, |dm, _| {
        Box::pin(async move { Ok(Value::String(dm.recording_device().unwrap_or_default())) })
    });
    table.insert(A::GetRecordingDeviceInfo, |dm, _| {
        Box::pin(async move {
            let devices = dm.provider().recording_devices().await?;
            device_info(devices, dm.recording_device())
        })
    });
    table.insert(A::SetRecordingDeviceVolume, |dm, params| {
        Box::pin(async move {
            let p: VolumeParams = serde_json::from_value(params)?;
            dm.set_recording_volume(p.volume);
            Ok(Value::Null)
        })
    });
    table.insert(A::GetRecordingDeviceVolume, |dm, _| {
        Box::pin(async move { Ok(Value::from(dm.recording_volume())) })
    });
    table
});

static VDM_TABLE: Lazy<HashMap<ApiTypeVideoDeviceManager, DeviceHandler>> = Lazy::new(|| {
    use ApiTypeVideoDeviceManager as V;
    let mut table: HashMap<V, DeviceHandler> = HashMap::new();
    table.insert(V::EnumerateVideoDevices, |dm, _| {
        Box::pin(async move {
            let devices = dm.provider().video_devices().await?;
            stringified(&devices)
        })
    });
    table.insert(V::SetDevice, |dm, params| {
        Box::pin(async move {
            let p: DeviceIdParams = serde_json::from_value(params)?;
            dm.set_camera_device(p.device_id);
            Ok(Value::Null)
        })
    });
    table.insert(V::GetDevice, |dm, _| {
        Box::pin(async move { Ok(Value::String(dm.camera_device().unwrap_or_default())) })
    });
    table
});

fn stringified(devices: &[DeviceInfo]) -> Result<Value, BridgeError> {
    Ok(Value::String(serde_json::to_string(devices)?))
}

/// The info of the selected device, falling back to the first enumerated one.
fn device_info(devices: Vec<DeviceInfo>, selected: Option<String>) -> Result<Value, BridgeError> {
    let found = match &selected {
        Some(id) => devices.iter().find(|d| &d.device_id == id),
        None => devices.first(),
    };
    match found {
        Some(info) => Ok(Value::String(serde_json::to_string(info)?)),
        None => Ok(Value::Null),
    }
}

impl DeviceManager {
    /// Audio device-manager surface entry point.
    pub async fn call_api_audio(
        &self,
        api_id: u32,
        params: &str,
    ) -> Result<Value, BridgeError> {
        let api = match ApiTypeAudioDeviceManager::from_id(api_id) {
            Some(api) => api,
            None => {
                warn!("unknown audio device api id {api_id}, ignoring");
                return Ok(Value::Null);
            }
        };
        trace_event!(
            "adm",
            TraceKind::ApiCall,
            format!("{api:?}"),
            Some(params.to_string())
        );
        let parsed: Value = serde_json::from_str(params)?;
        match ADM_TABLE.get(&api) {
            Some(handler) => handler(self.clone(), parsed).await,
            None => Ok(Value::Null),
        }
    }

    /// Video device-manager surface entry point.
    pub async fn call_api_video(
        &self,
        api_id: u32,
        params: &str,
    ) -> Result<Value, BridgeError> {
        let api = match ApiTypeVideoDeviceManager::from_id(api_id) {
            Some(api) => api,
            None => {
                warn!("unknown video device api id {api_id}, ignoring");
                return Ok(Value::Null);
            }
        };
        trace_event!(
            "vdm",
            TraceKind::ApiCall,
            format!("{api:?}"),
            Some(params.to_string())
        );
        let parsed: Value = serde_json::from_str(params)?;
        match VDM_TABLE.get(&api) {
            Some(handler) => handler(self.clone(), parsed).await,
            None => Ok(Value::Null),
        }
    }
}
