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

//! Track handles of the underlying client.
//!
//! `set_enabled` governs local processing only; whether a local track is
//! visible to remote peers is decided by publish/unpublish on the client, not
//! here. `close` releases the hardware handle and must precede creating a
//! replacement for the same device.

use std::rc::Rc;

use async_trait::async_trait;

use rtcbridge_types::client::FitMode;
use rtcbridge_types::params::{BeautyOptions, VideoEncoderConfiguration};

use super::ViewHandle;

#[async_trait(?Send)]
pub trait LocalAudioTrack {
    async fn set_enabled(&self, enabled: bool) -> anyhow::Result<()>;
    fn set_volume(&self, volume: u32);
    fn close(&self);
    fn on_track_ended(&self, callback: Rc<dyn Fn()>);
}

/// A camera or screen-share track; the owner tracks which one it is.
#[async_trait(?Send)]
pub trait LocalVideoTrack {
    async fn set_enabled(&self, enabled: bool) -> anyhow::Result<()>;
    fn play(&self, view: ViewHandle, fit: FitMode, mirror: bool);
    fn stop(&self);
    async fn set_encoder_config(&self, config: &VideoEncoderConfiguration) -> anyhow::Result<()>;
    async fn set_beauty_effect(
        &self,
        enabled: bool,
        options: &BeautyOptions,
    ) -> anyhow::Result<()>;
    fn close(&self);
    fn on_track_ended(&self, callback: Rc<dyn Fn()>);
}

#[async_trait(?Send)]
pub trait RemoteAudioTrack {
    fn play(&self);
    fn stop(&self);
    fn set_volume(&self, volume: u32);
    async fn set_playback_device(&self, device_id: &str) -> anyhow::Result<()>;
    fn on_first_frame_decoded(&self, callback: Rc<dyn Fn()>);
}

pub trait RemoteVideoTrack {
    fn play(&self, view: ViewHandle, fit: FitMode, mirror: bool);
    fn stop(&self);
    fn on_first_frame_decoded(&self, callback: Rc<dyn Fn()>);
}

/// Either local track, as handed to publish/unpublish.
#[derive(Clone)]
pub enum LocalTrackHandle {
    Audio(Rc<dyn LocalAudioTrack>),
    Video(Rc<dyn LocalVideoTrack>),
}
