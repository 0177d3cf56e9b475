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

//! Device and track ownership for one session.
//!
//! Owns the local microphone/camera/screen tracks, the registries of remote
//! tracks keyed by uid, the surface bindings, and the selected device ids.
//! Device selection never hot-swaps a running track; the stored id applies at
//! the next track creation. A track is always closed before a replacement is
//! created so two handles to the same physical device never coexist.

mod dispatch;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use rtcbridge_types::params::{ScreenCaptureParameters, VideoEncoderConfiguration};

use crate::error::BridgeError;
use crate::rtc::{
    LocalAudioTrack, LocalVideoTrack, RemoteAudioTrack, RemoteVideoTrack, RtcProvider,
    SurfaceBinding,
};

const DEFAULT_VOLUME: u32 = 100;

#[derive(Default)]
struct DeviceState {
    recording_id: Option<String>,
    playback_id: Option<String>,
    camera_id: Option<String>,
    recording_volume: Option<u32>,
    playback_volume: Option<u32>,
    audio_preset: Option<&'static str>,
    encoder_config: Option<VideoEncoderConfiguration>,
    // Some ⇒ the local video track is a screen share, not a camera.
    screen_config: Option<ScreenCaptureParameters>,
    // The local audio track came with the screen capture.
    screen_audio: bool,
    local_audio: Option<Rc<dyn LocalAudioTrack>>,
    local_video: Option<Rc<dyn LocalVideoTrack>>,
    remote_audio: HashMap<u64, Rc<dyn RemoteAudioTrack>>,
    remote_video: HashMap<u64, Rc<dyn RemoteVideoTrack>>,
    canvas: HashMap<u64, SurfaceBinding>,
}

/// Cheap-to-clone handle over one session's device and track state.
#[derive(Clone)]
pub struct DeviceManager {
    provider: Rc<dyn RtcProvider>,
    state: Rc<RefCell<DeviceState>>,
}

impl DeviceManager {
    pub fn new(provider: Rc<dyn RtcProvider>) -> Self {
        Self {
            provider,
            state: Rc::new(RefCell::new(DeviceState::default())),
        }
    }

    // === local tracks ===

    pub fn local_audio(&self) -> Option<Rc<dyn LocalAudioTrack>> {
        self.state.borrow().local_audio.clone()
    }

    pub fn local_video(&self) -> Option<Rc<dyn LocalVideoTrack>> {
        self.state.borrow().local_video.clone()
    }

    pub fn is_screen_active(&self) -> bool {
        self.state.borrow().screen_config.is_some()
    }

    /// True while the local audio slot holds a screen-share system-audio
    /// track instead of a microphone.
    pub fn is_screen_audio_active(&self) -> bool {
        self.state.borrow().screen_audio
    }

    /// Returns the microphone track, creating one when absent. The boolean is
    /// true when a new track was created (and still needs its ended hook and
    /// publish decision).
    pub async fn get_or_create_microphone(
        &self,
        force: bool,
    ) -> Result<(Rc<dyn LocalAudioTrack>, bool), BridgeError> {
        if let Some(track) = self.state.borrow().local_audio.clone() {
            if !force {
                return Ok((track, false));
            }
            self.state.borrow_mut().local_audio = None;
            track.close();
        }
        let (device_id, volume, preset) = {
            let state = self.state.borrow();
            (
                state.recording_id.clone(),
                state.recording_volume,
                state.audio_preset,
            )
        };
        let track = self
            .provider
            .create_microphone_track(device_id.as_deref(), preset)
            .await?;
        track.set_volume(volume.unwrap_or(DEFAULT_VOLUME));
        self.state.borrow_mut().local_audio = Some(track.clone());
        Ok((track, true))
    }

    /// Returns the camera track, creating one when absent. An active screen
    /// share is closed first; camera and screen are mutually exclusive.
    pub async fn get_or_create_camera(
        &self,
        force: bool,
    ) -> Result<(Rc<dyn LocalVideoTrack>, bool), BridgeError> {
        if self.is_screen_active() {
            self.close_screen();
        }
        if let Some(track) = self.state.borrow().local_video.clone() {
            if !force {
                return Ok((track, false));
            }
            self.state.borrow_mut().local_video = None;
            track.close();
        }
        let (device_id, encoder) = {
            let state = self.state.borrow();
            (state.camera_id.clone(), state.encoder_config.clone())
        };
        let track = self
            .provider
            .create_camera_track(device_id.as_deref(), encoder.as_ref())
            .await?;
        self.state.borrow_mut().local_video = Some(track.clone());
        Ok((track, true))
    }

    /// Creates and installs a screen capture. Any camera track (or previous
    /// screen share) is closed first; when the platform captures system audio
    /// the audio track replaces the microphone in the same step.
    pub async fn create_screen(
        &self,
        config: ScreenCaptureParameters,
    ) -> Result<(Rc<dyn LocalVideoTrack>, Option<Rc<dyn LocalAudioTrack>>), BridgeError> {
        if let Some(track) = self.state.borrow_mut().local_video.take() {
            track.close();
        }
        let tracks = self.provider.create_screen_tracks(&config).await?;
        let mut state = self.state.borrow_mut();
        state.local_video = Some(tracks.video.clone());
        state.screen_config = Some(config);
        if let Some(audio) = &tracks.audio {
            if let Some(old) = state.local_audio.take() {
                old.close();
            }
            state.local_audio = Some(audio.clone());
            state.screen_audio = true;
        }
        Ok((tracks.video, tracks.audio))
    }

    /// Closes the screen-share tracks, including a system-audio track that
    /// was installed with them.
    pub fn close_screen(&self) {
        let (video, audio) = {
            let mut state = self.state.borrow_mut();
            if state.screen_config.take().is_none() {
                return;
            }
            let audio = if state.screen_audio {
                state.screen_audio = false;
                state.local_audio.take()
            } else {
                None
            };
            (state.local_video.take(), audio)
        };
        if let Some(track) = video {
            track.close();
        }
        if let Some(track) = audio {
            track.close();
        }
    }

    /// Closes every local track and forgets the remote registries and
    /// surface bindings.
    pub fn reset(&self) {
        self.release_tracks();
        self.state.borrow_mut().canvas.clear();
    }

    /// Closes local tracks and drops remote entries without touching device
    /// selection or bindings; used on leave.
    pub fn release_tracks(&self) {
        let (audio, video, remote_audio, remote_video) = {
            let mut state = self.state.borrow_mut();
            state.screen_config = None;
            state.screen_audio = false;
            (
                state.local_audio.take(),
                state.local_video.take(),
                std::mem::take(&mut state.remote_audio),
                std::mem::take(&mut state.remote_video),
            )
        };
        if let Some(track) = audio {
            track.close();
        }
        if let Some(track) = video {
            track.close();
        }
        for track in remote_audio.values() {
            track.stop();
        }
        for track in remote_video.values() {
            track.stop();
        }
    }

    // === remote tracks ===

    /// Installs a subscribed remote audio track. Returns false when an entry
    /// for the uid already exists; the new track is dropped so duplicate
    /// subscriptions never yield two entries.
    pub fn insert_remote_audio(&self, uid: u64, track: Rc<dyn RemoteAudioTrack>) -> bool {
        let mut state = self.state.borrow_mut();
        if state.remote_audio.contains_key(&uid) {
            debug!("remote audio for {uid} already tracked");
            return false;
        }
        if let Some(volume) = state.playback_volume {
            track.set_volume(volume);
        }
        state.remote_audio.insert(uid, track);
        true
    }

    pub fn insert_remote_video(&self, uid: u64, track: Rc<dyn RemoteVideoTrack>) -> bool {
        let mut state = self.state.borrow_mut();
        if state.remote_video.contains_key(&uid) {
            debug!("remote video for {uid} already tracked");
            return false;
        }
        state.remote_video.insert(uid, track);
        true
    }

    pub fn remove_remote_audio(&self, uid: u64) -> Option<Rc<dyn RemoteAudioTrack>> {
        self.state.borrow_mut().remote_audio.remove(&uid)
    }

    pub fn remove_remote_video(&self, uid: u64) -> Option<Rc<dyn RemoteVideoTrack>> {
        self.state.borrow_mut().remote_video.remove(&uid)
    }

    pub fn remote_audio(&self, uid: u64) -> Option<Rc<dyn RemoteAudioTrack>> {
        self.state.borrow().remote_audio.get(&uid).cloned()
    }

    pub fn remote_video(&self, uid: u64) -> Option<Rc<dyn RemoteVideoTrack>> {
        self.state.borrow().remote_video.get(&uid).cloned()
    }

    pub fn all_remote_audio(&self) -> Vec<Rc<dyn RemoteAudioTrack>> {
        self.state.borrow().remote_audio.values().cloned().collect()
    }

    // === surface bindings ===

    /// Registers (or, with `None`, clears) the binding for a uid. Late or
    /// replaced tracks pick up the stored binding when they next play.
    pub fn set_binding(&self, uid: u64, binding: Option<SurfaceBinding>) {
        let mut state = self.state.borrow_mut();
        match binding {
            Some(b) => {
                state.canvas.insert(uid, b);
            }
            None => {
                state.canvas.remove(&uid);
            }
        }
    }

    pub fn binding(&self, uid: u64) -> Option<SurfaceBinding> {
        self.state.borrow().canvas.get(&uid).cloned()
    }

    /// Plays the local video track into the binding registered for uid 0,
    /// when both exist.
    pub fn play_local_video(&self) {
        let (track, binding) = {
            let state = self.state.borrow();
            (state.local_video.clone(), state.canvas.get(&0).cloned())
        };
        if let (Some(track), Some(b)) = (track, binding) {
            track.play(b.view, b.fit, b.mirror);
        }
    }

    pub fn play_remote_video(&self, uid: u64) {
        let (track, binding) = {
            let state = self.state.borrow();
            (
                state.remote_video.get(&uid).cloned(),
                state.canvas.get(&uid).cloned(),
            )
        };
        if let (Some(track), Some(b)) = (track, binding) {
            track.play(b.view, b.fit, b.mirror);
        }
    }

    // === device selection & volumes ===

    pub fn set_recording_device(&self, device_id: String) {
        self.state.borrow_mut().recording_id = Some(device_id);
    }

    pub fn recording_device(&self) -> Option<String> {
        self.state.borrow().recording_id.clone()
    }

    /// Audio encoder preset for the microphone; applies at next creation.
    pub fn set_audio_preset(&self, preset: &'static str) {
        self.state.borrow_mut().audio_preset = Some(preset);
    }

    pub fn set_camera_device(&self, device_id: String) {
        self.state.borrow_mut().camera_id = Some(device_id);
    }

    pub fn camera_device(&self) -> Option<String> {
        self.state.borrow().camera_id.clone()
    }

    /// Stores the playback device and re-routes every tracked remote audio
    /// track to it.
    pub async fn set_playback_device(&self, device_id: String) -> Result<(), BridgeError> {
        self.state.borrow_mut().playback_id = Some(device_id.clone());
        let tracks = self.all_remote_audio();
        for track in tracks {
            track.set_playback_device(&device_id).await?;
        }
        Ok(())
    }

    pub fn playback_device(&self) -> Option<String> {
        self.state.borrow().playback_id.clone()
    }

    /// Stores the capture volume and applies it to a live microphone track.
    pub fn set_recording_volume(&self, volume: u32) {
        let track = {
            let mut state = self.state.borrow_mut();
            state.recording_volume = Some(volume);
            state.local_audio.clone()
        };
        if let Some(track) = track {
            track.set_volume(volume);
        }
    }

    pub fn recording_volume(&self) -> u32 {
        self.state.borrow().recording_volume.unwrap_or(DEFAULT_VOLUME)
    }

    /// Stores the playback volume and applies it to every tracked remote
    /// audio track.
    pub fn set_playback_volume(&self, volume: u32) {
        let tracks = {
            let mut state = self.state.borrow_mut();
            state.playback_volume = Some(volume);
            state.remote_audio.values().cloned().collect::<Vec<_>>()
        };
        for track in tracks {
            track.set_volume(volume);
        }
    }

    /// Stores the encoder configuration and applies it to a live camera
    /// track; it also applies at the next camera creation.
    pub async fn set_encoder_config(
        &self,
        config: VideoEncoderConfiguration,
    ) -> Result<(), BridgeError> {
        let track = {
            let mut state = self.state.borrow_mut();
            state.encoder_config = Some(config.clone());
            state.local_video.clone()
        };
        if let Some(track) = track {
            track.set_encoder_config(&config).await?;
        }
        Ok(())
    }

    fn provider(&self) -> &Rc<dyn RtcProvider> {
        &self.provider
    }
}
