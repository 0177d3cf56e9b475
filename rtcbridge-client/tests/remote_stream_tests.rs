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

mod common;

use common::{initialized, joined};
use rtcbridge_client::rtc::{ClientEvent, NetworkQualityInfo};
use rtcbridge_types::api::ApiTypeEngine;
use rtcbridge_types::client::MediaKind;
use rtcbridge_types::events::names;

#[tokio::test]
async fn published_audio_is_auto_subscribed_and_reported() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.add_user(7, true, false);

    client
        .emit(ClientEvent::UserPublished {
            uid: 7,
            kind: MediaKind::Audio,
        })
        .await;

    assert!(h.provider.ops().contains(&"subscribe_audio(7)".to_string()));
    assert!(client.remote_audio_track(7).unwrap().playing.get());

    let payload = h.last_payload(names::REMOTE_AUDIO_STATE_CHANGED).unwrap();
    assert_eq!(payload["uid"], 7);
    assert_eq!(payload["state"], 2); // decoding
    assert_eq!(payload["reason"], 6); // remote unmuted
}

#[tokio::test]
async fn published_video_is_ignored_while_video_is_disabled() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.add_user(7, false, true);

    client
        .emit(ClientEvent::UserPublished {
            uid: 7,
            kind: MediaKind::Video,
        })
        .await;

    assert!(!h
        .provider
        .ops()
        .iter()
        .any(|op| op.starts_with("subscribe_video")));
    assert!(h.last_payload(names::REMOTE_VIDEO_STATE_CHANGED).is_none());
}

#[tokio::test]
async fn default_mute_gates_the_auto_subscribe() {
    let h = joined("room1", 42).await;
    h.engine
        .call_api(
            ApiTypeEngine::SetDefaultMuteAllRemoteAudioStreams.id(),
            r#"{"mute":true}"#,
            None,
        )
        .await
        .unwrap();
    let client = h.provider.last_client();
    client.add_user(7, true, false);

    client
        .emit(ClientEvent::UserPublished {
            uid: 7,
            kind: MediaKind::Audio,
        })
        .await;

    assert!(!h
        .provider
        .ops()
        .iter()
        .any(|op| op.starts_with("subscribe_audio")));
    assert!(h.last_payload(names::REMOTE_AUDIO_STATE_CHANGED).is_none());
}

#[tokio::test]
async fn repeated_publish_notifications_keep_the_first_track() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.add_user(7, true, false);

    client
        .emit(ClientEvent::UserPublished {
            uid: 7,
            kind: MediaKind::Audio,
        })
        .await;
    let first = client.remote_audio_track(7).unwrap();
    client
        .emit(ClientEvent::UserPublished {
            uid: 7,
            kind: MediaKind::Audio,
        })
        .await;

    // A later subscribe result for an already-tracked uid is discarded.
    assert!(first.playing.get());
    assert!(!client.remote_audio_track(7).unwrap().playing.get());
}

#[tokio::test]
async fn unpublish_drops_the_entry_and_reports_stopped() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.add_user(7, true, false);
    client
        .emit(ClientEvent::UserPublished {
            uid: 7,
            kind: MediaKind::Audio,
        })
        .await;
    let track = client.remote_audio_track(7).unwrap();

    client
        .emit(ClientEvent::UserUnpublished {
            uid: 7,
            kind: MediaKind::Audio,
        })
        .await;

    assert!(!track.playing.get());
    let payload = h.last_payload(names::REMOTE_AUDIO_STATE_CHANGED).unwrap();
    assert_eq!(payload["state"], 0); // stopped
    assert_eq!(payload["reason"], 5); // remote muted

    // Muting an untracked stream afterwards is silent.
    h.provider.clear_ops();
    h.engine
        .call_api(
            ApiTypeEngine::MuteRemoteAudioStream.id(),
            r#"{"userId":7,"mute":true}"#,
            None,
        )
        .await
        .unwrap();
    assert!(!h
        .provider
        .ops()
        .iter()
        .any(|op| op.starts_with("unsubscribe")));
}

#[tokio::test]
async fn muting_an_unknown_uid_is_silent() {
    let h = joined("room1", 42).await;
    h.provider.clear_ops();
    h.engine
        .call_api(
            ApiTypeEngine::MuteRemoteAudioStream.id(),
            r#"{"userId":99,"mute":true}"#,
            None,
        )
        .await
        .unwrap();
    assert!(h.provider.ops().is_empty());
    assert!(h.events.borrow().is_empty() || h.last_payload(names::REMOTE_AUDIO_STATE_CHANGED).is_none());
}

#[tokio::test]
async fn explicit_unmute_reports_starting_on_first_frame() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.add_user(7, true, false);

    h.engine
        .call_api(
            ApiTypeEngine::MuteRemoteAudioStream.id(),
            r#"{"userId":7,"mute":false}"#,
            None,
        )
        .await
        .unwrap();
    let track = client.remote_audio_track(7).unwrap();
    assert!(track.playing.get());
    assert!(h.last_payload(names::REMOTE_AUDIO_STATE_CHANGED).is_none());

    track.fire_first_frame();
    let payload = h.last_payload(names::REMOTE_AUDIO_STATE_CHANGED).unwrap();
    assert_eq!(payload["state"], 1); // starting
    assert_eq!(payload["reason"], 4); // local unmuted
}

#[tokio::test]
async fn mute_all_fans_out_over_known_users() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.add_user(7, true, false);
    client.add_user(8, true, false);
    for uid in [7, 8] {
        client
            .emit(ClientEvent::UserPublished {
                uid,
                kind: MediaKind::Audio,
            })
            .await;
    }
    h.provider.clear_ops();

    h.engine
        .call_api(
            ApiTypeEngine::MuteAllRemoteAudioStreams.id(),
            r#"{"mute":true}"#,
            None,
        )
        .await
        .unwrap();
    let ops = h.provider.ops();
    assert!(ops.contains(&"unsubscribe(7,audio)".to_string()));
    assert!(ops.contains(&"unsubscribe(8,audio)".to_string()));
}

#[tokio::test]
async fn volume_indicator_is_rescaled_to_the_native_range() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();

    client
        .emit(ClientEvent::VolumeIndicator {
            volumes: vec![(7, 100), (8, 40)],
        })
        .await;

    let payload = h.last_payload(names::AUDIO_VOLUME_INDICATION).unwrap();
    assert_eq!(payload["speakerNumber"], 2);
    let speakers = payload["speakers"].as_array().unwrap();
    assert_eq!(speakers[0]["volume"], 255);
    assert_eq!(speakers[1]["volume"], 102);
    assert_eq!(speakers[0]["channelId"], "room1");
    // 255 + 102 clamps to the scale ceiling.
    assert_eq!(payload["totalVolume"], 255);
}

#[tokio::test]
async fn network_quality_reports_own_link_and_every_remote() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.quality.borrow_mut().insert(
        7,
        NetworkQualityInfo {
            uplink: 2,
            downlink: 3,
        },
    );

    client
        .emit(ClientEvent::NetworkQuality {
            uplink: 1,
            downlink: 1,
        })
        .await;

    let events = h.events.borrow();
    let reports: Vec<&(String, String)> = events
        .iter()
        .filter(|(name, _)| name == names::NETWORK_QUALITY)
        .collect();
    assert_eq!(reports.len(), 2);
    let own: serde_json::Value = serde_json::from_str(&reports[0].1).unwrap();
    assert_eq!(own["uid"], 0);
    assert_eq!(own["txQuality"], 1);
    let remote: serde_json::Value = serde_json::from_str(&reports[1].1).unwrap();
    assert_eq!(remote["uid"], 7);
    assert_eq!(remote["rxQuality"], 3);
}

#[tokio::test]
async fn user_left_releases_tracked_streams() {
    let h = joined("room1", 42).await;
    let client = h.provider.last_client();
    client.add_user(7, true, false);
    client
        .emit(ClientEvent::UserPublished {
            uid: 7,
            kind: MediaKind::Audio,
        })
        .await;
    let track = client.remote_audio_track(7).unwrap();

    client
        .emit(ClientEvent::UserLeft {
            uid: 7,
            reason: rtcbridge_types::client::UserLeftReason::Quit,
        })
        .await;

    assert!(!track.playing.get());
    let payload = h.last_payload(names::USER_OFFLINE).unwrap();
    assert_eq!(payload["uid"], 7);
}

#[tokio::test]
async fn exception_events_only_surface_known_codes() {
    let h = initialized().await;
    let client = h.provider.last_client();

    client
        .emit(ClientEvent::Exception {
            code: 999999,
            msg: "mystery".to_string(),
            uid: 0,
        })
        .await;
    assert!(h.last_payload(names::ERROR).is_none());

    client
        .emit(ClientEvent::Exception {
            code: 2001,
            msg: "network down".to_string(),
            uid: 0,
        })
        .await;
    let payload = h.last_payload(names::ERROR).unwrap();
    assert_eq!(payload["err"], 2001);
    assert_eq!(payload["msg"], "network down");
}
