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

use std::cell::RefCell;
use std::rc::Rc;

use common::{initialized, Harness};
use rtcbridge_client::{BridgeError, Callback, ChannelRegistry};
use rtcbridge_types::api::ApiTypeChannel;
use rtcbridge_types::events::names;
use serde_json::Value;

struct ChannelHarness {
    h: Harness,
    registry: ChannelRegistry,
    events: Rc<RefCell<Vec<(String, String)>>>,
}

async fn channel_harness() -> ChannelHarness {
    let h = initialized().await;
    let registry = ChannelRegistry::new(h.engine.clone());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    registry.set_event_handler(Callback::from(move |(name, payload): (String, String)| {
        sink.borrow_mut().push((name, payload));
    }));
    ChannelHarness { h, registry, events }
}

#[tokio::test]
async fn create_channel_is_idempotent() {
    let ch = channel_harness().await;
    ch.registry
        .call_api(
            ApiTypeChannel::CreateChannel.id(),
            r#"{"channelId":"a"}"#,
            None,
        )
        .await
        .unwrap();
    assert_eq!(ch.h.provider.clients.borrow().len(), 2);

    ch.registry
        .call_api(
            ApiTypeChannel::CreateChannel.id(),
            r#"{"channelId":"a"}"#,
            None,
        )
        .await
        .unwrap();
    assert_eq!(ch.h.provider.clients.borrow().len(), 2);
    assert!(ch.registry.get_channel("a").is_some());
}

#[tokio::test]
async fn operations_on_a_missing_channel_are_rejected() {
    let ch = channel_harness().await;
    let err = ch
        .registry
        .call_api(
            ApiTypeChannel::LeaveChannel.id(),
            r#"{"channelId":"ghost"}"#,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::NotInitialized));
    assert_eq!(err.to_string(), "please create first");
}

#[tokio::test]
async fn two_channels_hold_independent_sessions() {
    let ch = channel_harness().await;
    for id in ["a", "b"] {
        ch.registry
            .call_api(
                ApiTypeChannel::CreateChannel.id(),
                &format!(r#"{{"channelId":"{id}"}}"#),
                None,
            )
            .await
            .unwrap();
    }
    ch.registry
        .call_api(
            ApiTypeChannel::JoinChannel.id(),
            r#"{"channelId":"a","token":null,"uid":5}"#,
            None,
        )
        .await
        .unwrap();

    // Only channel a's session joined; channel b stayed idle.
    let ops = ch.h.provider.ops();
    assert!(ops.contains(&"join(a)".to_string()));
    assert!(!ops.contains(&"join(b)".to_string()));
    assert_eq!(ch.h.provider.clients.borrow().len(), 3);
}

#[tokio::test]
async fn channel_events_carry_the_channel_id() {
    let ch = channel_harness().await;
    ch.registry
        .call_api(
            ApiTypeChannel::CreateChannel.id(),
            r#"{"channelId":"a"}"#,
            None,
        )
        .await
        .unwrap();
    ch.registry
        .call_api(
            ApiTypeChannel::JoinChannel.id(),
            r#"{"channelId":"a","token":null,"uid":5}"#,
            None,
        )
        .await
        .unwrap();

    let events = ch.events.borrow();
    let (name, payload) = events
        .iter()
        .find(|(name, _)| name == names::JOIN_CHANNEL_SUCCESS)
        .expect("channel join success not delivered");
    assert_eq!(name, names::JOIN_CHANNEL_SUCCESS);
    let payload: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(payload["channelId"], "a");
    assert_eq!(payload["channel"], "a");
    assert_eq!(payload["uid"], 5);

    // Channel events bypass the default session's handler.
    assert!(ch.h.last_payload(names::JOIN_CHANNEL_SUCCESS).is_none());
}

#[tokio::test]
async fn channel_id_round_trips() {
    let ch = channel_harness().await;
    ch.registry
        .call_api(
            ApiTypeChannel::CreateChannel.id(),
            r#"{"channelId":"a"}"#,
            None,
        )
        .await
        .unwrap();
    let value = ch
        .registry
        .call_api(ApiTypeChannel::ChannelId.id(), r#"{"channelId":"a"}"#, None)
        .await
        .unwrap();
    assert_eq!(value, Value::String("a".to_string()));
}

#[tokio::test]
async fn release_removes_the_session() {
    let ch = channel_harness().await;
    ch.registry
        .call_api(
            ApiTypeChannel::CreateChannel.id(),
            r#"{"channelId":"a"}"#,
            None,
        )
        .await
        .unwrap();
    ch.registry
        .call_api(
            ApiTypeChannel::JoinChannel.id(),
            r#"{"channelId":"a","token":null,"uid":5}"#,
            None,
        )
        .await
        .unwrap();

    ch.registry
        .call_api(ApiTypeChannel::Release.id(), r#"{"channelId":"a"}"#, None)
        .await
        .unwrap();
    assert!(ch.h.provider.ops().contains(&"leave".to_string()));
    assert!(ch.registry.get_channel("a").is_none());

    let err = ch
        .registry
        .call_api(ApiTypeChannel::Release.id(), r#"{"channelId":"a"}"#, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::NotInitialized));
}

#[tokio::test]
async fn explicit_publish_and_unpublish_drive_local_tracks() {
    let ch = channel_harness().await;
    ch.registry
        .call_api(
            ApiTypeChannel::CreateChannel.id(),
            r#"{"channelId":"a"}"#,
            None,
        )
        .await
        .unwrap();
    ch.registry
        .call_api(
            ApiTypeChannel::JoinChannel.id(),
            r#"{"channelId":"a","token":null,"uid":5}"#,
            None,
        )
        .await
        .unwrap();
    ch.h.provider.clear_ops();

    ch.registry
        .call_api(ApiTypeChannel::Unpublish.id(), r#"{"channelId":"a"}"#, None)
        .await
        .unwrap();
    assert!(ch
        .h
        .provider
        .ops()
        .contains(&"unpublish(audio)".to_string()));

    ch.h.provider.clear_ops();
    ch.registry
        .call_api(ApiTypeChannel::Publish.id(), r#"{"channelId":"a"}"#, None)
        .await
        .unwrap();
    assert!(ch.h.provider.ops().contains(&"publish(audio)".to_string()));
}

#[tokio::test]
async fn unknown_channel_api_id_is_a_silent_noop() {
    let ch = channel_harness().await;
    let value = ch.registry.call_api(5000, "{}", None).await.unwrap();
    assert_eq!(value, Value::Null);
}
