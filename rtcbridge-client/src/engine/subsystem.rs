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

//! Process-wide client subsystem settings.
//!
//! Region selection and log verbosity are properties of the underlying client
//! library, not of a session. The first session to initialize pins them;
//! later sessions initializing with a different region or level keep the
//! pinned settings and only log the divergence. `setLogFilter` bypasses this
//! and always applies, since it is an explicit caller request rather than
//! initialization fallout.

use log::warn;
use once_cell::sync::OnceCell;

use rtcbridge_types::native::{AreaCode, LogLevel};
use rtcbridge_types::params::EngineContext;
use rtcbridge_types::translate::{area_code_to_client, log_level_to_client};
use rtcbridge_types::client::RegionArea;

use crate::rtc::RtcProvider;

#[derive(Debug, PartialEq)]
struct SubsystemConfig {
    areas: Vec<RegionArea>,
    log_level: Option<u8>,
}

static SUBSYSTEM: OnceCell<SubsystemConfig> = OnceCell::new();

fn config_from(context: &EngineContext) -> SubsystemConfig {
    let areas = context
        .area_code
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|code| area_code_to_client(AreaCode::from_code(*code)))
        .collect();
    let log_level = context
        .log_config
        .as_ref()
        .and_then(|lc| lc.level)
        .map(|level| log_level_to_client(LogLevel::from_code(level)));
    SubsystemConfig { areas, log_level }
}

/// Applies the context's region/log settings on first call; afterwards only
/// warns when a session asks for something different.
pub(crate) fn configure(provider: &dyn RtcProvider, context: &EngineContext) {
    let requested = config_from(context);
    let mut applied = false;
    let pinned = SUBSYSTEM.get_or_init(|| {
        if !requested.areas.is_empty() {
            provider.set_area_code(&requested.areas);
        }
        if let Some(level) = requested.log_level {
            provider.set_log_level(level);
        }
        applied = true;
        requested
    });
    if applied {
        return;
    }
    let requested = config_from(context);
    if requested != *pinned {
        warn!(
            "subsystem already configured as {pinned:?}; ignoring divergent request {requested:?}"
        );
    }
}
