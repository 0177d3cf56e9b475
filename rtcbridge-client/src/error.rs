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

use thiserror::Error;

/// Closed error taxonomy for every fallible bridge operation.
///
/// Underlying client failures are carried opaquely; the bridge performs no
/// retry and no translation of their payloads.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The operation requires a handle or session that does not exist yet.
    #[error("please create first")]
    NotInitialized,

    /// Malformed JSON or a missing required field in a parameter object.
    #[error("invalid parameter: {0}")]
    Parameter(#[from] serde_json::Error),

    /// Any failure reported by the underlying RTC client, unmodified.
    #[error(transparent)]
    Client(#[from] anyhow::Error),
}
