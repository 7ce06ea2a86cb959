// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation log middleware.
//!
//! Every write request is logged once it completes, with the acting
//! username, the client address, the elapsed time and the outcome.

use std::net::SocketAddr;
use std::time::Instant;

use autolot_api::bearer_token;
use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State as AxumState},
    http::{Method, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::{error, info};

use crate::AppState;

/// Response extension carrying the business error code of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub i32);

/// Records write operations.
///
/// Reads pass through unlogged. The username is decoded from the bearer
/// credential on a best-effort basis; the gate remains the only authority
/// on who the caller is.
pub async fn record_operation(
    AxumState(app_state): AxumState<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET {
        return next.run(request).await;
    }

    let operation: String = format!(
        "{} {}",
        request.method(),
        request
            .extensions()
            .get::<MatchedPath>()
            .map_or_else(|| request.uri().path(), MatchedPath::as_str)
    );
    let username: String = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| bearer_token(Some(header)).ok())
        .and_then(|token| app_state.codec.verify(token).ok())
        .map_or_else(|| String::from("anonymous"), |claims| claims.sub);
    let client: String = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(
            || String::from("unknown"),
            |ConnectInfo(addr)| addr.ip().to_string(),
        );

    let started: Instant = Instant::now();
    let response: Response = next.run(request).await;
    let elapsed_ms: u128 = started.elapsed().as_millis();

    match response.extensions().get::<ErrorCode>() {
        Some(ErrorCode(code)) => error!(
            operation = %operation,
            username = %username,
            client = %client,
            elapsed_ms,
            code,
            "Operation failed"
        ),
        None if response.status().is_success() => info!(
            operation = %operation,
            username = %username,
            client = %client,
            elapsed_ms,
            "Operation succeeded"
        ),
        None => error!(
            operation = %operation,
            username = %username,
            client = %client,
            elapsed_ms,
            status = response.status().as_u16(),
            "Operation rejected"
        ),
    }

    response
}
