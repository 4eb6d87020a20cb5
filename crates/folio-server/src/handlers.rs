// SPDX-License-Identifier: Apache-2.0

use super::*;

fn api_error_response(status: StatusCode, err: ApiError) -> Response {
    let body = Json(json!({"error": err}));
    (status, body).into_response()
}

fn empty_array_response(status: StatusCode) -> Response {
    (status, Json(json!([]))).into_response()
}

fn normalize_query(params: &HashMap<String, String>) -> String {
    let mut kv: Vec<(&String, &String)> = params.iter().collect();
    kv.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));
    kv.into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

fn put_cache_headers(headers: &mut HeaderMap, ttl: Duration, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())) {
        headers.insert("cache-control", value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert("etag", value);
    }
}

fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready")
    }
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let payload = json!({
        "server": {
            "crate": CRATE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION,
        }
    });
    let mut response = Json(payload).into_response();
    if let Ok(value) = HeaderValue::from_str("public, max-age=30") {
        response.headers_mut().insert("cache-control", value);
    }
    with_request_id(response, &request_id)
}

pub(crate) async fn list_collections_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let payload = json!({"collections": state.collections.collections});
    let etag = format!(
        "\"{}\"",
        sha256_hex(&serde_json::to_vec(&payload).unwrap_or_default())
    );
    let mut response = Json(payload).into_response();
    put_cache_headers(response.headers_mut(), state.config.discovery_ttl, &etag);
    with_request_id(response, &request_id)
}

fn resolve_selection(
    state: &AppState,
    params: &folio_api::ListProjectsParams,
) -> Result<Selection, ApiError> {
    if let Some(raw) = &params.collection {
        let def = state
            .collections
            .get(raw)
            .ok_or_else(|| ApiError::unknown_collection(raw))?;
        return Ok(Selection::Collection(TagQuery::new(&def.tags)));
    }
    if let Some(tags) = &params.tags {
        let query = TagQuery::new(tags);
        if query.is_empty() {
            return Ok(Selection::All);
        }
        return Ok(Selection::Tags(query));
    }
    Ok(Selection::All)
}

pub(crate) async fn list_projects_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::extract::Query(params): axum::extract::Query<HashMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/v1/projects", "request start");

    let parse_map: std::collections::BTreeMap<String, String> =
        params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    let parsed = match parse_list_projects_params(&parse_map) {
        Ok(v) => v,
        Err(e) => {
            return with_request_id(api_error_response(StatusCode::BAD_REQUEST, e), &request_id);
        }
    };
    let selection = match resolve_selection(&state, &parsed) {
        Ok(v) => v,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "selection rejected");
            return with_request_id(api_error_response(StatusCode::BAD_REQUEST, e), &request_id);
        }
    };

    let dir = state.config.projects_dir.clone();
    let load = tokio::task::spawn_blocking(move || load_projects(&dir));
    let projects = match timeout(state.config.request_timeout, load).await {
        Ok(Ok(Ok(projects))) => projects,
        Ok(Ok(Err(err))) => {
            // Partial results are preferred everywhere below this point; a
            // top-level store failure is the one case that surfaces as 500.
            error!(request_id = %request_id, error = %err, "project store failure");
            return with_request_id(
                empty_array_response(StatusCode::INTERNAL_SERVER_ERROR),
                &request_id,
            );
        }
        Ok(Err(join_err)) => {
            error!(request_id = %request_id, error = %join_err, "loader task failed");
            return with_request_id(
                empty_array_response(StatusCode::INTERNAL_SERVER_ERROR),
                &request_id,
            );
        }
        Err(_) => {
            let err = ApiError::new(ApiErrorCode::Timeout, "request timed out", json!({}));
            return with_request_id(api_error_response(StatusCode::GATEWAY_TIMEOUT, err), &request_id);
        }
    };

    let mut selected = select_projects(projects, &selection);
    if parsed.shuffle {
        shuffle_projects(&mut rand::thread_rng(), &mut selected);
    }

    let bytes = if parsed.pretty {
        serde_json::to_vec_pretty(&selected).unwrap_or_default()
    } else {
        serde_json::to_vec(&selected).unwrap_or_default()
    };
    if bytes.len() > state.config.response_max_bytes {
        let err = ApiError::new(
            ApiErrorCode::ResponseTooLarge,
            "response exceeds configured size guard",
            json!({"bytes": bytes.len(), "max": state.config.response_max_bytes}),
        );
        return with_request_id(
            api_error_response(StatusCode::PAYLOAD_TOO_LARGE, err),
            &request_id,
        );
    }

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .body(Body::from(bytes.clone()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
    response
        .headers_mut()
        .insert("content-type", HeaderValue::from_static("application/json"));

    // A 304 against a shuffled response would pin one permutation, so ETag
    // handling only applies to deterministic output.
    if !parsed.shuffle {
        let normalized = normalize_query(&params);
        let etag = format!(
            "\"{}\"",
            sha256_hex(format!("{normalized}|{}", String::from_utf8_lossy(&bytes)).as_bytes())
        );
        if if_none_match(&headers).as_deref() == Some(etag.as_str()) {
            let mut not_modified = StatusCode::NOT_MODIFIED.into_response();
            put_cache_headers(not_modified.headers_mut(), state.config.listing_ttl, &etag);
            return with_request_id(not_modified, &request_id);
        }
        put_cache_headers(response.headers_mut(), state.config.listing_ttl, &etag);
    }

    info!(
        request_id = %request_id,
        status = 200_u16,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request complete"
    );
    with_request_id(response, &request_id)
}

pub(crate) async fn get_project_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    AxumPath(raw_id): AxumPath<String>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    let id = match ProjectId::parse(&raw_id) {
        Ok(v) => v,
        Err(_) => {
            let err = ApiError::invalid_param("id", &raw_id);
            return with_request_id(api_error_response(StatusCode::BAD_REQUEST, err), &request_id);
        }
    };

    let dir = state.config.projects_dir.clone();
    let lookup_id = id.clone();
    let load = tokio::task::spawn_blocking(move || load_project(&dir, &lookup_id));
    let found = match timeout(state.config.request_timeout, load).await {
        Ok(Ok(Ok(found))) => found,
        Ok(Ok(Err(err))) => {
            error!(request_id = %request_id, error = %err, "project store failure");
            return with_request_id(
                StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                &request_id,
            );
        }
        Ok(Err(join_err)) => {
            error!(request_id = %request_id, error = %join_err, "loader task failed");
            return with_request_id(
                StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                &request_id,
            );
        }
        Err(_) => {
            let err = ApiError::new(ApiErrorCode::Timeout, "request timed out", json!({}));
            return with_request_id(api_error_response(StatusCode::GATEWAY_TIMEOUT, err), &request_id);
        }
    };

    let Some(project) = found else {
        return with_request_id(
            api_error_response(StatusCode::NOT_FOUND, ApiError::not_found(id.as_str())),
            &request_id,
        );
    };

    let bytes = serde_json::to_vec(&project).unwrap_or_default();
    let etag = format!("\"{}\"", sha256_hex(&bytes));
    if if_none_match(&headers).as_deref() == Some(etag.as_str()) {
        let mut not_modified = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(not_modified.headers_mut(), state.config.listing_ttl, &etag);
        return with_request_id(not_modified, &request_id);
    }
    let mut response = Json(project).into_response();
    put_cache_headers(response.headers_mut(), state.config.listing_ttl, &etag);
    with_request_id(response, &request_id)
}
