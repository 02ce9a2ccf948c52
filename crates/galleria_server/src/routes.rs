//! Route table and request handlers
//!
//! Directory scans hit the disk, so they run under `spawn_blocking`;
//! raw image bytes stream straight from `tokio::fs` without loading
//! whole files. A listing entry that vanishes between the scan and
//! the fetch surfaces as 404, never a crash.

use crate::error::{PageError, PageResult};
use crate::query::{clamp_index, ListingQuery, RawQuery, RootsQuery, ViewQuery};
use crate::render;
use crate::state::SharedState;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use galleria_core::{build_listing, DirListing};
use galleria_fs::{scan_dir, RelPath};
use maud::Markup;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(gallery))
        .route("/view", get(viewer))
        .route("/raw", get(raw))
        .route("/refresh", get(refresh))
        .route("/roots", get(roots))
        .route("/roots/browse", get(roots_browse))
        .route("/roots/set", get(roots_set))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn gallery(
    State(state): State<SharedState>,
    Query(query): Query<ListingQuery>,
) -> PageResult<Markup> {
    let params = query.resolve(&state.defaults);
    let abs = state.gallery.resolve_dir(&params.path)?;

    let listing = {
        let state = Arc::clone(&state);
        let params = params.clone();
        tokio::task::spawn_blocking(move || -> galleria_core::Result<DirListing> {
            let scanned = state.gallery.scan(&params.path, params.hidden)?;
            Ok(build_listing(&params.path, &scanned, params.sort))
        })
        .await
        .map_err(anyhow::Error::from)??
    };

    Ok(render::gallery_page(&params, &listing, &abs, &state.defaults))
}

async fn viewer(
    State(state): State<SharedState>,
    Query(query): Query<ViewQuery>,
) -> PageResult<Response> {
    let (params, requested) = query.resolve(&state.defaults);

    let images = {
        let state = Arc::clone(&state);
        let params = params.clone();
        tokio::task::spawn_blocking(move || {
            state
                .gallery
                .image_sequence(&params.path, params.hidden, params.sort)
        })
        .await
        .map_err(anyhow::Error::from)??
    };

    // Nothing to view: back to the gallery rather than a dead end.
    if images.is_empty() {
        return Ok(Redirect::to(&params.gallery_url(&params.path)).into_response());
    }

    let index = clamp_index(requested, images.len());
    Ok(render::viewer_page(&params, &images, index).into_response())
}

async fn raw(
    State(state): State<SharedState>,
    Query(query): Query<RawQuery>,
) -> PageResult<Response> {
    if query.name.is_empty() {
        return Err(PageError::BadRequest("missing file name".into()));
    }
    let path = RelPath::normalize(&query.path);
    let hidden = query.hidden.unwrap_or(state.defaults.show_hidden);

    let abs = {
        let state = Arc::clone(&state);
        let name = query.name.clone();
        tokio::task::spawn_blocking(move || state.gallery.raw_image_path(&path, &name, hidden))
            .await
            .map_err(anyhow::Error::from)??
    };

    let file = match tokio::fs::File::open(&abs).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PageError::NotFound(query.name));
        }
        Err(e) => return Err(PageError::Internal(e.into())),
    };
    let metadata = file.metadata().await.map_err(anyhow::Error::from)?;

    let mime = mime_guess::from_path(&abs).first_or_octet_stream();
    let stream = ReaderStream::with_capacity(file, 1 << 18);
    let body = Body::from_stream(stream);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(mime.as_ref())
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_LENGTH,
        HeaderValue::from_str(&metadata.len().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("0")),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("private, max-age=3600"),
    );

    Ok((headers, body).into_response())
}

async fn refresh(State(state): State<SharedState>, headers: HeaderMap) -> Redirect {
    state.gallery.invalidate();
    info!("rescan requested");
    let back = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/");
    Redirect::to(back)
}

async fn roots(State(state): State<SharedState>) -> Markup {
    let active = state.gallery.active_root();
    render::roots_page(state.gallery.allowed_roots(), &active)
}

async fn roots_browse(
    State(state): State<SharedState>,
    Query(query): Query<RootsQuery>,
) -> PageResult<Markup> {
    let Some(base) = state.gallery.allowed_roots().get(query.base).cloned() else {
        return Err(PageError::BadRequest(format!(
            "no allowed root #{}",
            query.base
        )));
    };
    let path = RelPath::normalize(&query.path);
    let abs = path.resolve(&base)?;

    let folders = tokio::task::spawn_blocking(move || scan_dir(&abs, false).folders)
        .await
        .map_err(anyhow::Error::from)?;

    Ok(render::roots_browse_page(query.base, &base, &path, &folders))
}

async fn roots_set(
    State(state): State<SharedState>,
    Query(query): Query<RootsQuery>,
) -> PageResult<Redirect> {
    let Some(base) = state.gallery.allowed_roots().get(query.base).cloned() else {
        return Err(PageError::BadRequest(format!(
            "no allowed root #{}",
            query.base
        )));
    };
    let candidate = RelPath::normalize(&query.path).resolve(&base)?;

    {
        let state = Arc::clone(&state);
        tokio::task::spawn_blocking(move || state.gallery.set_root(&candidate))
            .await
            .map_err(anyhow::Error::from)??;
    }

    Ok(Redirect::to("/"))
}
