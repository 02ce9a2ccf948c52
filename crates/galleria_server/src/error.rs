//! HTTP-facing error taxonomy
//!
//! Every failed request renders a small friendly page with a link
//! back to the gallery, so a phone user is never stuck on a bare
//! status line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use galleria_core::GalleryError;
use galleria_fs::FsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type PageResult<T> = std::result::Result<T, PageError>;

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Forbidden(_) => StatusCode::FORBIDDEN,
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FsError> for PageError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::Traversal(path) => PageError::Forbidden(path),
            FsError::NotFound(path) => PageError::NotFound(path),
            FsError::Io(e) => PageError::Internal(e.into()),
        }
    }
}

impl From<GalleryError> for PageError {
    fn from(err: GalleryError) -> Self {
        match err {
            GalleryError::Fs(e) => e.into(),
            GalleryError::NotFound(path) => PageError::NotFound(path),
            GalleryError::Forbidden(path) => PageError::Forbidden(path),
            GalleryError::NoRoots => {
                PageError::Internal(anyhow::anyhow!("no serving roots configured"))
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self:?}");
        } else {
            tracing::warn!("request rejected: {self}");
        }
        (status, crate::render::error_page(status, &self.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PageError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PageError::Forbidden("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PageError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PageError::Internal(anyhow::anyhow!("x")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_traversal_maps_to_forbidden() {
        let err = GalleryError::Fs(FsError::Traversal("evil".into()));
        assert_eq!(PageError::from(err).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_listing_maps_to_not_found() {
        let err = GalleryError::NotFound("gone.jpg".into());
        assert_eq!(PageError::from(err).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_disallowed_root_maps_to_forbidden() {
        let err = GalleryError::Forbidden("/outside".into());
        assert_eq!(PageError::from(err).status(), StatusCode::FORBIDDEN);
    }
}
