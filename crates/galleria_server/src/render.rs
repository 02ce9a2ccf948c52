//! Page templates
//!
//! Every page is a single self-contained HTML document: styles and
//! scripts are compiled into the binary and inlined, so the server
//! needs no static file routes and works offline on the LAN.

use crate::query::{browse_url, set_root_url, ViewParams};
use axum::http::StatusCode;
use galleria_core::{DirListing, GalleryConfig, SortDir, SortField, ViewMode, THUMB_MAX_PX, THUMB_MIN_PX};
use galleria_fs::{FileRecord, RelPath};
use galleria_view::GestureTuning;
use humansize::{format_size, BINARY};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;
use std::path::{Path, PathBuf};

const GALLERY_CSS: &str = include_str!("../assets/gallery.css");
const GALLERY_JS: &str = include_str!("../assets/gallery.js");
const VIEWER_CSS: &str = include_str!("../assets/viewer.css");
const VIEWER_JS: &str = include_str!("../assets/viewer.js");

/// Settings handed to the gallery page script.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GalleryBootstrap {
    thumb_default: u32,
    thumb_min: u32,
    thumb_max: u32,
}

/// Everything the viewer page script needs to run.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewerBootstrap<'a> {
    urls: &'a [String],
    index: usize,
    back_url: &'a str,
    tuning: GestureTuning,
}

/// Serialize a bootstrap value for script embedding. The structs above
/// contain nothing serde can reject, so the fallback is never hit in
/// practice; `null` keeps the page parseable if it ever is.
fn bootstrap_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::error!("bootstrap serialization failed: {e}");
        String::from("null")
    })
}

fn display_path(path: &RelPath) -> String {
    if path.is_root() {
        String::from("/")
    } else {
        format!("/{}", path)
    }
}

fn page_head(title: &str) -> Markup {
    html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1, user-scalable=no";
        title { (title) " · galleria" }
        style { (PreEscaped(GALLERY_CSS)) }
    }
}

fn sort_controls(params: &ViewParams) -> Markup {
    let arrow = match params.sort.dir {
        SortDir::Asc => "↑",
        SortDir::Desc => "↓",
    };
    html! {
        nav class="sort" {
            @for (field, label) in [(SortField::Name, "Name"), (SortField::Size, "Size")] {
                @let here = params.sort.field == field;
                @let class = if here { "btn active" } else { "btn" };
                a class=(class) href=(params.with_sort(field).gallery_url(&params.path)) {
                    (label)
                    @if here { " " (arrow) }
                }
            }
        }
    }
}

fn view_toggle(params: &ViewParams) -> Markup {
    let (label, other) = match params.view {
        ViewMode::Thumbs => ("List", ViewMode::List),
        ViewMode::List => ("Thumbs", ViewMode::Thumbs),
    };
    html! {
        a class="btn" href=(params.with_view(other).gallery_url(&params.path)) { (label) }
    }
}

fn thumb_grid(params: &ViewParams, listing: &DirListing) -> Markup {
    html! {
        div class="grid" id="grid" {
            @if let Some(up) = &listing.up {
                a class="tile folder" href=(params.gallery_url(up)) title="Up" {
                    div class="tile-thumb" { div class="glyph" { "🔙" } }
                    div class="tile-name" { ".. (up)" }
                }
            }
            @for name in &listing.folders {
                a class="tile folder" href=(params.gallery_url(&params.path.join(name))) title=(name) {
                    div class="tile-thumb" { div class="glyph" { "📁" } }
                    div class="tile-name" { (name) }
                }
            }
            @for (idx, file) in listing.files.iter().filter(|f| f.is_image).enumerate() {
                a class="tile" href=(params.view_url(idx)) {
                    div class="tile-thumb" {
                        // Prime the first screenful, lazy-load the rest.
                        img loading=(if idx < 8 { "eager" } else { "lazy" })
                            decoding="async"
                            src=(params.raw_url(&file.name))
                            alt=(file.name);
                    }
                    div class="tile-name" title=(file.name) { (file.name) }
                }
            }
        }
    }
}

fn row_list(params: &ViewParams, listing: &DirListing) -> Markup {
    // Viewer indices count images only, in listing order.
    let mut image_index = 0usize;
    let rows: Vec<(&FileRecord, Option<usize>)> = listing
        .files
        .iter()
        .map(|file| {
            let idx = file.is_image.then(|| {
                let i = image_index;
                image_index += 1;
                i
            });
            (file, idx)
        })
        .collect();

    html! {
        div class="rows" {
            @if let Some(up) = &listing.up {
                a class="row folder" href=(params.gallery_url(up)) {
                    span class="row-name" { "🔙 .. (up)" }
                }
            }
            @for name in &listing.folders {
                a class="row folder" href=(params.gallery_url(&params.path.join(name))) {
                    span class="row-name" { "📁 " (name) }
                }
            }
            @for (file, image_idx) in &rows {
                @if let Some(idx) = image_idx {
                    a class="row" href=(params.view_url(*idx)) {
                        span class="row-name" { "🖼️ " (file.name) }
                        span class="row-size" { (format_size(file.size, BINARY)) }
                    }
                } @else {
                    div class="row inert" {
                        span class="row-name" { "📄 " (file.name) }
                        span class="row-size" { (format_size(file.size, BINARY)) }
                    }
                }
            }
        }
    }
}

pub fn gallery_page(
    params: &ViewParams,
    listing: &DirListing,
    abs: &Path,
    defaults: &GalleryConfig,
) -> Markup {
    let shown = display_path(&params.path);
    let boot = bootstrap_json(&GalleryBootstrap {
        thumb_default: defaults.thumbnail_size,
        thumb_min: THUMB_MIN_PX,
        thumb_max: THUMB_MAX_PX,
    });
    let has_entries = listing.up.is_some()
        || !listing.folders.is_empty()
        || match params.view {
            ViewMode::Thumbs => listing.files.iter().any(|f| f.is_image),
            ViewMode::List => !listing.files.is_empty(),
        };

    html! {
        (DOCTYPE)
        html lang="en" {
            head { (page_head(&shown)) }
            body {
                header {
                    div class="title" {
                        "📷 galleria"
                        span class="path" { (shown) }
                    }
                    div class="spacer" {}
                    (sort_controls(params))
                    (view_toggle(params))
                    a class="btn" href="/refresh" title="Rescan this folder tree" { "Rescan" }
                    button class="icon" id="gearBtn" title="Settings" { "⚙️" }
                }

                @if has_entries {
                    @if params.view == ViewMode::List {
                        (row_list(params, listing))
                    } @else {
                        (thumb_grid(params, listing))
                    }
                } @else {
                    div class="empty" { "No images or subfolders here." }
                }

                footer {
                    (abs.display())
                    " · "
                    a href="/roots" { "roots" }
                }

                div class="overlay" id="overlay" {
                    div class="panel" {
                        h3 { "Settings" }
                        div class="field" {
                            label for="thumbRange" { "Thumbnail size" }
                            input type="range" id="thumbRange" min=(THUMB_MIN_PX) max=(THUMB_MAX_PX) step="1";
                            input type="number" id="thumbSize" min=(THUMB_MIN_PX) max=(THUMB_MAX_PX) step="10";
                            span { "px" }
                        }
                        div class="field" {
                            label { "Hidden files" }
                            a class="btn" href=(params.with_hidden(!params.hidden).gallery_url(&params.path)) {
                                @if params.hidden { "Shown" } @else { "Not shown" }
                            }
                        }
                        div class="actions" {
                            button id="closeBtn" { "Close" }
                        }
                    }
                }

                script { (PreEscaped(GALLERY_JS.replace("__SETTINGS__", &boot))) }
            }
        }
    }
}

pub fn viewer_page(params: &ViewParams, images: &[String], index: usize) -> Markup {
    let urls: Vec<String> = images.iter().map(|name| params.raw_url(name)).collect();
    let back_url = params.gallery_url(&params.path);
    let boot = bootstrap_json(&ViewerBootstrap {
        urls: &urls,
        index,
        back_url: &back_url,
        tuning: GestureTuning::default(),
    });

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1, user-scalable=no";
                title { "Viewer · galleria" }
                style { (PreEscaped(VIEWER_CSS)) }
            }
            body {
                div class="stage" id="stage" {
                    div class="layer" {
                        div class="wrap" id="neighborWrap" { img class="viewer" id="neighbor" alt=""; }
                    }
                    div class="layer" {
                        div class="wrap" id="currentWrap" { img class="viewer" id="current" alt=""; }
                    }
                }
                script { (PreEscaped(VIEWER_JS.replace("__BOOTSTRAP__", &boot))) }
            }
        }
    }
}

pub fn roots_page(roots: &[PathBuf], active: &Path) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (page_head("Serving roots")) }
            body {
                header {
                    div class="title" { "📷 galleria" span class="path" { "serving roots" } }
                    div class="spacer" {}
                    a class="btn" href="/" { "Back" }
                }
                div class="rows" {
                    @for (idx, root) in roots.iter().enumerate() {
                        div class="row" {
                            span class="row-name" {
                                @if root.as_path() == active { "● " } @else { "○ " }
                                (root.display())
                            }
                            span class="row-size" {
                                a class="btn" href=(browse_url(idx, &RelPath::root())) { "Browse" }
                                " "
                                a class="btn" href=(set_root_url(idx, &RelPath::root())) { "Activate" }
                            }
                        }
                    }
                }
                footer { "The active root is marked ●. Activating clears all cached listings." }
            }
        }
    }
}

pub fn roots_browse_page(
    base: usize,
    base_path: &Path,
    path: &RelPath,
    folders: &[String],
) -> Markup {
    let shown = display_path(path);
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (page_head(&shown)) }
            body {
                header {
                    div class="title" {
                        "📷 galleria"
                        span class="path" { (base_path.display()) (shown) }
                    }
                    div class="spacer" {}
                    a class="btn" href=(set_root_url(base, path)) { "Serve this folder" }
                    a class="btn" href="/roots" { "Back" }
                }
                div class="rows" {
                    @if let Some(up) = path.parent() {
                        a class="row folder" href=(browse_url(base, &up)) {
                            span class="row-name" { "🔙 .. (up)" }
                        }
                    }
                    @for name in folders {
                        a class="row folder" href=(browse_url(base, &path.join(name))) {
                            span class="row-name" { "📁 " (name) }
                        }
                    }
                    @if folders.is_empty() && path.is_root() {
                        div class="empty" { "No subfolders here." }
                    }
                }
            }
        }
    }
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (page_head(reason)) }
            body {
                div class="notice" {
                    h1 { (status.as_u16()) " " (reason) }
                    p { (message) }
                    p { a class="btn" href="/" { "Back to the gallery" } }
                }
            }
        }
    }
}
