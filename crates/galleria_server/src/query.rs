//! Query-string contracts and link building
//!
//! Every page link carries the full set of view parameters so URLs
//! stay shareable between devices; the server keeps no per-client
//! view state.

use galleria_core::{GalleryConfig, SortDir, SortField, SortSpec, ViewMode};
use galleria_fs::RelPath;
use serde::Deserialize;

/// Parameters accepted by the gallery page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub path: String,
    pub sort: Option<SortField>,
    pub dir: Option<SortDir>,
    pub hidden: Option<bool>,
    pub view: Option<ViewMode>,
}

/// Parameters accepted by the viewer page.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub path: String,
    pub i: Option<i64>,
    pub sort: Option<SortField>,
    pub dir: Option<SortDir>,
    pub hidden: Option<bool>,
}

/// Parameters accepted by the raw byte endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
    pub hidden: Option<bool>,
}

/// Parameters for allow-list browsing and activation.
#[derive(Debug, Deserialize)]
pub struct RootsQuery {
    pub base: usize,
    #[serde(default)]
    pub path: String,
}

/// Fully resolved view parameters; query values win over the
/// configured defaults.
#[derive(Debug, Clone)]
pub struct ViewParams {
    pub path: RelPath,
    pub sort: SortSpec,
    pub hidden: bool,
    pub view: ViewMode,
}

impl ListingQuery {
    pub fn resolve(&self, defaults: &GalleryConfig) -> ViewParams {
        ViewParams {
            path: RelPath::normalize(&self.path),
            sort: SortSpec {
                field: self.sort.unwrap_or(defaults.sort_field),
                dir: self.dir.unwrap_or(defaults.sort_dir),
            },
            hidden: self.hidden.unwrap_or(defaults.show_hidden),
            view: self.view.unwrap_or(defaults.view_mode),
        }
    }
}

impl ViewQuery {
    pub fn resolve(&self, defaults: &GalleryConfig) -> (ViewParams, i64) {
        let listing = ListingQuery {
            path: self.path.clone(),
            sort: self.sort,
            dir: self.dir,
            hidden: self.hidden,
            view: None,
        };
        (listing.resolve(defaults), self.i.unwrap_or(0))
    }
}

impl ViewParams {
    /// Gallery link for `target`, carrying this request's settings.
    pub fn gallery_url(&self, target: &RelPath) -> String {
        format!(
            "/?{}",
            encode_pairs(&[
                ("path", target.as_str()),
                ("sort", field_str(self.sort.field)),
                ("dir", dir_str(self.sort.dir)),
                ("hidden", bool_str(self.hidden)),
                ("view", view_str(self.view)),
            ])
        )
    }

    /// Viewer link for image `index` of the current directory.
    pub fn view_url(&self, index: usize) -> String {
        format!(
            "/view?{}",
            encode_pairs(&[
                ("path", self.path.as_str()),
                ("i", &index.to_string()),
                ("sort", field_str(self.sort.field)),
                ("dir", dir_str(self.sort.dir)),
                ("hidden", bool_str(self.hidden)),
            ])
        )
    }

    /// Byte-serving link for one file of the current directory.
    pub fn raw_url(&self, name: &str) -> String {
        format!(
            "/raw?{}",
            encode_pairs(&[
                ("path", self.path.as_str()),
                ("name", name),
                ("hidden", bool_str(self.hidden)),
            ])
        )
    }

    /// Header control behavior: picking the current field flips the
    /// direction, picking the other field starts ascending.
    pub fn with_sort(&self, field: SortField) -> Self {
        let mut out = self.clone();
        if out.sort.field == field {
            out.sort.dir = match out.sort.dir {
                SortDir::Asc => SortDir::Desc,
                SortDir::Desc => SortDir::Asc,
            };
        } else {
            out.sort.field = field;
            out.sort.dir = SortDir::Asc;
        }
        out
    }

    pub fn with_view(&self, view: ViewMode) -> Self {
        let mut out = self.clone();
        out.view = view;
        out
    }

    pub fn with_hidden(&self, hidden: bool) -> Self {
        let mut out = self.clone();
        out.hidden = hidden;
        out
    }
}

/// Clamp a requested viewer index into the sequence bounds.
pub fn clamp_index(requested: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    requested.clamp(0, len as i64 - 1) as usize
}

/// Allow-list drill-down link.
pub fn browse_url(base: usize, path: &RelPath) -> String {
    format!(
        "/roots/browse?{}",
        encode_pairs(&[("base", &base.to_string()), ("path", path.as_str())])
    )
}

/// Allow-list activation link.
pub fn set_root_url(base: usize, path: &RelPath) -> String {
    format!(
        "/roots/set?{}",
        encode_pairs(&[("base", &base.to_string()), ("path", path.as_str())])
    )
}

fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(&urlencoding::encode(value));
    }
    out
}

fn field_str(field: SortField) -> &'static str {
    match field {
        SortField::Name => "name",
        SortField::Size => "size",
    }
}

fn dir_str(dir: SortDir) -> &'static str {
    match dir {
        SortDir::Asc => "asc",
        SortDir::Desc => "desc",
    }
}

fn view_str(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Thumbs => "thumbs",
        ViewMode::List => "list",
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
