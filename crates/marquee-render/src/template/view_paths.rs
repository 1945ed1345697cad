//! View path roots and template resolution.
//!
//! [`ViewPaths`] is the ordered list of roots searched for templates. Roots
//! are either filesystem directories or embedded in-memory template sets.
//!
//! # Resolution
//!
//! For every root, in declared order, the query's candidates are tried
//! (format-specific names first, then the formatless default). The first
//! hit wins. When the query accepts any format, a root that has no
//! formatless template may still match a `name.<format><ext>` variant.
//!
//! # Lifecycle
//!
//! View paths are assembled while controller types are defined (typically
//! inside a `once_cell::sync::Lazy`) and only read afterwards. Subtypes call
//! [`ViewPaths::inherit`] and append their own roots; the parent's order is
//! preserved.
//!
//! ```rust
//! use marquee_render::{TemplateQuery, ViewPaths, ViewRoot};
//!
//! let base = ViewPaths::new().append(ViewRoot::embedded(&[
//!     ("index.jinja", "Hello from index"),
//!     ("me3/formatted.html.jinja", "Hello from me3/formatted.html"),
//! ]));
//!
//! let found = base
//!     .find_template(&TemplateQuery::new("formatted").prefix("me3").formats(["html"]))
//!     .unwrap();
//! assert_eq!(found.identifier(), "me3/formatted.html.jinja");
//! assert_eq!(found.format(), Some("html"));
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::query::{extension_priority, format_variant_of, handler_extension, TemplateQuery};
use crate::error::RenderError;

/// Where a resolved template's content lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Content stored in memory (embedded roots).
    Inline(Arc<str>),
    /// Content read from disk when rendered.
    File(PathBuf),
}

/// A template found by [`ViewPaths::find_template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    identifier: String,
    format: Option<String>,
    source: TemplateSource,
}

impl ResolvedTemplate {
    /// Creates a resolved template handle.
    pub fn new(identifier: impl Into<String>, format: Option<String>, source: TemplateSource) -> Self {
        Self {
            identifier: identifier.into(),
            format,
            source,
        }
    }

    /// Creates an in-memory template handle; the format is read from the identifier.
    pub fn inline(identifier: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        let identifier = identifier.into();
        let format = super::query::format_of(&identifier);
        Self::new(identifier, format, TemplateSource::Inline(content.into()))
    }

    /// Root-relative identifier, e.g. `"me3/formatted.html.jinja"`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The format segment of the file name, if any.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Where the content lives.
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Returns the template content, reading from disk for file templates.
    ///
    /// File templates are read on every call, so edits show up without a restart.
    pub fn content(&self) -> Result<Cow<'_, str>, RenderError> {
        match &self.source {
            TemplateSource::Inline(content) => Ok(Cow::Borrowed(&**content)),
            TemplateSource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| RenderError::ReadError {
                    path: path.clone(),
                    message: e.to_string(),
                }),
        }
    }
}

/// A single search root.
#[derive(Clone)]
pub enum ViewRoot {
    /// A directory on disk.
    Directory(PathBuf),
    /// Templates keyed by root-relative name including extension.
    Embedded(Arc<BTreeMap<String, Arc<str>>>),
}

impl ViewRoot {
    /// A directory root.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        ViewRoot::Directory(path.into())
    }

    /// An embedded root built from `(name_with_ext, content)` pairs.
    pub fn embedded(entries: &[(&str, &str)]) -> Self {
        let map: BTreeMap<String, Arc<str>> = entries
            .iter()
            .map(|(name, content)| (name.trim_start_matches('/').to_string(), Arc::from(*content)))
            .collect();
        ViewRoot::Embedded(Arc::new(map))
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            ViewRoot::Directory(path) => path.display().to_string(),
            ViewRoot::Embedded(map) => format!("<embedded: {} templates>", map.len()),
        }
    }

    fn lookup(&self, identifier: &str) -> Option<TemplateSource> {
        if !is_safe_identifier(identifier) {
            return None;
        }
        match self {
            ViewRoot::Directory(dir) => {
                let path = dir.join(identifier);
                path.is_file().then_some(TemplateSource::File(path))
            }
            ViewRoot::Embedded(map) => map
                .get(identifier)
                .map(|content| TemplateSource::Inline(content.clone())),
        }
    }

    /// Finds any `path.<format><ext>` variant, preferring handler extension
    /// priority and then name order.
    fn lookup_any_format(&self, path: &str) -> Option<(String, String, TemplateSource)> {
        if !is_safe_identifier(path) {
            return None;
        }
        let (dir, stem) = match path.rsplit_once('/') {
            Some((dir, stem)) => (Some(dir), stem),
            None => (None, path),
        };

        let mut matches: Vec<(String, String)> = match self {
            ViewRoot::Directory(root) => {
                let search_dir = match dir {
                    Some(dir) => root.join(dir),
                    None => root.clone(),
                };
                let entries = std::fs::read_dir(&search_dir).ok()?;
                entries
                    .filter_map(Result::ok)
                    .filter(|entry| entry.path().is_file())
                    .filter_map(|entry| entry.file_name().into_string().ok())
                    .filter_map(|name| format_variant_of(&name, stem).map(|format| (name, format)))
                    .collect()
            }
            ViewRoot::Embedded(map) => map
                .keys()
                .filter_map(|key| {
                    let (key_dir, file) = match key.rsplit_once('/') {
                        Some((d, f)) => (Some(d), f),
                        None => (None, key.as_str()),
                    };
                    (key_dir == dir)
                        .then(|| format_variant_of(file, stem).map(|format| (file.to_string(), format)))
                        .flatten()
                })
                .collect(),
        };

        matches.sort_by(|a, b| {
            extension_priority(&a.0)
                .cmp(&extension_priority(&b.0))
                .then_with(|| a.0.cmp(&b.0))
        });
        let (file, format) = matches.into_iter().next()?;

        let identifier = match dir {
            Some(dir) => format!("{dir}/{file}"),
            None => file,
        };
        let source = self.lookup(&identifier)?;
        Some((identifier, format, source))
    }
}

impl fmt::Debug for ViewRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewRoot::Directory(path) => f.debug_tuple("Directory").field(path).finish(),
            ViewRoot::Embedded(map) => f
                .debug_struct("Embedded")
                .field("templates", &map.len())
                .finish(),
        }
    }
}

impl From<PathBuf> for ViewRoot {
    fn from(path: PathBuf) -> Self {
        ViewRoot::Directory(path)
    }
}

impl From<&Path> for ViewRoot {
    fn from(path: &Path) -> Self {
        ViewRoot::Directory(path.to_path_buf())
    }
}

impl From<&str> for ViewRoot {
    fn from(path: &str) -> Self {
        ViewRoot::Directory(PathBuf::from(path))
    }
}

/// Rejects identifiers that would escape their root.
fn is_safe_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.starts_with('/')
        && !identifier.contains('\\')
        && identifier.split('/').all(|seg| !seg.is_empty() && seg != "..")
}

/// Ordered list of view path roots.
#[derive(Debug, Clone, Default)]
pub struct ViewPaths {
    roots: Vec<ViewRoot>,
}

impl ViewPaths {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies this list for a subtype, which may then add its own roots.
    pub fn inherit(&self) -> Self {
        self.clone()
    }

    /// Adds a root at the end (searched last).
    pub fn append(mut self, root: impl Into<ViewRoot>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Adds a root at the front (searched first).
    pub fn prepend(mut self, root: impl Into<ViewRoot>) -> Self {
        self.roots.insert(0, root.into());
        self
    }

    /// The roots in search order.
    pub fn roots(&self) -> &[ViewRoot] {
        &self.roots
    }

    /// Number of roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns true when no roots are configured.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Resolves a template.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingTemplate`] if no root holds a match.
    pub fn find_template(&self, query: &TemplateQuery) -> Result<ResolvedTemplate, RenderError> {
        let candidates = query.candidates();

        for root in &self.roots {
            for candidate in &candidates {
                if let Some(source) = root.lookup(&candidate.identifier) {
                    tracing::debug!(
                        template = %candidate.identifier,
                        root = %root.describe(),
                        "resolved template"
                    );
                    return Ok(ResolvedTemplate::new(
                        candidate.identifier.clone(),
                        candidate.format.clone(),
                        source,
                    ));
                }
                tracing::trace!(candidate = %candidate.identifier, root = %root.describe(), "miss");
            }

            if query.accepts_any_format() {
                if let Some((identifier, format, source)) = root.lookup_any_format(&query.path()) {
                    tracing::debug!(template = %identifier, root = %root.describe(), "resolved template");
                    return Ok(ResolvedTemplate::new(identifier, Some(format), source));
                }
            }
        }

        Err(RenderError::MissingTemplate {
            path: query.path(),
            formats: query.requested_formats().to_vec(),
            searched: self.roots.iter().map(ViewRoot::describe).collect(),
        })
    }

    /// Returns true if [`find_template`](Self::find_template) would succeed.
    pub fn exists(&self, query: &TemplateQuery) -> bool {
        self.find_template(query).is_ok()
    }
}

/// Returns true when `name` ends with a recognized handler extension.
pub fn is_template_file(name: &str) -> bool {
    handler_extension(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn embedded_views() -> ViewPaths {
        ViewPaths::new().append(ViewRoot::embedded(&[
            ("index.jinja", "root index"),
            ("me3/index.jinja", "me3 index"),
            ("me3/formatted.html.jinja", "me3 formatted html"),
            ("me3/formatted.jinja", "me3 formatted default"),
            ("me3/only_json.json.jinja", "json only"),
            ("posts/_form.jinja", "form partial"),
        ]))
    }

    #[test]
    fn test_find_plain() {
        let found = embedded_views()
            .find_template(&TemplateQuery::new("index"))
            .unwrap();
        assert_eq!(found.identifier(), "index.jinja");
        assert_eq!(found.format(), None);
        assert_eq!(found.content().unwrap(), "root index");
    }

    #[test]
    fn test_find_with_prefix() {
        let found = embedded_views()
            .find_template(&TemplateQuery::new("index").prefix("me3"))
            .unwrap();
        assert_eq!(found.content().unwrap(), "me3 index");
    }

    #[test]
    fn test_format_match_preferred_over_default() {
        let views = embedded_views();
        let html = views
            .find_template(&TemplateQuery::new("formatted").prefix("me3").formats(["html"]))
            .unwrap();
        assert_eq!(html.identifier(), "me3/formatted.html.jinja");

        let xml = views
            .find_template(&TemplateQuery::new("formatted").prefix("me3").formats(["xml"]))
            .unwrap();
        assert_eq!(xml.identifier(), "me3/formatted.jinja");
        assert_eq!(xml.format(), None);
    }

    #[test]
    fn test_any_format_when_none_requested() {
        let found = embedded_views()
            .find_template(&TemplateQuery::new("only_json").prefix("me3"))
            .unwrap();
        assert_eq!(found.identifier(), "me3/only_json.json.jinja");
        assert_eq!(found.format(), Some("json"));
    }

    #[test]
    fn test_requested_format_must_match() {
        let err = embedded_views()
            .find_template(&TemplateQuery::new("only_json").prefix("me3").formats(["html"]))
            .unwrap_err();
        assert!(err.is_missing_template());
    }

    #[test]
    fn test_partial_lookup() {
        let found = embedded_views()
            .find_template(&TemplateQuery::new("form").prefix("posts").partial(true))
            .unwrap();
        assert_eq!(found.identifier(), "posts/_form.jinja");
    }

    #[test]
    fn test_missing_template_reports_search() {
        let err = embedded_views()
            .find_template(&TemplateQuery::new("nope").prefix("me3"))
            .unwrap_err();
        match err {
            RenderError::MissingTemplate { path, searched, .. } => {
                assert_eq!(path, "me3/nope");
                assert_eq!(searched, vec!["<embedded: 6 templates>"]);
            }
            other => panic!("expected MissingTemplate, got {other:?}"),
        }
    }

    #[test]
    fn test_escaping_identifiers_rejected() {
        let views = embedded_views();
        assert!(!views.exists(&TemplateQuery::new("../index")));
        assert!(!views.exists(&TemplateQuery::new("index").prefix("me3/..")));
    }

    #[test]
    fn test_roots_searched_in_declared_order() {
        let parent = ViewPaths::new().append(ViewRoot::embedded(&[("index.jinja", "parent")]));
        let child = parent
            .inherit()
            .append(ViewRoot::embedded(&[("index.jinja", "child"), ("extra.jinja", "extra")]));

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);

        let found = child.find_template(&TemplateQuery::new("index")).unwrap();
        assert_eq!(found.content().unwrap(), "parent");
        let extra = child.find_template(&TemplateQuery::new("extra")).unwrap();
        assert_eq!(extra.content().unwrap(), "extra");
        assert!(!parent.exists(&TemplateQuery::new("extra")));
    }

    #[test]
    fn test_prepend_searched_first() {
        let views = ViewPaths::new()
            .append(ViewRoot::embedded(&[("index.jinja", "appended")]))
            .prepend(ViewRoot::embedded(&[("index.jinja", "prepended")]));
        let found = views.find_template(&TemplateQuery::new("index")).unwrap();
        assert_eq!(found.content().unwrap(), "prepended");
    }

    #[test]
    fn test_directory_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("me3")).unwrap();
        fs::write(dir.path().join("me3/index.jinja"), "Hello from me3/index").unwrap();
        fs::write(dir.path().join("me3/show.html.j2"), "html show").unwrap();
        fs::write(dir.path().join("me3/show.json.jinja"), "json show").unwrap();

        let views = ViewPaths::new().append(dir.path());

        let index = views
            .find_template(&TemplateQuery::new("index").prefix("me3"))
            .unwrap();
        assert!(matches!(index.source(), TemplateSource::File(_)));
        assert_eq!(index.content().unwrap(), "Hello from me3/index");

        // .jinja outranks .j2 when any format will do
        let show = views
            .find_template(&TemplateQuery::new("show").prefix("me3"))
            .unwrap();
        assert_eq!(show.identifier(), "me3/show.json.jinja");
    }

    #[test]
    fn test_file_template_read_error() {
        let missing = ResolvedTemplate::new(
            "gone.jinja",
            None,
            TemplateSource::File(PathBuf::from("/definitely/not/here/gone.jinja")),
        );
        assert!(matches!(
            missing.content(),
            Err(RenderError::ReadError { .. })
        ));
    }

    #[test]
    fn test_is_template_file() {
        assert!(is_template_file("index.jinja"));
        assert!(is_template_file("index.html.txt"));
        assert!(!is_template_file("index.erb"));
    }

    #[test]
    fn test_view_paths_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ViewPaths>();
    }
}
