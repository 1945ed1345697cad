//! Template identifiers and candidate path generation.
//!
//! A [`TemplateQuery`] describes what to look for: a base name, an optional
//! prefix (namespace directory), the acceptable formats and whether the
//! template is a partial. It expands into an ordered list of candidate file
//! names that every view path root is checked for.
//!
//! File names follow `<prefix>/<name>.<format><ext>`, e.g.
//! `me3/formatted.html.jinja`. The format segment is optional.

/// Recognized template handler extensions in priority order.
///
/// When a template exists with several handler extensions, the one appearing
/// earlier in this list wins.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".txt"];

/// A template lookup request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    name: String,
    prefix: Option<String>,
    formats: Vec<String>,
    partial: bool,
    exact_formats: bool,
}

/// One file name to try, with the format it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) identifier: String,
    pub(crate) format: Option<String>,
}

impl TemplateQuery {
    /// Creates a query for `name` with no prefix and no formats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the namespace prefix. Empty prefixes are ignored.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_matches('/');
        self.prefix = (!prefix.is_empty()).then(|| prefix.to_string());
        self
    }

    /// Sets the optional namespace prefix.
    pub fn maybe_prefix(self, prefix: Option<impl Into<String>>) -> Self {
        match prefix {
            Some(prefix) => self.prefix(prefix),
            None => self,
        }
    }

    /// Sets the acceptable formats, in order of preference.
    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the query as a partial lookup (`_name`).
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Restricts the lookup to the requested formats.
    ///
    /// With no formats requested, only formatless files then match; a
    /// `name.<format><ext>` variant is no longer accepted in their place.
    pub fn exact_formats(mut self, exact: bool) -> Self {
        self.exact_formats = exact;
        self
    }

    /// The base name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace prefix, if any.
    pub fn prefix_segment(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The requested formats.
    pub fn requested_formats(&self) -> &[String] {
        &self.formats
    }

    /// Whether this is a partial lookup.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// The candidate path without format or handler extension
    /// (e.g. `"me3/index"`, `"posts/_form"`).
    pub fn path(&self) -> String {
        let (dir, stem) = match self.name.rsplit_once('/') {
            Some((dir, stem)) => (Some(dir), stem),
            None => (None, self.name.as_str()),
        };

        let mut path = String::new();
        if let Some(prefix) = &self.prefix {
            path.push_str(prefix);
            path.push('/');
        }
        if let Some(dir) = dir {
            path.push_str(dir);
            path.push('/');
        }
        if self.partial && !stem.starts_with('_') {
            path.push('_');
        }
        path.push_str(stem);
        path
    }

    /// Whether the name already carries a handler extension.
    pub fn has_extension(&self) -> bool {
        handler_extension(&self.name).is_some()
    }

    /// Whether a template in any format is acceptable.
    pub(crate) fn accepts_any_format(&self) -> bool {
        self.formats.is_empty() && !self.has_extension() && !self.exact_formats
    }

    /// Expands the query into file names to try, in preference order.
    pub(crate) fn candidates(&self) -> Vec<Candidate> {
        let path = self.path();

        if self.has_extension() {
            let format = format_of(&path);
            return vec![Candidate {
                identifier: path,
                format,
            }];
        }

        let mut candidates = Vec::with_capacity((self.formats.len() + 1) * TEMPLATE_EXTENSIONS.len());
        for format in &self.formats {
            for ext in TEMPLATE_EXTENSIONS {
                candidates.push(Candidate {
                    identifier: format!("{path}.{format}{ext}"),
                    format: Some(format.clone()),
                });
            }
        }
        for ext in TEMPLATE_EXTENSIONS {
            candidates.push(Candidate {
                identifier: format!("{path}{ext}"),
                format: None,
            });
        }
        candidates
    }
}

/// Returns the handler extension `name` ends with, if recognized.
pub(crate) fn handler_extension(name: &str) -> Option<&'static str> {
    TEMPLATE_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| name.ends_with(ext) && name.len() > ext.len())
}

/// Priority of the handler extension of `name` (lower wins).
pub(crate) fn extension_priority(name: &str) -> usize {
    TEMPLATE_EXTENSIONS
        .iter()
        .position(|ext| name.ends_with(ext))
        .unwrap_or(usize::MAX)
}

/// Extracts the format segment from an identifier such as `"me3/formatted.html.jinja"`.
pub(crate) fn format_of(identifier: &str) -> Option<String> {
    let without_ext = match handler_extension(identifier) {
        Some(ext) => &identifier[..identifier.len() - ext.len()],
        None => identifier,
    };
    let file = without_ext.rsplit('/').next().unwrap_or(without_ext);
    file.rsplit_once('.')
        .map(|(_, format)| format)
        .filter(|format| !format.is_empty())
        .map(str::to_string)
}

/// If `file_name` is `"<stem>.<format><ext>"`, returns the format.
pub(crate) fn format_variant_of(file_name: &str, stem: &str) -> Option<String> {
    let rest = file_name.strip_prefix(stem)?.strip_prefix('.')?;
    let ext = handler_extension(rest)?;
    let format = &rest[..rest.len() - ext.len()];
    (!format.is_empty() && !format.contains('.')).then(|| format.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identifiers(query: &TemplateQuery) -> Vec<String> {
        query.candidates().into_iter().map(|c| c.identifier).collect()
    }

    #[test]
    fn test_path_plain() {
        assert_eq!(TemplateQuery::new("index").path(), "index");
    }

    #[test]
    fn test_path_with_prefix() {
        let query = TemplateQuery::new("index").prefix("me3");
        assert_eq!(query.path(), "me3/index");
    }

    #[test]
    fn test_empty_prefix_ignored() {
        let query = TemplateQuery::new("index").prefix("");
        assert_eq!(query.prefix_segment(), None);
        assert_eq!(query.path(), "index");
    }

    #[test]
    fn test_path_partial() {
        let query = TemplateQuery::new("form").prefix("posts").partial(true);
        assert_eq!(query.path(), "posts/_form");

        let nested = TemplateQuery::new("shared/header").partial(true);
        assert_eq!(nested.path(), "shared/_header");
    }

    #[test]
    fn test_candidates_without_formats() {
        let query = TemplateQuery::new("index");
        assert_eq!(
            identifiers(&query),
            vec!["index.jinja", "index.jinja2", "index.j2", "index.txt"]
        );
        assert!(query.accepts_any_format());
    }

    #[test]
    fn test_exact_formats_rejects_format_variants() {
        let query = TemplateQuery::new("application").exact_formats(true);
        assert!(!query.accepts_any_format());
        assert!(identifiers(&query).iter().all(|id| format_of(id).is_none()));
    }

    #[test]
    fn test_candidates_prefer_format_over_formatless() {
        let query = TemplateQuery::new("formatted").prefix("me3").formats(["html"]);
        let ids = identifiers(&query);
        assert_eq!(ids[0], "me3/formatted.html.jinja");
        assert_eq!(ids[4], "me3/formatted.jinja");
        assert_eq!(ids.len(), 8);
        assert!(!query.accepts_any_format());
    }

    #[test]
    fn test_candidates_follow_format_order() {
        let query = TemplateQuery::new("show").formats(["json", "html"]);
        let candidates = query.candidates();
        assert_eq!(candidates[0].format.as_deref(), Some("json"));
        assert_eq!(candidates[4].format.as_deref(), Some("html"));
        assert_eq!(candidates[8].format, None);
    }

    #[test]
    fn test_candidates_explicit_extension() {
        let query = TemplateQuery::new("index.html.jinja").formats(["json"]);
        let candidates = query.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].identifier, "index.html.jinja");
        assert_eq!(candidates[0].format.as_deref(), Some("html"));
    }

    #[test]
    fn test_format_of() {
        assert_eq!(format_of("me3/formatted.html.jinja").as_deref(), Some("html"));
        assert_eq!(format_of("me3/index.jinja"), None);
        assert_eq!(format_of("v1.2/index.jinja"), None);
    }

    #[test]
    fn test_format_variant_of() {
        assert_eq!(format_variant_of("index.html.j2", "index").as_deref(), Some("html"));
        assert_eq!(format_variant_of("index.jinja", "index"), None);
        assert_eq!(format_variant_of("index_old.html.jinja", "index"), None);
        assert_eq!(format_variant_of("index.a.b.jinja", "index"), None);
    }

    #[test]
    fn test_extension_priority() {
        assert_eq!(extension_priority("a.jinja"), 0);
        assert_eq!(extension_priority("a.txt"), 3);
        assert_eq!(extension_priority("a.xyz"), usize::MAX);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_candidate_is_a_template_file(
                name in "[a-z_]{1,12}",
                prefix in "[a-z]{0,6}",
                formats in proptest::collection::vec("[a-z]{2,5}", 0..3),
            ) {
                let query = TemplateQuery::new(name).prefix(prefix).formats(formats.clone());
                let candidates = query.candidates();
                prop_assert_eq!(candidates.len(), (formats.len() + 1) * TEMPLATE_EXTENSIONS.len());
                for candidate in &candidates {
                    prop_assert!(handler_extension(&candidate.identifier).is_some());
                    prop_assert!(candidate.identifier.starts_with(&query.path()));
                    prop_assert_eq!(format_of(&candidate.identifier), candidate.format.clone());
                }
            }
        }
    }
}
