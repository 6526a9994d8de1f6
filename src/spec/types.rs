use crate::validator::ParamValue;
use http::Method;
use regex::Regex;

/// Where a parameter is read from in the incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    /// Captured from a `{name}` segment of the matched path template
    Path,
    /// Read from the decomposed query string (repeated keys preserved)
    Query,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
        }
    }
}

/// Numeric bounds for integer and float parameters.
///
/// Bounds are held as `f64` for both kinds; every bound the tutorial-scale
/// APIs declare (`ge=0`, `le=1000`, `gt=0.0`, `lt=10.5`) is exactly
/// representable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericConstraints {
    pub minimum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
}

impl NumericConstraints {
    /// True when no bound is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
            && self.exclusive_minimum.is_none()
            && self.maximum.is_none()
            && self.exclusive_maximum.is_none()
    }
}

/// A regex constraint compiled once at spec-construction time.
///
/// Full-match semantics: the pattern is wrapped in `^(?:...)$` when compiled,
/// so a pattern without explicit anchors still only accepts the whole value.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub(crate) fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written at spec construction, without the added anchors.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the entire value satisfies the pattern.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Length and pattern constraints for string-valued parameters.
///
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringConstraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

/// The declared shape of a parameter, carrying its constraint payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
    /// Optional sign followed by decimal digits; no whitespace, no fraction
    Integer(NumericConstraints),
    /// Decimal or exponential literal; non-finite values are rejected
    Float(NumericConstraints),
    /// Truthy `{1, true, on, yes}` / falsy `{0, false, off, no}`, case-insensitive
    Boolean,
    /// Raw text, optionally length/pattern constrained
    Str(StringConstraints),
    /// Zero or more repeated occurrences of the same key, each validated
    /// independently against the shared string constraints
    StringList(StringConstraints),
    /// A closed, ordered set of permitted literals, compared case-sensitively
    Enumerated(Vec<String>),
}

impl ParameterKind {
    /// Short name used in coercion errors and docs output.
    #[must_use]
    pub fn expected(&self) -> &'static str {
        match self {
            ParameterKind::Integer(_) => "integer",
            ParameterKind::Float(_) => "float",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Str(_) => "string",
            ParameterKind::StringList(_) => "string list",
            ParameterKind::Enumerated(_) => "enum",
        }
    }
}

/// One declared input for a route.
///
/// Built once at route-registration time via [`ParameterSpec::path`] /
/// [`ParameterSpec::query`] and immutable afterwards; every incoming request
/// is validated against the same spec with no shared mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Internal identifier; the key in the bound value map
    pub name: String,
    pub location: ParameterLocation,
    pub kind: ParameterKind,
    /// Mutually exclusive with `default`
    pub required: bool,
    /// Value produced when the parameter is absent from the request
    pub default: Option<ParamValue>,
    /// External name read from the raw input, when it differs from `name`
    pub alias: Option<String>,
    /// Informational only; supplying the parameter logs a warning
    pub deprecated: bool,
    /// Whether documentation consumers should see this parameter.
    /// Never affects the validation outcome.
    pub include_in_docs: bool,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ParameterSpec {
    /// The name read from the raw request: the alias when one is declared,
    /// the internal name otherwise.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A registered route: method, path template, handler identifier, and the
/// parameter set validated on every matched request.
#[derive(Debug, Clone)]
pub struct RouteDef {
    pub method: Method,
    /// Path template, e.g. `/items/{item_id}` or `/files/{file_path:path}`
    pub path_pattern: String,
    /// Handler identifier reported in matches and docs output
    pub name: String,
    pub params: Vec<ParameterSpec>,
}

impl RouteDef {
    /// Parameters a documentation consumer should see.
    pub fn documented_params(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.params.iter().filter(|p| p.include_in_docs)
    }
}
