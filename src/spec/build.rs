use super::types::{
    NumericConstraints, ParameterKind, ParameterLocation, ParameterSpec, Pattern, RouteDef,
    StringConstraints,
};
use crate::validator::ParamValue;
use http::Method;
use std::collections::HashSet;
use tracing::debug;

/// Registration-time failure: a parameter or route declaration that can never
/// validate correctly. Surfaced when the spec is built, never per request.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("parameter `{name}` is required and cannot also declare a default")]
    RequiredWithDefault { name: String },
    #[error("default for parameter `{name}` does not match its declared kind ({expected})")]
    DefaultKindMismatch { name: String, expected: &'static str },
    #[error("parameter `{name}`: {reason}")]
    InvalidConstraint { name: String, reason: String },
    #[error("invalid pattern for parameter `{name}`")]
    BadPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid path template `{template}`: {reason}")]
    BadTemplate { template: String, reason: String },
    #[error("route `{route}` ({pattern}): {reason}")]
    PathParamMismatch {
        route: String,
        pattern: String,
        reason: String,
    },
    #[error("duplicate route registration: {method} {pattern} is already handled by `{existing}`")]
    RouteConflict {
        method: Method,
        pattern: String,
        existing: String,
    },
}

/// One parsed segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemplateSegment {
    /// Literal segment matched exactly
    Static(String),
    /// `{name}` capture matching one segment
    Param(String),
    /// `{name:path}` capture consuming the remainder of the path,
    /// slashes included. Only valid as the final segment.
    CatchAll(String),
}

/// Parse a path template into segments, rejecting malformed captures.
pub(crate) fn parse_template(template: &str) -> Result<Vec<TemplateSegment>, SpecError> {
    let bad = |reason: &str| SpecError::BadTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    if !template.starts_with('/') {
        return Err(bad("template must start with '/'"));
    }

    let mut segments = Vec::new();
    for raw in template.split('/').filter(|s| !s.is_empty()) {
        if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            let (name, converter) = match inner.split_once(':') {
                Some((name, conv)) => (name, Some(conv)),
                None => (inner, None),
            };
            if name.is_empty() {
                return Err(bad("capture has an empty name"));
            }
            match converter {
                None => segments.push(TemplateSegment::Param(name.to_string())),
                Some("path") => segments.push(TemplateSegment::CatchAll(name.to_string())),
                Some(other) => {
                    return Err(bad(&format!("unknown converter `{other}`")));
                }
            }
        } else if raw.contains(['{', '}']) {
            return Err(bad(&format!("malformed capture in segment `{raw}`")));
        } else {
            segments.push(TemplateSegment::Static(raw.to_string()));
        }
    }

    // A catch-all swallows the rest of the path, so nothing may follow it.
    if let Some(pos) = segments
        .iter()
        .position(|s| matches!(s, TemplateSegment::CatchAll(_)))
    {
        if pos != segments.len() - 1 {
            return Err(bad("a `{name:path}` capture must be the final segment"));
        }
    }

    Ok(segments)
}

#[derive(Debug, Clone, PartialEq)]
enum KindTag {
    Integer,
    Float,
    Boolean,
    Str,
    StringList,
    Enumerated(Vec<String>),
}

/// Chained declaration of a single parameter, checked by [`finish`].
///
/// Constraint setters may be called in any order relative to the kind setter;
/// `finish` rejects combinations that make no sense (length bounds on an
/// integer, numeric bounds on a string, a default that contradicts the kind).
///
/// [`finish`]: ParameterSpecBuilder::finish
#[derive(Debug, Clone)]
pub struct ParameterSpecBuilder {
    name: String,
    location: ParameterLocation,
    kind: KindTag,
    numeric: NumericConstraints,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
    required: Option<bool>,
    default: Option<ParamValue>,
    alias: Option<String>,
    deprecated: bool,
    include_in_docs: bool,
    title: Option<String>,
    description: Option<String>,
}

impl ParameterSpec {
    /// Declare a parameter captured from the path template.
    ///
    /// Path parameters are always required: a route only matches when every
    /// segment is present, so neither `optional()` nor a default applies.
    #[must_use]
    pub fn path(name: impl Into<String>) -> ParameterSpecBuilder {
        ParameterSpecBuilder::new(name.into(), ParameterLocation::Path)
    }

    /// Declare a parameter read from the query string.
    ///
    /// Query parameters are required unless a default is declared or
    /// [`optional`](ParameterSpecBuilder::optional) is called.
    #[must_use]
    pub fn query(name: impl Into<String>) -> ParameterSpecBuilder {
        ParameterSpecBuilder::new(name.into(), ParameterLocation::Query)
    }
}

impl ParameterSpecBuilder {
    fn new(name: String, location: ParameterLocation) -> Self {
        ParameterSpecBuilder {
            name,
            location,
            kind: KindTag::Str,
            numeric: NumericConstraints::default(),
            min_length: None,
            max_length: None,
            pattern: None,
            required: None,
            default: None,
            alias: None,
            deprecated: false,
            include_in_docs: true,
            title: None,
            description: None,
        }
    }

    #[must_use]
    pub fn integer(mut self) -> Self {
        self.kind = KindTag::Integer;
        self
    }

    #[must_use]
    pub fn float(mut self) -> Self {
        self.kind = KindTag::Float;
        self
    }

    #[must_use]
    pub fn boolean(mut self) -> Self {
        self.kind = KindTag::Boolean;
        self
    }

    #[must_use]
    pub fn string(mut self) -> Self {
        self.kind = KindTag::Str;
        self
    }

    /// Accept zero or more repeated occurrences of the key, collected in
    /// input order.
    #[must_use]
    pub fn string_list(mut self) -> Self {
        self.kind = KindTag::StringList;
        self
    }

    /// Restrict the value to a closed set of literals, compared exactly.
    #[must_use]
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kind = KindTag::Enumerated(values.into_iter().map(Into::into).collect());
        self
    }

    /// Inclusive lower bound (`ge` in the usual shorthand).
    #[must_use]
    pub fn ge(mut self, bound: impl Into<f64>) -> Self {
        self.numeric.minimum = Some(bound.into());
        self
    }

    /// Exclusive lower bound.
    #[must_use]
    pub fn gt(mut self, bound: impl Into<f64>) -> Self {
        self.numeric.exclusive_minimum = Some(bound.into());
        self
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn le(mut self, bound: impl Into<f64>) -> Self {
        self.numeric.maximum = Some(bound.into());
        self
    }

    /// Exclusive upper bound.
    #[must_use]
    pub fn lt(mut self, bound: impl Into<f64>) -> Self {
        self.numeric.exclusive_maximum = Some(bound.into());
        self
    }

    /// Minimum length in characters.
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Maximum length in characters.
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Full-match regex constraint; compiled (and rejected if invalid) by
    /// `finish`, not per request.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    /// Value bound when the parameter is absent. Implies optional.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// External name read from the raw input; the internal name still keys
    /// the bound value map.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark the parameter deprecated. Validation is unchanged; supplying the
    /// parameter logs a warning.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Hide the parameter from documentation consumers.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.include_in_docs = false;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the declaration and produce the immutable [`ParameterSpec`].
    pub fn finish(self) -> Result<ParameterSpec, SpecError> {
        let name = self.name;
        let invalid = |reason: String| SpecError::InvalidConstraint {
            name: name.clone(),
            reason,
        };

        let has_string_constraints =
            self.min_length.is_some() || self.max_length.is_some() || self.pattern.is_some();

        let kind = match self.kind {
            tag @ (KindTag::Integer | KindTag::Float) => {
                if has_string_constraints {
                    return Err(invalid(
                        "length/pattern constraints do not apply to numeric kinds".into(),
                    ));
                }
                check_bounds(&name, &self.numeric)?;
                match tag {
                    KindTag::Integer => ParameterKind::Integer(self.numeric),
                    _ => ParameterKind::Float(self.numeric),
                }
            }
            KindTag::Boolean => {
                if has_string_constraints || !self.numeric.is_empty() {
                    return Err(invalid("boolean parameters accept no constraints".into()));
                }
                ParameterKind::Boolean
            }
            tag @ (KindTag::Str | KindTag::StringList) => {
                if !self.numeric.is_empty() {
                    return Err(invalid(
                        "numeric bounds do not apply to string kinds".into(),
                    ));
                }
                if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
                    if min > max {
                        return Err(invalid(format!(
                            "min_length {min} exceeds max_length {max}"
                        )));
                    }
                }
                let pattern = match self.pattern {
                    Some(src) => Some(Pattern::compile(&src).map_err(|source| {
                        SpecError::BadPattern {
                            name: name.clone(),
                            source,
                        }
                    })?),
                    None => None,
                };
                let constraints = StringConstraints {
                    min_length: self.min_length,
                    max_length: self.max_length,
                    pattern,
                };
                match tag {
                    KindTag::Str => ParameterKind::Str(constraints),
                    _ => ParameterKind::StringList(constraints),
                }
            }
            KindTag::Enumerated(values) => {
                if has_string_constraints || !self.numeric.is_empty() {
                    return Err(invalid(
                        "enum parameters only validate against their allowed values".into(),
                    ));
                }
                if values.is_empty() {
                    return Err(invalid("enum declares an empty set of allowed values".into()));
                }
                ParameterKind::Enumerated(values)
            }
        };

        if self.location == ParameterLocation::Path {
            if self.default.is_some() {
                return Err(invalid("path parameters cannot declare a default".into()));
            }
            if self.required == Some(false) {
                return Err(invalid("path parameters are always required".into()));
            }
        }

        if let Some(default) = &self.default {
            if !default_matches_kind(default, &kind) {
                return Err(SpecError::DefaultKindMismatch {
                    name,
                    expected: kind.expected(),
                });
            }
        }

        let required = match self.location {
            ParameterLocation::Path => true,
            ParameterLocation::Query => self.required.unwrap_or(self.default.is_none()),
        };
        if required && self.default.is_some() {
            return Err(SpecError::RequiredWithDefault { name });
        }

        debug!(
            param = %name,
            location = %self.location,
            kind = kind.expected(),
            required,
            "parameter spec built"
        );

        Ok(ParameterSpec {
            name,
            location: self.location,
            kind,
            required,
            default: self.default,
            alias: self.alias,
            deprecated: self.deprecated,
            include_in_docs: self.include_in_docs,
            title: self.title,
            description: self.description,
        })
    }
}

fn check_bounds(name: &str, numeric: &NumericConstraints) -> Result<(), SpecError> {
    let lower = match (numeric.minimum, numeric.exclusive_minimum) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };
    let upper = match (numeric.maximum, numeric.exclusive_maximum) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    let exclusive = numeric.exclusive_minimum.is_some() || numeric.exclusive_maximum.is_some();
    if let (Some(lo), Some(hi)) = (lower, upper) {
        if lo > hi || (lo == hi && exclusive) {
            return Err(SpecError::InvalidConstraint {
                name: name.to_string(),
                reason: format!("contradictory numeric bounds (lower {lo}, upper {hi})"),
            });
        }
    }
    Ok(())
}

fn default_matches_kind(default: &ParamValue, kind: &ParameterKind) -> bool {
    match kind {
        ParameterKind::Integer(_) => matches!(default, ParamValue::Integer(_)),
        ParameterKind::Float(_) => {
            matches!(default, ParamValue::Float(_) | ParamValue::Integer(_))
        }
        ParameterKind::Boolean => matches!(default, ParamValue::Bool(_)),
        ParameterKind::Str(_) => matches!(default, ParamValue::Str(_)),
        ParameterKind::StringList(_) => matches!(default, ParamValue::List(_)),
        ParameterKind::Enumerated(allowed) => match default {
            ParamValue::Str(s) => allowed.iter().any(|a| a == s),
            _ => false,
        },
    }
}

impl RouteDef {
    /// Build a route, checking that the path template and the declared
    /// path parameters agree: every `{segment}` capture needs exactly one
    /// path-location spec (matched by wire name) and vice versa.
    pub fn new(
        method: Method,
        path_pattern: impl Into<String>,
        name: impl Into<String>,
        params: Vec<ParameterSpec>,
    ) -> Result<Self, SpecError> {
        let path_pattern = path_pattern.into();
        let name = name.into();
        let mismatch = |reason: String| SpecError::PathParamMismatch {
            route: name.clone(),
            pattern: path_pattern.clone(),
            reason,
        };

        let segments = parse_template(&path_pattern)?;
        let mut captures = HashSet::new();
        for segment in &segments {
            if let TemplateSegment::Param(n) | TemplateSegment::CatchAll(n) = segment {
                if !captures.insert(n.as_str()) {
                    return Err(mismatch(format!("duplicate capture `{{{n}}}`")));
                }
            }
        }

        for param in params.iter().filter(|p| p.location == ParameterLocation::Path) {
            if !captures.contains(param.wire_name()) {
                return Err(mismatch(format!(
                    "path parameter `{}` has no `{{{}}}` capture in the template",
                    param.name,
                    param.wire_name()
                )));
            }
        }
        for capture in &captures {
            let declared = params.iter().any(|p| {
                p.location == ParameterLocation::Path && p.wire_name() == *capture
            });
            if !declared {
                return Err(mismatch(format!(
                    "capture `{{{capture}}}` has no declared path parameter"
                )));
            }
        }

        Ok(RouteDef {
            method,
            path_pattern,
            name,
            params,
        })
    }
}
