//! Per-request parameter binding.
//!
//! The binder is the aggregation layer on top of [`validate`]: it walks every
//! declared parameter of the matched route, pulls the raw occurrences from
//! the path captures or the query map (under the alias when one is declared),
//! and either produces the full internal-name → value mapping or a
//! [`Rejection`] listing **every** failing field. A request is never rejected
//! on the first failure alone.

use crate::request::QueryMap;
use crate::router::{CaptureVec, RouteMatch};
use crate::spec::{ParameterLocation, RouteDef};
use crate::validator::{validate, FieldIssue, ParamValue, Rejection};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Validated parameter values keyed by internal name.
///
/// Keyed binding replaces positional call-site flexibility: a handler looks
/// values up by the names it declared, in any order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoundParams {
    values: HashMap<String, ParamValue>,
}

impl BoundParams {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(ParamValue::as_i64)
    }

    #[must_use]
    pub fn float(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(ParamValue::as_f64)
    }

    #[must_use]
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(ParamValue::as_bool)
    }

    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ParamValue::as_str)
    }

    #[must_use]
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).and_then(ParamValue::as_list)
    }

    /// True when the parameter was declared but absent with no default.
    #[must_use]
    pub fn is_absent(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(ParamValue::is_absent)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The bound values as a JSON object, for handing to a handler or
    /// echoing in a response.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.values)
    }
}

/// Validate every declared parameter of `route` against the raw request
/// input, aggregating all field failures.
///
/// Path captures are looked up by the parameter's wire name (the template
/// capture name); query occurrences likewise, so an aliased parameter is
/// read under its alias but bound under its internal name.
pub fn bind(
    route: &RouteDef,
    path_params: &CaptureVec,
    query: &QueryMap,
) -> Result<BoundParams, Rejection> {
    let mut values = HashMap::with_capacity(route.params.len());
    let mut issues = Vec::new();

    for spec in &route.params {
        let wire = spec.wire_name();
        let (raw_values, present): (Vec<&str>, bool) = match spec.location {
            ParameterLocation::Path => {
                let capture = path_params
                    .iter()
                    .rfind(|(k, _)| k.as_ref() == wire)
                    .map(|(_, v)| v.as_str());
                match capture {
                    Some(value) => (vec![value], true),
                    None => (Vec::new(), false),
                }
            }
            ParameterLocation::Query => (query.get_all(wire), query.contains(wire)),
        };

        if present && spec.deprecated {
            warn!(field = %wire, "deprecated parameter supplied");
        }

        match validate(spec, &raw_values, present) {
            Ok(value) => {
                values.insert(spec.name.clone(), value);
            }
            Err(error) => issues.push(FieldIssue::new(wire, &error)),
        }
    }

    if issues.is_empty() {
        debug!(
            route = %route.name,
            bound = values.len(),
            "request parameters bound"
        );
        Ok(BoundParams { values })
    } else {
        let rejection = Rejection::new(issues);
        rejection.log();
        Err(rejection)
    }
}

impl RouteMatch {
    /// Bind this match's raw captures and the request's query string against
    /// the matched route's parameter specs.
    pub fn bind(&self, query: &QueryMap) -> Result<BoundParams, Rejection> {
        bind(&self.route, &self.path_params, query)
    }
}
