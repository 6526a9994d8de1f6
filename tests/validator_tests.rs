use paramgate::spec::ParameterSpec;
use paramgate::validator::{validate, Bound, ParamError, ParamValue, StringFacet};

#[test]
fn test_required_without_default_fails_when_absent() {
    let spec = ParameterSpec::query("needy").string().finish().unwrap();
    assert!(spec.required);
    assert_eq!(
        validate(&spec, &[], false),
        Err(ParamError::MissingRequired)
    );
}

#[test]
fn test_integer_coercion() {
    let spec = ParameterSpec::query("item_id").integer().required().finish().unwrap();

    assert_eq!(validate(&spec, &["42"], true), Ok(ParamValue::Integer(42)));
    assert_eq!(validate(&spec, &["-3"], true), Ok(ParamValue::Integer(-3)));
    assert_eq!(validate(&spec, &["+7"], true), Ok(ParamValue::Integer(7)));

    for bad in ["abc", "4.2", " 42", "42 ", "", "1e3"] {
        assert_eq!(
            validate(&spec, &[bad], true),
            Err(ParamError::TypeCoercion {
                expected: "integer",
                value: bad.to_string(),
            }),
            "{bad:?} should not coerce to integer"
        );
    }
}

#[test]
fn test_boolean_truthy_and_falsy_sets() {
    let spec = ParameterSpec::query("short").boolean().required().finish().unwrap();

    for raw in ["1", "true", "True", "TRUE", "on", "yes", "YES", "On"] {
        assert_eq!(
            validate(&spec, &[raw], true),
            Ok(ParamValue::Bool(true)),
            "{raw:?} should be truthy"
        );
    }
    for raw in ["0", "false", "False", "off", "OFF", "no"] {
        assert_eq!(
            validate(&spec, &[raw], true),
            Ok(ParamValue::Bool(false)),
            "{raw:?} should be falsy"
        );
    }
    assert_eq!(
        validate(&spec, &["maybe"], true),
        Err(ParamError::TypeCoercion {
            expected: "boolean",
            value: "maybe".to_string(),
        })
    );
}

#[test]
fn test_float_coercion_and_exclusive_bounds() {
    let spec = ParameterSpec::query("size")
        .float()
        .gt(0.0)
        .lt(10.5)
        .required()
        .finish()
        .unwrap();

    assert_eq!(validate(&spec, &["4.5"], true), Ok(ParamValue::Float(4.5)));
    assert_eq!(validate(&spec, &["1e1"], true), Ok(ParamValue::Float(10.0)));

    for bad in ["abc", "inf", "NaN", ""] {
        assert!(
            matches!(
                validate(&spec, &[bad], true),
                Err(ParamError::TypeCoercion { expected: "float", .. })
            ),
            "{bad:?} should not coerce to float"
        );
    }

    assert_eq!(
        validate(&spec, &["0"], true),
        Err(ParamError::RangeViolation {
            bound: Bound::ExclusiveMinimum,
            limit: 0.0,
            value: 0.0,
        })
    );
    assert_eq!(
        validate(&spec, &["10.5"], true),
        Err(ParamError::RangeViolation {
            bound: Bound::ExclusiveMaximum,
            limit: 10.5,
            value: 10.5,
        })
    );
}

#[test]
fn test_integer_inclusive_range() {
    let spec = ParameterSpec::path("item_id")
        .integer()
        .ge(0)
        .le(1000)
        .finish()
        .unwrap();

    assert_eq!(validate(&spec, &["500"], true), Ok(ParamValue::Integer(500)));
    assert_eq!(validate(&spec, &["0"], true), Ok(ParamValue::Integer(0)));
    assert_eq!(
        validate(&spec, &["1000"], true),
        Ok(ParamValue::Integer(1000))
    );
    assert_eq!(
        validate(&spec, &["-1"], true),
        Err(ParamError::RangeViolation {
            bound: Bound::Minimum,
            limit: 0.0,
            value: -1.0,
        })
    );
    assert_eq!(
        validate(&spec, &["1001"], true),
        Err(ParamError::RangeViolation {
            bound: Bound::Maximum,
            limit: 1000.0,
            value: 1001.0,
        })
    );
}

#[test]
fn test_string_length_constraints() {
    let spec = ParameterSpec::query("q")
        .string()
        .min_length(3)
        .max_length(50)
        .required()
        .finish()
        .unwrap();

    assert!(matches!(
        validate(&spec, &["ab"], true),
        Err(ParamError::StringConstraintViolation {
            facet: StringFacet::MinLength,
            ..
        })
    ));

    let long = "x".repeat(51);
    assert!(matches!(
        validate(&spec, &[long.as_str()], true),
        Err(ParamError::StringConstraintViolation {
            facet: StringFacet::MaxLength,
            ..
        })
    ));

    assert_eq!(
        validate(&spec, &["fixedquery"], true),
        Ok(ParamValue::Str("fixedquery".to_string()))
    );
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let spec = ParameterSpec::query("q").string().max_length(3).optional().finish().unwrap();
    // Three characters, six bytes.
    assert_eq!(
        validate(&spec, &["äöü"], true),
        Ok(ParamValue::Str("äöü".to_string()))
    );
}

#[test]
fn test_pattern_is_anchored_even_without_explicit_anchors() {
    let anchored = ParameterSpec::query("q")
        .string()
        .pattern("^fixedquery$")
        .required()
        .finish()
        .unwrap();
    let bare = ParameterSpec::query("q")
        .string()
        .pattern("fixedquery")
        .required()
        .finish()
        .unwrap();

    for spec in [&anchored, &bare] {
        assert_eq!(
            validate(spec, &["fixedquery"], true),
            Ok(ParamValue::Str("fixedquery".to_string()))
        );
        assert!(matches!(
            validate(spec, &["xfixedqueryx"], true),
            Err(ParamError::StringConstraintViolation {
                facet: StringFacet::Pattern,
                ..
            })
        ));
        assert!(matches!(
            validate(spec, &["fixedquery "], true),
            Err(ParamError::StringConstraintViolation {
                facet: StringFacet::Pattern,
                ..
            })
        ));
    }
}

#[test]
fn test_enum_membership_is_case_sensitive() {
    let spec = ParameterSpec::path("model_name")
        .one_of(["alexnet", "resnet", "lenet"])
        .finish()
        .unwrap();

    assert_eq!(
        validate(&spec, &["alexnet"], true),
        Ok(ParamValue::Str("alexnet".to_string()))
    );
    assert_eq!(
        validate(&spec, &["googlenet"], true),
        Err(ParamError::EnumMismatch {
            value: "googlenet".to_string(),
            allowed: vec![
                "alexnet".to_string(),
                "resnet".to_string(),
                "lenet".to_string()
            ],
        })
    );
    assert!(matches!(
        validate(&spec, &["Alexnet"], true),
        Err(ParamError::EnumMismatch { .. })
    ));
}

#[test]
fn test_string_list_preserves_order() {
    let spec = ParameterSpec::query("q").string_list().optional().finish().unwrap();

    assert_eq!(
        validate(&spec, &["foo", "bar"], true),
        Ok(ParamValue::List(vec!["foo".to_string(), "bar".to_string()]))
    );
    // Zero occurrences, optional, no default.
    assert_eq!(validate(&spec, &[], false), Ok(ParamValue::Absent));
}

#[test]
fn test_string_list_validates_each_occurrence() {
    let spec = ParameterSpec::query("tags")
        .string_list()
        .min_length(3)
        .optional()
        .finish()
        .unwrap();

    assert!(matches!(
        validate(&spec, &["foo", "ab"], true),
        Err(ParamError::StringConstraintViolation {
            facet: StringFacet::MinLength,
            ..
        })
    ));
}

#[test]
fn test_string_list_required_fails_on_empty() {
    let spec = ParameterSpec::query("tags").string_list().required().finish().unwrap();
    assert_eq!(validate(&spec, &[], false), Err(ParamError::MissingRequired));
}

#[test]
fn test_multiple_values_for_scalar_kind() {
    let spec = ParameterSpec::query("limit").integer().required().finish().unwrap();
    assert_eq!(
        validate(&spec, &["10", "20"], true),
        Err(ParamError::MultipleValuesNotAllowed { count: 2 })
    );
}

#[test]
fn test_default_applies_only_when_absent() {
    let spec = ParameterSpec::query("limit").integer().default_value(10).finish().unwrap();

    assert!(!spec.required);
    assert_eq!(validate(&spec, &[], false), Ok(ParamValue::Integer(10)));
    assert_eq!(validate(&spec, &["25"], true), Ok(ParamValue::Integer(25)));
}

#[test]
fn test_optional_without_default_resolves_to_absent() {
    let spec = ParameterSpec::query("q").string().optional().finish().unwrap();
    let value = validate(&spec, &[], false).unwrap();
    assert!(value.is_absent());
}

#[test]
fn test_deprecated_and_hidden_do_not_change_the_outcome() {
    let plain = ParameterSpec::query("q").string().optional().finish().unwrap();
    let marked = ParameterSpec::query("q")
        .string()
        .optional()
        .deprecated()
        .hidden()
        .finish()
        .unwrap();

    for raw in [&["hello"][..], &[][..]] {
        let present = !raw.is_empty();
        assert_eq!(
            validate(&plain, raw, present),
            validate(&marked, raw, present)
        );
    }
}

#[test]
fn test_error_kinds_are_stable() {
    assert_eq!(ParamError::MissingRequired.kind(), "missing_required");
    assert_eq!(
        ParamError::MultipleValuesNotAllowed { count: 2 }.kind(),
        "multiple_values_not_allowed"
    );
    assert_eq!(
        ParamError::TypeCoercion {
            expected: "integer",
            value: "abc".to_string()
        }
        .kind(),
        "type_coercion"
    );
}
