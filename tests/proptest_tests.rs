// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests use property-based testing to verify that records, input tags and
//! composites behave correctly for arbitrary inputs.

use hexpset::catalog::{Chi2AssociatorConfig, HitAssociatorConfig};
use hexpset::domain::{
    CompositeConfiguration, ConflictPolicy, FieldTable, InputTag, Namespace, ParameterName,
    ParameterRecord, SchemaError,
};
use proptest::prelude::*;

// Test that a valid input tag survives display and parse
proptest! {
    #[test]
    fn test_input_tag_display_parse(
        label in "[A-Za-z][A-Za-z0-9_]{0,15}",
        instance in "[A-Za-z0-9_]{0,8}",
        process in "[A-Za-z0-9_]{0,8}",
    ) {
        let tag = InputTag::with_process(label, instance, process).unwrap();
        let parsed: InputTag = tag.to_string().parse().unwrap();
        prop_assert_eq!(parsed, tag);
    }
}

// Test that parsing never panics and either yields a tag or an input-tag error
proptest! {
    #[test]
    fn test_input_tag_parse_any_string(s in "\\PC*") {
        match s.parse::<InputTag>() {
            Ok(tag) => prop_assert!(!tag.label().is_empty()),
            Err(e) => prop_assert!(
                matches!(e, SchemaError::InvalidInputTag { .. }),
                "unexpected error {:?}",
                e
            ),
        }
    }
}

// Test that more than three components are always rejected
proptest! {
    #[test]
    fn test_input_tag_rejects_extra_components(
        parts in prop::collection::vec("[A-Za-z]{1,8}", 4..6),
    ) {
        let text = parts.join(":");
        prop_assert!(text.parse::<InputTag>().is_err());
    }
}

// Test that field order in the table does not affect the record
proptest! {
    #[test]
    fn test_record_independent_of_field_order(
        cut in 0.0f64..1.0,
        reverse in prop::bool::ANY,
    ) {
        let standard = HitAssociatorConfig { min_hit_cut: cut, ..HitAssociatorConfig::standard() }
            .to_record()
            .unwrap();
        let mut entries: Vec<_> = standard.to_field_table().into_iter().collect();
        if reverse {
            entries.reverse();
        } else {
            entries.rotate_left(3);
        }
        let table: FieldTable = entries.into_iter().collect();
        let rebuilt = ParameterRecord::new(HitAssociatorConfig::schema(), table).unwrap();
        prop_assert_eq!(rebuilt, standard);
    }
}

// Test that a valid chi2 cut round-trips through the typed view
proptest! {
    #[test]
    fn test_chi2_typed_round_trip(cut in 0.001f64..1.0e6, diagonal in prop::bool::ANY) {
        let config = Chi2AssociatorConfig { chi2cut: cut, only_diagonal: diagonal };
        let record = config.to_record().unwrap();
        prop_assert_eq!(Chi2AssociatorConfig::try_from(&record).unwrap(), config);
    }
}

// Test that a non-positive chi2 cut is always rejected
proptest! {
    #[test]
    fn test_chi2_rejects_non_positive_cut(cut in -1.0e6f64..=0.0) {
        let config = Chi2AssociatorConfig { chi2cut: cut, only_diagonal: false };
        prop_assert!(config.to_record().is_err());
    }
}

// Test that an unknown field name is always rejected
proptest! {
    #[test]
    fn test_record_rejects_unknown_field(name in "[a-z]{1,12}") {
        prop_assume!(name != "chi2cut");
        let table = FieldTable::new()
            .with("chi2cut", 25.0)
            .with("onlyDiagonal", false)
            .with(ParameterName::from(name.as_str()), 1.0);
        let err = ParameterRecord::new(Chi2AssociatorConfig::schema(), table).unwrap_err();
        let is_unknown_field = matches!(err, SchemaError::UnknownField { .. });
        prop_assert!(is_unknown_field);
    }
}

// Test that merging any number of disjoint namespaces keeps every binding
proptest! {
    #[test]
    fn test_merge_of_disjoint_namespaces(count in 0usize..8) {
        let record = Chi2AssociatorConfig::standard().to_record().unwrap();
        let namespaces: Vec<Namespace> = (0..count)
            .map(|i| {
                Namespace::new(format!("ns{}_cfi", i))
                    .bind(format!("chi2_{}", i), record.clone())
                    .unwrap()
            })
            .collect();
        let sources: Vec<&dyn hexpset::domain::BindingSet> =
            namespaces.iter().map(|n| n as &dyn hexpset::domain::BindingSet).collect();

        let composite = CompositeConfiguration::merge("all_cff", &sources, ConflictPolicy::Reject).unwrap();
        prop_assert_eq!(composite.len(), count);

        let again = CompositeConfiguration::merge("all_cff", &sources, ConflictPolicy::Reject).unwrap();
        prop_assert_eq!(again, composite);
    }
}
