use mojmap_core::{parse_mappings, search, MappingIndex};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 128;

fn arb_name() -> impl Strategy<Value = String> {
    // A small alphabet keeps collisions between filters and names frequent.
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'C', 'd', 'E']), 1..5)
        .prop_map(|chars| chars.into_iter().collect())
}

#[derive(Clone, Debug)]
struct ClassSpec {
    name: String,
    methods: Vec<String>,
    fields: Vec<String>,
}

fn arb_class() -> impl Strategy<Value = ClassSpec> {
    (
        arb_name(),
        prop::collection::vec(arb_name(), 0..4),
        prop::collection::vec(arb_name(), 0..4),
    )
        .prop_map(|(name, methods, fields)| ClassSpec {
            name: format!("pkg.{name}"),
            methods,
            fields,
        })
}

fn render(classes: &[ClassSpec]) -> String {
    let mut text = String::new();
    for (i, class) in classes.iter().enumerate() {
        text.push_str(&format!("{} -> c{i}:\n", class.name));
        for (j, method) in class.methods.iter().enumerate() {
            text.push_str(&format!("    {j}:{j}:void {method}(int) -> m{j}\n"));
        }
        for (j, field) in class.fields.iter().enumerate() {
            text.push_str(&format!("    int {field} -> f{j}\n"));
        }
    }
    text
}

fn arb_index() -> impl Strategy<Value = MappingIndex> {
    prop::collection::vec(arb_class(), 0..8)
        .prop_map(|classes| parse_mappings(&render(&classes)).expect("generated mappings parse"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn class_name_matches_come_first(index in arb_index(), filter in arb_name()) {
        let result = search(&index, &filter, usize::MAX);
        prop_assert!(!result.limit_reached);

        let lowered = filter.to_lowercase();
        let tiers: Vec<bool> = result
            .results
            .iter()
            .map(|m| m.class_name.to_lowercase().contains(&lowered))
            .collect();
        let first_member_only = tiers.iter().position(|matched| !matched).unwrap_or(tiers.len());
        prop_assert!(tiers[first_member_only..].iter().all(|matched| !matched));
    }

    #[test]
    fn counts_cover_every_included_unit(index in arb_index(), filter in arb_name()) {
        let result = search(&index, &filter, usize::MAX);
        let units: usize = result
            .results
            .iter()
            .map(|m| {
                1 + m.methods.as_ref().map_or(0, Vec::len) + m.fields.as_ref().map_or(0, Vec::len)
            })
            .sum();
        prop_assert_eq!(result.num_results, units);
        for class in &result.results {
            prop_assert!(class.methods.as_ref().map_or(true, |m| !m.is_empty()));
            prop_assert!(class.fields.as_ref().map_or(true, |f| !f.is_empty()));
        }
    }

    #[test]
    fn raising_the_limit_never_loses_results(
        index in arb_index(),
        filter in arb_name(),
        small in 0usize..12,
        extra in 0usize..12,
    ) {
        let narrow = search(&index, &filter, small);
        let wide = search(&index, &filter, small + extra);

        prop_assert!(wide.num_results >= narrow.num_results);
        prop_assert!(narrow.num_results <= small);
        if !narrow.limit_reached {
            prop_assert_eq!(&narrow, &wide);
        }
    }
}
