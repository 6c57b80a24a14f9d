use propmatch::{FilterNode, Properties, Segment};
use proptest::prelude::*;

// --- Fixed property schema ---
// cn     : string, one of a small name pool
// sn     : string, one of a small name pool
// age    : i64 (0..=120)
// active : bool
// score  : f64 (0.0..=10.0)

const FIRST_NAMES: &[&str] = &["Babs Jensen", "Tim Howes", "Ann", "Jürgen"];
const SURNAMES: &[&str] = &["Jensen", "Howes", "Smith"];

/// Generate a property set that aligns with the fixed schema.
pub fn arb_properties() -> impl Strategy<Value = Properties> {
    (
        prop::sample::select(FIRST_NAMES),
        prop::sample::select(SURNAMES),
        0_i64..=120,
        any::<bool>(),
        0.0_f64..=10.0,
    )
        .prop_map(|(cn, sn, age, active, score)| {
            Properties::new()
                .set("cn", cn)
                .set("sn", sn)
                .set("age", age)
                .set("active", active)
                .set("score", score)
        })
}

fn arb_attr() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,7}"
}

/// Printable value, possibly containing metacharacters and interior spaces.
fn arb_value() -> impl Strategy<Value = String> {
    "[ -~]{1,12}"
}

/// Approximate-match values avoid whitespace: normalization strips it, and a
/// whitespace-only value would normalize to nothing.
fn arb_approx_value() -> impl Strategy<Value = String> {
    "[!-~]{1,12}"
}

/// A substring pattern: literal runs interleaved with wildcards, always
/// containing at least one wildcard and never two adjacent literals.
fn arb_pattern() -> impl Strategy<Value = Vec<Segment>> {
    (
        prop::collection::vec("[ -~]{1,6}", 1..4),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(runs, lead, trail)| {
            let mut segments = Vec::new();
            // a single run with neither edge wildcard would be a plain
            // equality, so force one in that case
            let lead = lead || (runs.len() == 1 && !trail);
            if lead {
                segments.push(Segment::Wildcard);
            }
            for (i, run) in runs.into_iter().enumerate() {
                if i > 0 {
                    segments.push(Segment::Wildcard);
                }
                segments.push(Segment::Literal(run));
            }
            if trail {
                segments.push(Segment::Wildcard);
            }
            segments
        })
}

fn arb_leaf() -> impl Strategy<Value = FilterNode> {
    prop_oneof![
        (arb_attr(), arb_value()).prop_map(|(attr, value)| FilterNode::Equal { attr, value }),
        (arb_attr(), arb_approx_value())
            .prop_map(|(attr, value)| FilterNode::Approx { attr, value }),
        (arb_attr(), arb_value())
            .prop_map(|(attr, value)| FilterNode::GreaterOrEqual { attr, value }),
        (arb_attr(), arb_value())
            .prop_map(|(attr, value)| FilterNode::LessOrEqual { attr, value }),
        (arb_attr(), arb_pattern())
            .prop_map(|(attr, pattern)| FilterNode::Substring { attr, pattern }),
        arb_attr().prop_map(|attr| FilterNode::Present { attr }),
    ]
}

/// Generate a well-formed expression tree up to a few levels deep.
pub fn arb_node() -> impl Strategy<Value = FilterNode> {
    arb_leaf().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::And),
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::Or),
            inner.prop_map(|child| FilterNode::Not(Box::new(child))),
        ]
    })
}

/// A leaf-only tree over the fixed schema, guaranteed free of conversion
/// errors when matched against [`arb_properties`].
pub fn arb_schema_node() -> impl Strategy<Value = FilterNode> {
    let leaf = prop_oneof![
        (prop::sample::select(FIRST_NAMES)).prop_map(|v| FilterNode::Equal {
            attr: "cn".to_owned(),
            value: v.to_owned(),
        }),
        (prop::sample::select(SURNAMES)).prop_map(|v| FilterNode::Substring {
            attr: "sn".to_owned(),
            pattern: vec![Segment::Wildcard, Segment::Literal(v.to_owned())],
        }),
        (0_i64..=120).prop_map(|v| FilterNode::GreaterOrEqual {
            attr: "age".to_owned(),
            value: v.to_string(),
        }),
        (0_i64..=120).prop_map(|v| FilterNode::LessOrEqual {
            attr: "age".to_owned(),
            value: v.to_string(),
        }),
        any::<bool>().prop_map(|v| FilterNode::Equal {
            attr: "active".to_owned(),
            value: v.to_string(),
        }),
        Just(FilterNode::Present {
            attr: "score".to_owned(),
        }),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::And),
            prop::collection::vec(inner.clone(), 1..4).prop_map(FilterNode::Or),
            inner.prop_map(|child| FilterNode::Not(Box::new(child))),
        ]
    })
}
