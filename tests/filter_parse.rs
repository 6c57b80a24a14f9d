use propmatch::{Filter, FilterNode, Segment};

fn node(input: &str) -> FilterNode {
    Filter::parse(input).unwrap().node().clone()
}

fn message(input: &str) -> String {
    Filter::parse(input).unwrap_err().to_string()
}

#[test]
fn simple_item() {
    assert_eq!(
        node("(cn=Babs Jensen)"),
        FilterNode::Equal {
            attr: "cn".to_owned(),
            value: "Babs Jensen".to_owned(),
        }
    );
}

#[test]
fn rfc_1960_examples() {
    // shapes lifted from the RFC's example section
    assert!(Filter::parse("(cn=Babs Jensen)").is_ok());
    assert!(Filter::parse("(!(cn=Tim Howes))").is_ok());
    assert!(Filter::parse("(&(objectClass=Person)(|(sn=Jensen)(cn=Babs J*)))").is_ok());
    assert!(Filter::parse("(o=univ*of*mich*)").is_ok());
}

#[test]
fn operators() {
    assert!(matches!(node("(a~=1)"), FilterNode::Approx { .. }));
    assert!(matches!(node("(a>=1)"), FilterNode::GreaterOrEqual { .. }));
    assert!(matches!(node("(a<=1)"), FilterNode::LessOrEqual { .. }));
    assert!(matches!(node("(a=1)"), FilterNode::Equal { .. }));
    assert!(matches!(node("(a=*)"), FilterNode::Present { .. }));
}

#[test]
fn combinators_nest() {
    let parsed = node("(&(a=1)(|(b=2)(!(c=3))))");
    let FilterNode::And(children) = parsed else {
        panic!("expected And");
    };
    assert_eq!(children.len(), 2);
    let FilterNode::Or(inner) = &children[1] else {
        panic!("expected Or");
    };
    assert!(matches!(inner[1], FilterNode::Not(_)));
}

#[test]
fn substring_collapses_to_equal_without_wildcard() {
    // an escaped star is a literal, so the whole value is a plain equality
    assert_eq!(
        node(r"(cn=two\*words)"),
        FilterNode::Equal {
            attr: "cn".to_owned(),
            value: "two*words".to_owned(),
        }
    );
}

#[test]
fn substring_segments_survive() {
    assert_eq!(
        node("(o=univ*of*mich*)"),
        FilterNode::Substring {
            attr: "o".to_owned(),
            pattern: vec![
                Segment::Literal("univ".to_owned()),
                Segment::Wildcard,
                Segment::Literal("of".to_owned()),
                Segment::Wildcard,
                Segment::Literal("mich".to_owned()),
                Segment::Wildcard,
            ],
        }
    );
}

#[test]
fn present_needs_lone_star() {
    assert_eq!(node("(cn=*)"), FilterNode::Present { attr: "cn".to_owned() });
    assert!(matches!(node("(cn=* )"), FilterNode::Present { .. }));
    assert!(matches!(node("(cn=*x)"), FilterNode::Substring { .. }));
    // escaped star is data, not a present test
    assert!(matches!(node(r"(cn=\*)"), FilterNode::Equal { .. }));
}

#[test]
fn whitespace_is_insignificant_around_tokens() {
    assert_eq!(node("  ( cn = Babs )  "), node("(cn=Babs)"));
    assert_eq!(node("( & (a=1) (b=2) )"), node("(&(a=1)(b=2))"));
}

#[test]
fn escaped_whitespace_is_data() {
    assert_eq!(
        node(r"(cn=\ lead and trail\ )"),
        FilterNode::Equal {
            attr: "cn".to_owned(),
            value: " lead and trail ".to_owned(),
        }
    );
}

#[test]
fn parse_roundtrips_through_normalize() {
    for input in [
        "(cn=Babs Jensen)",
        "(&(objectClass=Person)(|(sn=Jensen)(cn=Babs J*)))",
        "(o=univ*of*mich*)",
        r"(cn=a\(b\)c\*d\\e)",
        "(!(age>=30))",
        "(cn~= Babs Jensen )",
    ] {
        let first = Filter::parse(input).unwrap();
        let canonical = first.to_string();
        let second = Filter::parse(&canonical).unwrap();
        assert_eq!(second.to_string(), canonical, "not idempotent for {input}");
        assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Error messages
// ---------------------------------------------------------------------------

#[test]
fn error_carries_original_filter() {
    let err = Filter::parse("(cn=)").unwrap_err();
    assert_eq!(err.filter(), "(cn=)");
    assert_eq!(err.message(), err.to_string());
}

#[test]
fn missing_open_paren() {
    assert_eq!(message("cn=Babs)"), "Missing \"(\" at \"cn=Babs)\"");
    assert_eq!(message("(&x(a=1))"), "Missing \"(\" at \"x(a=1))\"");
    assert_eq!(message("(!a=1)"), "Missing \"(\" at \"a=1)\"");
}

#[test]
fn missing_close_paren() {
    assert_eq!(message("(!(a=1)x)"), "Missing \")\" at \"x)\"");
}

#[test]
fn ended_abruptly() {
    for input in ["", "(", "(cn", "(cn=", "(cn=Babs", "(&(a=1)", r"(cn=x\"] {
        assert_eq!(message(input), "Filter ended abruptly", "for {input:?}");
    }
}

#[test]
fn extraneous_trailing_characters() {
    assert_eq!(
        message("(cn=Babs)junk"),
        "Extraneous trailing characters at \"junk\""
    );
    assert_eq!(
        message("(a=1)(b=2)"),
        "Extraneous trailing characters at \"(b=2)\""
    );
}

#[test]
fn missing_attr() {
    assert_eq!(message("(=x)"), "Missing attr at \"=x)\"");
    assert_eq!(message("(>=x)"), "Missing attr at \">=x)\"");
}

#[test]
fn invalid_operator() {
    assert_eq!(message("(cn~5)"), "Invalid operator at \"~5)\"");
    assert_eq!(message("(cn>5)"), "Invalid operator at \">5)\"");
    assert_eq!(message("(cn<5)"), "Invalid operator at \"<5)\"");
}

#[test]
fn invalid_value() {
    assert_eq!(message("(cn=a(b)"), "Invalid value at \"(b)\"");
}

#[test]
fn missing_value() {
    assert_eq!(message("(cn=)"), "Missing value at \")\"");
    assert_eq!(message("(cn>=)"), "Missing value at \")\"");
    assert_eq!(message("(cn<= )"), "Missing value at \")\"");
    assert_eq!(message("(cn~=)"), "Missing value at \")\"");
}
