use std::collections::HashMap;
use std::error::Error;

use branching_logic::{
    evaluate, parse, parse_and_evaluate, substitute, Connective, DataSource, Error as BranchingError, Expr,
    FieldRef, Operand, MAX_DEPTH,
};

fn record(entries: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    entries.iter().copied().collect()
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Right-to-left recursive reading of a tree, used as a reference for the stack based fold.
fn naive<S: DataSource>(expr: &Expr, source: &S) -> bool {
    fn chain<S: DataSource>(elements: &[Expr], source: &S) -> bool {
        match elements {
            [last] => naive(last, source),
            [first, Expr::Connective(connective), rest @ ..] => {
                connective.apply(naive(first, source), chain(rest, source))
            }
            _ => panic!("malformed group"),
        }
    }

    match expr {
        Expr::Comparison(comparison) => {
            let actual = match &comparison.left {
                Operand::Field(field) => source.value_for_field(field).expect("known field"),
                Operand::Literal(value) => value.clone(),
            };
            comparison.op.apply(&actual, &comparison.right)
        }
        Expr::Not(operand) => !naive(operand, source),
        Expr::Group(elements) => {
            let elements: Vec<Expr> = elements.iter().cloned().collect();
            chain(&elements, source)
        }
        Expr::Connective(_) => panic!("bare connective"),
    }
}

#[test]
fn concrete_scenarios() -> Result<(), Box<dyn Error>> {
    assert!(parse_and_evaluate("[age]>'18'", &record(&[("age", "20")]))?);
    assert!(!parse_and_evaluate(
        "[status]='active' AND [age]>'18'",
        &record(&[("status", "active"), ("age", "15")])
    )?);
    assert!(parse_and_evaluate("[a]='1' OR [b]='2'", &record(&[("a", "0"), ("b", "2")]))?);

    Ok(())
}

#[test]
fn comparisons_are_textual() -> Result<(), Box<dyn Error>> {
    let values = record(&[("n", "9")]);

    assert!(!parse_and_evaluate("[n] > '10' AND '9' < '10'", &values)?);
    assert!(parse_and_evaluate("[n] > '10'", &values)?);
    assert!(parse_and_evaluate("[n] <> '09'", &values)?);
    assert!(parse_and_evaluate("[n] >= '9' AND [n] <= '9'", &values)?);

    Ok(())
}

#[test]
fn and_binds_tighter_than_or() -> Result<(), Box<dyn Error>> {
    let expr = parse("[a]='1' AND [b]='1' OR [c]='1'")?;

    match &expr {
        Expr::Group(elements) => {
            assert_eq!(elements.len(), 3);
            assert!(matches!(elements.head, Expr::Group(_)));
            assert_eq!(elements.tail[0], Expr::Connective(Connective::Or));
            assert!(matches!(elements.tail[1], Expr::Comparison(_)));
        }
        other => panic!("expected a disjunction, got {:?}", other),
    }

    for bits in 0..8u8 {
        let (a, b, c) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
        let values = record(&[("a", flag(a)), ("b", flag(b)), ("c", flag(c))]);

        assert_eq!(expr.is_satisfied_by(&values)?, (a && b) || c, "a={} b={} c={}", a, b, c);
    }

    Ok(())
}

#[test]
fn fold_matches_recursive_reading() -> Result<(), Box<dyn Error>> {
    let expressions = [
        "[a]='1' AND [b]='1' AND [c]='1'",
        "[a]='1' OR [b]='1' OR [c]='1'",
        "[a]='1' OR [b]='1' AND ![c]='1'",
        "!([a]='1' OR [b]='1') AND [c]='1'",
        "([a]='1' OR [b]='1') AND ([b]='1' OR [c]='1') OR [a]='0' AND [c]='0'",
    ];

    for input in expressions {
        let expr = parse(input)?;

        for bits in 0..8u8 {
            let values = record(&[("a", flag(bits & 1 != 0)), ("b", flag(bits & 2 != 0)), ("c", flag(bits & 4 != 0))]);
            let folded = evaluate(&substitute(&expr, &values)?)?;

            assert_eq!(folded, naive(&expr, &values), "{} with bits {:03b}", input, bits);
        }
    }

    Ok(())
}

#[test]
fn negation_binds_tightest() -> Result<(), Box<dyn Error>> {
    let values = record(&[("a", "1"), ("b", "0")]);

    assert!(!parse_and_evaluate("![a]='1'", &values)?);
    assert!(parse_and_evaluate("NOT [b]='1'", &values)?);
    // (!a) OR b, not !(a OR b)
    assert!(!parse_and_evaluate("![a]='1' OR [b]='1'", &values)?);
    assert!(parse_and_evaluate("!([a]='1' AND [b]='1')", &values)?);

    Ok(())
}

#[test]
fn field_reference_forms() -> Result<(), Box<dyn Error>> {
    let cases = [
        ("[age]='1'", FieldRef::new("age")),
        ("[visit_1][age]='1'", FieldRef::new("age").with_event("visit_1")),
        ("[race(2)]='1'", FieldRef::new("race").with_checkbox("2")),
        ("[visit_1][race(2)]='1'", FieldRef::new("race").with_event("visit_1").with_checkbox("2")),
    ];

    for (input, expected) in cases {
        let expr = parse(input)?;
        assert_eq!(expr.fields(), vec![&expected], "{}", input);
    }

    Ok(())
}

#[test]
fn qualifiers_do_not_change_the_lookup_key() -> Result<(), Box<dyn Error>> {
    let values = record(&[("race", "1")]);

    assert!(parse_and_evaluate("[baseline][race(2)] = '1'", &values)?);

    Ok(())
}

#[test]
fn unknown_field_aborts() -> Result<(), Box<dyn Error>> {
    let expr = parse("[a]='1' OR [visit][missing]='2'")?;
    let values = record(&[("a", "1")]);

    let err = substitute(&expr, &values).expect_err("missing field");
    assert_eq!(err.field(), &FieldRef::new("missing").with_event("visit"));

    match parse_and_evaluate("[missing]='2'", &values) {
        Err(BranchingError::Lookup(_)) => Ok(()),
        other => panic!("expected a lookup error, got {:?}", other),
    }
}

#[test]
fn syntax_errors_are_reported() {
    let values = record(&[("a", "1")]);

    match parse_and_evaluate("[a]='1' AND", &values) {
        Err(BranchingError::Syntax(err)) => assert_eq!(err.position(), 11),
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn parsing_is_idempotent() -> Result<(), Box<dyn Error>> {
    let expressions = [
        "[a]='1'",
        "[visit][a(3)] <> \"x\" and not ([b] >= '2' OR [c]='') or [d]<'4'",
        "!!([a]='1' AND [b]='2') OR 'x'='x'",
    ];

    for input in expressions {
        let first = parse(input)?;

        assert_eq!(parse(input)?, first);
        assert_eq!(parse(&first.to_string())?, first, "{}", first);
    }

    Ok(())
}

#[test]
fn nesting_is_bounded() -> Result<(), Box<dyn Error>> {
    let values = record(&[("a", "1")]);
    let parens = |depth: usize| format!("{}[a]='1'{}", "(".repeat(depth), ")".repeat(depth));
    let negations = |depth: usize| format!("{}[a]='1'", "!".repeat(depth));

    assert!(parse_and_evaluate(&parens(MAX_DEPTH), &values)?);
    assert!(parse_and_evaluate(&negations(MAX_DEPTH), &values)?);

    for input in [parens(MAX_DEPTH + 1), negations(MAX_DEPTH + 1), parens(5_000), negations(50_000)] {
        match parse_and_evaluate(&input, &values) {
            Err(BranchingError::Syntax(err)) => {
                assert!(err.is_too_deep());
                assert_eq!(err.position(), MAX_DEPTH);
            }
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    Ok(())
}
