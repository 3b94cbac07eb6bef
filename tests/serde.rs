#![cfg(all(feature = "serde", feature = "parser"))]

use std::collections::HashMap;
use std::error::Error;

use branching_logic::{parse, substitute, Expr, FieldRef, Truth};

#[test]
fn expression_round_trip() -> Result<(), Box<dyn Error>> {
    let expr = parse("[visit_1][race(2)]='1' AND !([age] >= '18' OR 'x' <> \"y\")")?;

    let text = serde_json::to_string(&expr)?;
    let restored: Expr = serde_json::from_str(&text)?;

    assert_eq!(expr, restored);

    Ok(())
}

#[test]
fn truth_round_trip() -> Result<(), Box<dyn Error>> {
    let expr = parse("[a]='1' OR ![b]='2' AND [c]='3'")?;
    let record = HashMap::from([("a", "0"), ("b", "1"), ("c", "3")]);
    let truth = substitute(&expr, &record)?;

    let restored: Truth = serde_json::from_str(&serde_json::to_string(&truth)?)?;

    assert_eq!(truth, restored);

    Ok(())
}

#[test]
fn field_round_trip() -> Result<(), Box<dyn Error>> {
    let field = FieldRef::new("race").with_event("baseline").with_checkbox("2");
    let restored: FieldRef = serde_json::from_str(&serde_json::to_string(&field)?)?;

    assert_eq!(field, restored);
    assert_eq!(serde_json::from_str::<FieldRef>(&serde_json::to_string(&FieldRef::new("age"))?)?, FieldRef::new("age"));

    Ok(())
}

#[test]
fn empty_group_is_rejected() {
    assert!(serde_json::from_str::<Expr>(r#"{"Group":[]}"#).is_err());
}
