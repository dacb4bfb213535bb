use super::*;
use serde_json::Value;

fn nested_arrays(depth: usize) -> String {
    format!("{}1{}", "[".repeat(depth), "]".repeat(depth))
}

fn array_depth(mut v: &Value) -> usize {
    let mut depth = 0;
    while let Value::Array(items) = v {
        depth += 1;
        v = &items[0];
    }
    depth
}

#[test]
fn parse_json_accepts_nesting_past_the_default_limit() {
    let v: Value = parse_json(nested_arrays(1000).as_bytes()).unwrap();
    assert_eq!(array_depth(&v), 1000);
}

#[test]
fn parse_json_rejects_trailing_data() {
    let err = parse_json::<Value>(br#"{"a":1} x"#).unwrap_err();
    assert!(err.is_syntax(), "{err}");
}

#[test]
fn parse_json_reports_syntax_errors() {
    assert!(parse_json::<Value>(b"{\"a\":").is_err());
}

#[test]
fn grow_returns_closure_result() {
    fn depth(n: usize) -> usize {
        if n == 0 { 0 } else { grow(|| 1 + depth(n - 1)) }
    }
    assert_eq!(depth(50_000), 50_000);
}
