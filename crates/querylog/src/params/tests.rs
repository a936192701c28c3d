use super::*;
use serde_json::json;

#[test]
fn direct_json_array() {
    let params = parse_params(r#"[1,2,3,"John",null,true]"#).unwrap();
    assert_eq!(
        params,
        vec![json!(1), json!(2), json!(3), json!("John"), Value::Null, json!(true)]
    );
}

#[test]
fn double_encoded_array_is_unwrapped() {
    let params = parse_params(r#""[1,2,3]""#).unwrap();
    assert_eq!(params, vec![json!(1), json!(2), json!(3)]);
}

#[test]
fn empty_and_whitespace_are_empty_failures() {
    assert_eq!(parse_params(""), Err(ParseFailure::Empty));
    assert_eq!(parse_params("   \n\t"), Err(ParseFailure::Empty));
    assert!(parse("").is_none());
}

#[test]
fn malformed_input_is_exhausted() {
    assert_eq!(parse_params("not-valid-json"), Err(ParseFailure::Exhausted));
    assert_eq!(parse_params("{invalid}"), Err(ParseFailure::Exhausted));
    assert_eq!(parse_params("[1,2,3"), Err(ParseFailure::Exhausted));
}

#[test]
fn non_array_json_is_rejected_by_direct() {
    assert_eq!(
        ParseStrategy::Direct.apply(r#"{"a":1}"#),
        Err(ParseFailure::NotAnArray)
    );
    assert_eq!(parse_params("42"), Err(ParseFailure::Exhausted));
}

#[test]
fn empty_brackets_yield_empty_list() {
    assert_eq!(parse_params("[]").unwrap(), Vec::<Value>::new());
    assert_eq!(
        ParseStrategy::Tokenized.apply("[   ]").unwrap(),
        Vec::<Value>::new()
    );
}

#[test]
fn stray_quotes_are_escaped() {
    let raw = r#"["say "hi" now", 2]"#;
    assert_eq!(escape_stray_quotes(raw), r#"["say \"hi\" now", 2]"#);

    let params = parse_params(raw).unwrap();
    assert_eq!(params, vec![json!("say \"hi\" now"), json!(2)]);
}

#[test]
fn sanitizer_leaves_escaped_quotes_alone() {
    let raw = r#"["already \"fine\"", "x"]"#;
    assert_eq!(escape_stray_quotes(raw), raw);
}

#[test]
fn sanitized_strategy_requires_brackets() {
    assert_eq!(
        ParseStrategy::QuoteSanitized.apply(r#""a"b""#),
        Err(ParseFailure::NotBracketed)
    );
}

#[test]
fn trailing_comma_falls_through_to_tokenizer() {
    let params = parse_params("[1, 2,]").unwrap();
    assert_eq!(params, vec![json!(1), json!(2)]);
}

#[test]
fn tokenizer_keeps_nested_values_whole() {
    let params = parse_params(r#"[[1,2], {"a": 1, "b": [3]}, 'x',]"#).unwrap();
    assert_eq!(
        params,
        vec![json!([1, 2]), json!({"a": 1, "b": [3]}), json!("'x'")]
    );
}

#[test]
fn tokenizer_literals_and_raw_fallback() {
    let params = ParseStrategy::Tokenized
        .apply(r#"[null, true, false, 3.5, bare word, "quoted, with comma"]"#)
        .unwrap();
    assert_eq!(
        params,
        vec![
            Value::Null,
            json!(true),
            json!(false),
            json!(3.5),
            json!("bare word"),
            json!("quoted, with comma"),
        ]
    );
}

#[test]
fn tokenizer_honours_escapes_in_quoted_tokens() {
    let params = ParseStrategy::Tokenized
        .apply(r#"["line\nbreak", "back\\slash", "tab\x"]"#)
        .unwrap();
    assert_eq!(params[0], json!("line\nbreak"));
    assert_eq!(params[1], json!("back\\slash"));
    // Invalid escape: quotes stripped, body kept verbatim.
    assert_eq!(params[2], json!("tab\\x"));
}

#[test]
fn object_key_order_is_preserved() {
    let params = parse_params(r#"[{"z": 1, "a": 2, "m": 3}]"#).unwrap();
    let keys: Vec<&str> = params[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["z", "a", "m"]);
}
