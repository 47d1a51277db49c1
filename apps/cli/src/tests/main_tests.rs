use super::*;

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf8")
}

#[test]
fn parses_flags_and_inputs() {
    let args = Args::parse_from(["droot", "--json", "--stop-at", "20", "56", "1-3"]);
    assert!(args.json);
    assert!(!args.interactive);
    assert_eq!(args.inputs, vec!["56", "1-3"]);
    assert_eq!(args.options().stop_at, 20);
    assert_eq!(args.options().max_terms, engine::options::DEFAULT_MAX_TERMS);
}

#[test]
fn one_shot_prints_each_input() {
    let mut out = Vec::new();
    run_once(
        &["56".to_string(), "8-5".to_string()],
        &mut out,
        EngineOptions::default(),
        false,
    )
    .expect("run");

    assert_eq!(
        text(out),
        "56\n  5+6 = 11\n  1+1 = 2\n  root: 2\nPlease input the ascending range\n"
    );
}

#[test]
fn one_shot_json_emits_one_line_per_input() {
    let mut out = Vec::new();
    run_once(&["7,7".to_string()], &mut out, EngineOptions::default(), true).expect("run");

    let output = text(out);
    let response: ComputeResponse = serde_json::from_str(output.trim()).expect("json");
    assert_eq!(response.sanitized, "7,7");
    assert_eq!(response.results.len(), 1);
}

#[test]
fn interactive_skips_suppressed_lines() {
    let stdin = "5\n5\n5,\n5,6\n".as_bytes();
    let mut out = Vec::new();
    run_interactive(stdin, &mut out, EngineOptions::default(), false).expect("run");

    assert_eq!(
        text(out),
        "5\n  5 = 5\n  root: 5\n5\n  5 = 5\n  root: 5\n\n6\n  6 = 6\n  root: 6\n"
    );
}

#[test]
fn truncated_ranges_are_flagged() {
    let options = EngineOptions {
        max_terms: 2,
        ..EngineOptions::default()
    };
    let mut out = Vec::new();
    run_once(&["1-5".to_string()], &mut out, options, false).expect("run");
    assert_eq!(
        text(out),
        "1\n  1 = 1\n  root: 1\n\n2\n  2 = 2\n  root: 2\n(range truncated)\n"
    );

    let mut out = Vec::new();
    run_once(&["1-5".to_string()], &mut out, options, true).expect("run");
    let response: ComputeResponse = serde_json::from_str(text(out).trim()).expect("json");
    assert!(response.truncated);
}
