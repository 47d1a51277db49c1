use super::*;

fn pairs(number: &str) -> Vec<(String, String)> {
    reduce(number, &EngineOptions::default())
        .steps
        .into_iter()
        .map(Into::into)
        .collect()
}

fn pair(expression: &str, result: &str) -> (String, String) {
    (expression.to_string(), result.to_string())
}

#[test]
fn two_step_reduction() {
    assert_eq!(pairs("56"), vec![pair("5+6", "11"), pair("1+1", "2")]);
}

#[test]
fn single_digit_still_records_one_step() {
    assert_eq!(pairs("5"), vec![pair("5", "5")]);
    assert_eq!(pairs("0"), vec![pair("0", "0")]);
}

#[test]
fn empty_or_digitless_input_has_empty_trace() {
    assert!(pairs("").is_empty());
    assert!(pairs(".").is_empty());
    assert!(pairs("Infinity").is_empty());
    assert!(pairs("1_000").is_empty());
}

#[test]
fn dots_are_dropped_before_summing() {
    assert_eq!(pairs("1.5"), vec![pair("1+5", "6")]);
    assert_eq!(pairs("0.125"), vec![pair("1+2+5", "8")]);
}

#[test]
fn leading_zeros_are_normalised() {
    assert_eq!(pairs("007"), vec![pair("7", "7")]);
}

#[test]
fn three_step_reduction() {
    assert_eq!(
        pairs("9875"),
        vec![pair("9+8+7+5", "29"), pair("2+9", "11"), pair("1+1", "2")]
    );
}

#[test]
fn numbers_beyond_u64_reduce() {
    let trace = reduce(&"9".repeat(23), &EngineOptions::default());
    assert_eq!(trace.steps[0].result, "207");
    assert_eq!(trace.root(), Some("9"));
}

#[test]
fn stop_at_ends_reduction_early() {
    let options = EngineOptions {
        stop_at: 20,
        ..EngineOptions::default()
    };
    let trace = reduce("9875", &options);
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.root(), Some("11"));
}

#[test]
fn stop_at_below_nine_still_stops_at_one_digit() {
    let options = EngineOptions {
        stop_at: 0,
        ..EngineOptions::default()
    };
    assert_eq!(reduce("19", &options).root(), Some("1"));
    assert_eq!(reduce("19", &options).len(), 2);
}
