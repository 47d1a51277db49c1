use super::*;

fn updated(outcome: InputOutcome) -> Update {
    match outcome {
        InputOutcome::Updated(update) => update,
        other => panic!("expected an update, got {other:?}"),
    }
}

#[test]
fn organize_splits_lists_and_expands_ranges() {
    let options = EngineOptions::default();
    assert_eq!(organize("1,2.5,3", &options).values, vec!["1", "2.5", "3"]);
    assert_eq!(organize("1-3", &options).values, vec!["1", "2", "3"]);
    assert_eq!(organize("", &options).values, vec![""]);
}

#[test]
fn input_is_sanitized_and_reduced() {
    let mut session = Session::new(EngineOptions::default());
    let update = updated(session.handle_input("5a6"));

    assert_eq!(update.sanitized, "56");
    assert_eq!(
        update.results.get("56").and_then(|trace| trace.root()),
        Some("2")
    );
    assert_eq!(session.previous_value(), "56");
}

#[test]
fn repeated_value_is_suppressed() {
    let mut session = Session::new(EngineOptions::default());
    updated(session.handle_input("56"));
    assert_eq!(
        session.handle_input("56x"),
        InputOutcome::Suppressed {
            sanitized: "56".into()
        }
    );
}

#[test]
fn trailing_delimiter_is_suppressed() {
    let mut session = Session::new(EngineOptions::default());
    assert!(matches!(
        session.handle_input("56,"),
        InputOutcome::Suppressed { .. }
    ));
    assert!(matches!(
        session.handle_input("5-"),
        InputOutcome::Suppressed { .. }
    ));
    assert!(session.results().is_empty());
}

#[test]
fn empty_first_input_is_suppressed() {
    let mut session = Session::new(EngineOptions::default());
    assert!(matches!(
        session.handle_input(""),
        InputOutcome::Suppressed { .. }
    ));
}

#[test]
fn descending_range_sets_error_until_single_number() {
    let mut session = Session::new(EngineOptions::default());

    let update = updated(session.handle_input("8-5"));
    assert!(update.range_error.is_some());
    assert_eq!(update.rendered, "Please input the ascending range");
    assert_eq!(update.results.keys().collect::<Vec<_>>(), vec!["8", "5"]);

    let update = updated(session.handle_input("7"));
    assert!(update.range_error.is_none());
    assert!(session.range_error().is_none());
    assert_eq!(update.results.keys().collect::<Vec<_>>(), vec!["7"]);
}

#[test]
fn list_input_clears_range_error() {
    let mut session = Session::new(EngineOptions::default());
    updated(session.handle_input("8-5"));
    let update = updated(session.handle_input("1,2"));
    assert!(update.range_error.is_none());
}

#[test]
fn ascending_range_clears_range_error() {
    let mut session = Session::new(EngineOptions::default());
    updated(session.handle_input("8-5"));
    let update = updated(session.handle_input("8-10"));
    assert!(update.range_error.is_none());
    assert_eq!(update.results.len(), 3);
}

#[test]
fn incomplete_range_keeps_prior_results() {
    let mut session = Session::new(EngineOptions::default());
    updated(session.handle_input("1,2"));

    let outcome = session.process("5-".to_string());
    assert_eq!(
        outcome,
        InputOutcome::Incomplete {
            sanitized: "5-".into()
        }
    );
    assert_eq!(session.results().keys().collect::<Vec<_>>(), vec!["1", "2"]);
}

#[test]
fn clearing_the_input_renders_nothing() {
    let mut session = Session::new(EngineOptions::default());
    updated(session.handle_input("56"));
    let update = updated(session.handle_input(""));
    assert!(update.results.contains_key(""));
    assert_eq!(update.rendered, "");
}

#[test]
fn reset_forgets_everything() {
    let mut session = Session::new(EngineOptions::default());
    updated(session.handle_input("8-5"));
    session.reset();

    assert!(session.results().is_empty());
    assert!(session.range_error().is_none());
    assert_eq!(session.previous_value(), "");
    updated(session.handle_input("8-5"));
}

#[test]
fn sessions_do_not_share_state() {
    let mut first = Session::new(EngineOptions::default());
    let mut second = Session::new(EngineOptions::default());

    updated(first.handle_input("8-5"));
    let update = updated(second.handle_input("1,2"));

    assert!(update.range_error.is_none());
    assert!(first.range_error().is_some());
}
