use stackviz_core::{BracketKind, Failure, TraceStep, validate};

#[test]
fn test_quick_examples() {
    let cases = [
        ("((a+b)*c)", true, None),
        ("(()", false, None),
        ("{[()]}", true, None),
        ("([{}])", true, None),
        ("))((", false, Some(0)),
        ("({[)]}", false, Some(3)),
    ];

    for (input, balanced, error_position) in cases {
        let verdict = validate(input);
        assert_eq!(verdict.balanced, balanced, "{input}");
        assert_eq!(verdict.error_position, error_position, "{input}");
    }
}

#[test]
fn test_unmatched_closer_stops_the_scan() {
    let verdict = validate("))((");
    assert_eq!(verdict.steps.len(), 1);

    match &verdict.steps[0] {
        TraceStep::Error { failure, message } => {
            assert_eq!(
                failure,
                &Failure::UnmatchedCloser {
                    symbol: ')',
                    position: 0,
                    kind: BracketKind::Parentheses,
                }
            );
            assert_eq!(
                message,
                "Unbalanced: No matching opening bracket for ')' at index 0"
            );
        }
        other => panic!("Expected Error, got {other:?}"),
    }
}

#[test]
fn test_mismatch_reports_expected_and_actual() {
    let verdict = validate("({[)]}");
    if let Some(Failure::TypeMismatch {
        expected, actual, ..
    }) = verdict.failure()
    {
        assert_eq!(*expected, ']');
        assert_eq!(*actual, ')');
    } else {
        panic!("Expected TypeMismatch");
    }
}

#[test]
fn test_empty_input_has_single_success() {
    let verdict = validate("");
    assert!(verdict.balanced);
    assert_eq!(verdict.steps.len(), 1);
    assert!(matches!(verdict.steps[0], TraceStep::Success { .. }));
    assert_eq!(verdict.push_count(), 0);
    assert_eq!(verdict.pop_count(), 0);
}

#[test]
fn test_push_depths_follow_nesting() {
    let verdict = validate("((a+b)*c)");
    let depths: Vec<usize> = verdict
        .steps
        .iter()
        .filter_map(TraceStep::stack_depth)
        .collect();
    assert_eq!(depths, vec![1, 2, 1, 0]);
}
