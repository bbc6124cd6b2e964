#![no_main]
use libfuzzer_sys::fuzz_target;
use stackviz_core::{replay, validate};

fuzz_target!(|data: &[u8]| {
    // Lossy conversion keeps inputs that are "almost" text.
    let s = String::from_utf8_lossy(data);
    let verdict = validate(&s);

    let terminals = verdict.steps.iter().filter(|step| step.is_terminal()).count();
    assert_eq!(terminals, 1);
    assert!(verdict.steps.last().is_some_and(|step| step.is_terminal()));

    let stack = replay(&verdict.steps).expect("validator traces always replay");
    assert_eq!(stack.len(), verdict.final_depth());
    assert_eq!(verdict.balanced, stack.is_empty() && verdict.failure().is_none());
});
