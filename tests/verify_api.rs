//! Integration tests for the verification entry points.
//!
//! Each test runs a verification that fails on purpose and inspects the
//! received file, which holds exactly the text that would be approved.

mod common;

use std::collections::HashMap;

use std::fmt;

use approvals::{
    ApprovalError, TestScope, set_default_reporter, verify, verify_all,
    verify_all_combinations_with, verify_all_combinations2_with, verify_all_combinations3_with,
};
use common::{RecordingReporter, Sandbox, fixture_path, load_fixture};
use rstest::rstest;
use serde::Serialize;

/// Runs `verification` in a fresh sandbox and returns the received text.
fn received_text(
    verification: impl FnOnce(&Sandbox, &RecordingReporter) -> Result<(), ApprovalError>,
) -> String {
    let sandbox = Sandbox::new("api.case");
    let reporter = RecordingReporter::new();
    let result = verification(&sandbox, &reporter);
    assert!(
        result.as_ref().is_err_and(ApprovalError::is_mismatch),
        "expected a first-run mismatch, got: {result:?}"
    );
    sandbox.received().unwrap_or_else(|| panic!("received file should be kept"))
}

// ── verify_all ──────────────────────────────────────────────────────

#[rstest]
fn verify_all_writes_header_blank_line_and_numbered_items() {
    let text = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all("Fruit", ["apple", "pear"])
    });
    assert_eq!(text, "Fruit\n\n0) apple\n1) pear\n");
}

#[rstest]
fn verify_all_numbering_restarts_on_every_call() {
    let first = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all("Run", [10, 20, 30])
    });
    let second = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all("Run", [10, 20, 30])
    });
    assert_eq!(first, "Run\n\n0) 10\n1) 20\n2) 30\n");
    assert_eq!(first, second);
}

#[rstest]
fn verify_all_with_uses_the_custom_formatter() {
    let text = received_text(|sandbox, reporter| {
        sandbox
            .verifier(reporter)
            .verify_all_with("Lengths", ["a", "bcd"], |word| {
                format!("{word} has {} chars", word.len())
            })
    });
    assert_eq!(text, "Lengths\n\na has 1 chars\nbcd has 3 chars\n");
}

#[rstest]
fn verify_all_with_no_items_still_writes_the_header() {
    let text = received_text(|sandbox, reporter| {
        sandbox
            .verifier(reporter)
            .verify_all("Nothing", Vec::<String>::new())
    });
    assert_eq!(text, "Nothing\n\n");
}

// ── verify_all_combinations ─────────────────────────────────────────

#[rstest]
fn combinations_enumerate_leftmost_argument_slowest() {
    let text = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all_combinations2(
            |number: &i32, letter: &char| Ok::<_, String>(format!("{number}{letter}")),
            &[1, 2],
            &['a', 'b'],
        )
    });
    assert_eq!(
        text,
        concat!(
            "args: (1, 'a') => Ok(\"1a\")\n",
            "args: (1, 'b') => Ok(\"1b\")\n",
            "args: (2, 'a') => Ok(\"2a\")\n",
            "args: (2, 'b') => Ok(\"2b\")\n",
        )
    );
}

#[rstest]
fn combination_errors_are_recorded_as_results() {
    let text = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all_combinations2(
            |a: &i32, b: &i32| {
                a.checked_div(*b)
                    .ok_or_else(|| format!("cannot divide {a} by zero"))
            },
            &[6],
            &[0, 3],
        )
    });
    assert_eq!(
        text,
        concat!(
            "args: (6, 0) => Err(\"cannot divide 6 by zero\")\n",
            "args: (6, 3) => Ok(2)\n",
        )
    );
}

#[rstest]
fn homogeneous_combinations_accept_any_number_of_lists() {
    let text = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all_combinations(
            |args: &[&u32]| Ok::<u32, String>(args.iter().copied().sum()),
            &[vec![1, 2], vec![10], vec![100, 200]],
        )
    });
    assert_eq!(
        text,
        concat!(
            "args: [1, 10, 100] => Ok(111)\n",
            "args: [1, 10, 200] => Ok(211)\n",
            "args: [2, 10, 100] => Ok(112)\n",
            "args: [2, 10, 200] => Ok(212)\n",
        )
    );
}

#[rstest]
fn three_way_combinations_use_tuple_arguments() {
    let text = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all_combinations3(
            |size: &&str, qty: &u8, gift: &bool| {
                let wrap = if *gift { "+" } else { "" };
                Ok::<_, String>(format!("{qty}x{size}{wrap}"))
            },
            &["S", "L"],
            &[1],
            &[false, true],
        )
    });
    assert_eq!(
        text,
        concat!(
            "args: (\"S\", 1, false) => Ok(\"1xS\")\n",
            "args: (\"S\", 1, true) => Ok(\"1xS+\")\n",
            "args: (\"L\", 1, false) => Ok(\"1xL\")\n",
            "args: (\"L\", 1, true) => Ok(\"1xL+\")\n",
        )
    );
}

#[rstest]
fn custom_combination_formatter_sees_every_result() {
    let text = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all_combinations2_with(
            |a: &u8, b: &u8| a.checked_sub(*b).ok_or("underflow"),
            &[1, 5],
            &[3],
            |(a, b), result| match result {
                Ok(value) => format!("{a} - {b} = {value}\n"),
                Err(reason) => format!("{a} - {b}: {reason}\n"),
            },
        )
    });
    assert_eq!(text, "1 - 3: underflow\n5 - 3 = 2\n");
}

#[rstest]
fn three_way_custom_formatter_receives_the_argument_tuple() {
    let text = received_text(|sandbox, reporter| {
        sandbox.verifier(reporter).verify_all_combinations3_with(
            |base: &u32, exponent: &u32, modulus: &u32| {
                base.checked_pow(*exponent)
                    .and_then(|power| power.checked_rem(*modulus))
                    .ok_or("undefined")
            },
            &[2, 3],
            &[3],
            &[5, 0],
            |(base, exponent, modulus), result| match result {
                Ok(value) => format!("{base}^{exponent} mod {modulus} = {value}\n"),
                Err(reason) => format!("{base}^{exponent} mod {modulus}: {reason}\n"),
            },
        )
    });
    assert_eq!(
        text,
        concat!(
            "2^3 mod 5 = 3\n",
            "2^3 mod 0: undefined\n",
            "3^3 mod 5 = 2\n",
            "3^3 mod 0: undefined\n",
        )
    );
}

// ── verify_as_json ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Invoice {
    total: u32,
    customer: &'static str,
    lines: Vec<&'static str>,
}

#[rstest]
fn json_keys_are_sorted_regardless_of_input_order() {
    let text = received_text(|sandbox, reporter| {
        sandbox
            .verifier(reporter)
            .verify_as_json(&HashMap::from([("b", 1), ("a", 2)]))
    });
    assert_eq!(text, "{\n    \"a\": 2,\n    \"b\": 1\n}\n");
}

#[rstest]
fn json_serializes_structs_through_their_fields() {
    let invoice = Invoice {
        total: 42,
        customer: "ACME",
        lines: vec!["widget"],
    };
    let text =
        received_text(|sandbox, reporter| sandbox.verifier(reporter).verify_as_json(&invoice));
    assert_eq!(
        text,
        concat!(
            "{\n",
            "    \"customer\": \"ACME\",\n",
            "    \"lines\": [\n",
            "        \"widget\"\n",
            "    ],\n",
            "    \"total\": 42\n",
            "}\n",
        )
    );
}

#[rstest]
fn json_output_is_stable_across_calls() {
    let sandbox = Sandbox::new("api.json_stable");
    let reporter = RecordingReporter::new();
    let verifier = sandbox.verifier(&reporter);
    let value = HashMap::from([("zeta", vec![3, 1]), ("alpha", vec![2])]);

    assert!(verifier.verify_as_json(&value).is_err());
    sandbox.promote_received();
    verifier
        .verify_as_json(&value)
        .expect("identical value should reproduce identical JSON");
}

#[rstest]
fn unserializable_json_is_a_serialization_error() {
    let sandbox = Sandbox::new("api.json_error");
    let reporter = RecordingReporter::new();
    let value = HashMap::from([((1, 2), "tuple keys are not JSON")]);

    let result = sandbox.verifier(&reporter).verify_as_json(&value);
    assert!(matches!(result, Err(ApprovalError::Serialization { .. })));
    assert_eq!(sandbox.received(), None);
}

// ── verify_file ─────────────────────────────────────────────────────

#[rstest]
fn verify_file_approves_the_file_contents() {
    let text = received_text(|sandbox, reporter| {
        sandbox
            .verifier(reporter)
            .verify_file(fixture_path("build_log.txt"))
    });
    assert_eq!(text, load_fixture("build_log.txt"));
}

#[rstest]
fn verify_file_on_a_missing_file_is_an_io_error() {
    let sandbox = Sandbox::new("api.missing_file");
    let reporter = RecordingReporter::new();
    let result = sandbox
        .verifier(&reporter)
        .verify_file(fixture_path("no_such_file.txt"));
    assert!(matches!(result, Err(ApprovalError::Io { .. })));
}

// ── Rendering failures ──────────────────────────────────────────────

struct Unprintable;

impl fmt::Display for Unprintable {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

#[rstest]
fn failing_display_is_a_serialization_error_and_writes_nothing() {
    let sandbox = Sandbox::new("api.unprintable");
    let reporter = RecordingReporter::new();

    let result = sandbox.verifier(&reporter).verify(Unprintable);

    assert!(matches!(result, Err(ApprovalError::Serialization { .. })));
    assert_eq!(sandbox.received(), None);
    assert!(reporter.reports().is_empty());
}

// ── Free functions and the test scope ──────────────────────────────

/// Runs a free-function verification inside a scope for a fresh sandbox
/// and returns the received text.
fn scoped_received_text(verification: impl FnOnce() -> Result<(), ApprovalError>) -> String {
    let sandbox = Sandbox::new("api.scoped_combinations");
    let reporter = RecordingReporter::new();
    let _scope = TestScope::enter(sandbox.namer());
    set_default_reporter(reporter.clone());

    let result = verification();
    assert!(
        result.as_ref().is_err_and(ApprovalError::is_mismatch),
        "expected a first-run mismatch, got: {result:?}"
    );
    assert_eq!(reporter.reports().len(), 1);
    sandbox.received().unwrap_or_else(|| panic!("received file should be kept"))
}

#[rstest]
fn free_homogeneous_combinations_accept_a_formatter() {
    let text = scoped_received_text(|| {
        verify_all_combinations_with(
            |args: &[&u8]| Ok::<u8, String>(args.iter().copied().sum()),
            &[vec![1, 2], vec![10]],
            |args, result| format!("{args:?} -> {result:?}\n"),
        )
    });
    assert_eq!(text, "[1, 10] -> Ok(11)\n[2, 10] -> Ok(12)\n");
}

#[rstest]
fn free_two_way_combinations_accept_a_formatter() {
    let text = scoped_received_text(|| {
        verify_all_combinations2_with(
            |name: &&str, count: &usize| Ok::<_, String>(name.repeat(*count)),
            &["ab"],
            &[0, 2],
            |(name, count), result| format!("{name} x{count} = {result:?}\n"),
        )
    });
    assert_eq!(text, "ab x0 = Ok(\"\")\nab x2 = Ok(\"abab\")\n");
}

#[rstest]
fn free_three_way_combinations_accept_a_formatter() {
    let text = scoped_received_text(|| {
        verify_all_combinations3_with(
            |a: &i8, b: &i8, c: &i8| {
                a.checked_add(*b)
                    .and_then(|partial| partial.checked_add(*c))
                    .ok_or(())
            },
            &[1],
            &[2, 127],
            &[3],
            |(a, b, c), result| format!("{a}+{b}+{c} {result:?}\n"),
        )
    });
    assert_eq!(text, "1+2+3 Ok(6)\n1+127+3 Err(())\n");
}

#[rstest]
fn free_functions_require_an_active_scope() {
    let result = verify("outside any approval test");
    assert!(matches!(result, Err(ApprovalError::Configuration { .. })));
}

#[rstest]
fn free_functions_use_the_scope_and_default_reporter() {
    let sandbox = Sandbox::new("api.scoped");
    let reporter = RecordingReporter::new();
    let _scope = TestScope::enter(sandbox.namer());
    set_default_reporter(reporter.clone());

    assert!(verify_all("Scoped", ["one"]).is_err());
    assert_eq!(sandbox.received().as_deref(), Some("Scoped\n\n0) one\n"));
    assert_eq!(reporter.reports().len(), 1);

    sandbox.promote_received();
    verify_all("Scoped", ["one"]).expect("promoted output should verify");
    assert_eq!(sandbox.received(), None);
}
