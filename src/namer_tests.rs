//! Unit tests for artifact naming.

use rstest::*;
use tempfile::TempDir;

use super::*;

#[fixture]
fn namer() -> Namer {
    let identity = TestIdentity::new("orders.totals").expect("valid identity");
    Namer::new("/work/tests", identity)
}

#[rstest]
fn base_name_joins_directory_and_identity(namer: Namer) {
    assert_eq!(namer.base_name(), Utf8PathBuf::from("/work/tests/orders.totals"));
}

#[rstest]
fn unit_paths_share_directory_stem_and_extension(namer: Namer) {
    let unit = namer.unit(".txt");
    assert_eq!(
        unit.approved_path(),
        Utf8PathBuf::from("/work/tests/orders.totals.approved.txt")
    );
    assert_eq!(
        unit.received_path(),
        Utf8PathBuf::from("/work/tests/orders.totals.received.txt")
    );
    assert_eq!(unit.directory(), namer.directory());
}

#[rstest]
#[case::dotted(".json", "orders.totals.approved.json")]
#[case::bare("json", "orders.totals.approved.json")]
#[case::empty("", "orders.totals.approved")]
fn extensions_are_normalized(namer: Namer, #[case] extension: &str, #[case] expected: &str) {
    assert_eq!(namer.unit(extension).approved_file_name(), expected);
}

#[rstest]
fn same_identity_resolves_to_same_files(namer: Namer) {
    let again = Namer::new(
        "/work/tests",
        TestIdentity::new("orders.totals").expect("valid identity"),
    );
    assert_eq!(namer.unit(".txt"), again.unit(".txt"));
}

#[rstest]
fn current_test_without_scope_is_a_configuration_error() {
    let result = Namer::for_current_test();
    assert!(matches!(result, Err(ApprovalError::Configuration { .. })));
}

#[rstest]
fn current_test_reads_the_active_scope(namer: Namer) {
    let _scope = TestScope::enter(namer.clone());
    assert_eq!(Namer::for_current_test().expect("scope is active"), namer);
}

#[rstest]
fn source_directory_uses_parent_of_absolute_sources() {
    assert_eq!(
        source_directory("/ignored", "/abs/tests/it.rs"),
        Utf8PathBuf::from("/abs/tests")
    );
}

#[rstest]
fn source_directory_walks_up_to_the_workspace_root() {
    let temp = TempDir::new().expect("should create temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("UTF-8 temp dir");
    let member = root.join("crates/member");
    std::fs::create_dir_all(member.join("tests")).expect("should create member");
    std::fs::write(member.join("tests/it.rs"), "").expect("should write source");

    let resolved = source_directory(member.as_str(), "crates/member/tests/it.rs");
    assert_eq!(resolved, member.join("tests"));
}

#[rstest]
fn source_directory_falls_back_to_manifest_relative_parent() {
    assert_eq!(
        source_directory("/nowhere/crate", "tests/missing.rs"),
        Utf8PathBuf::from("/nowhere/crate/tests")
    );
}
