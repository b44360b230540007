//! End-to-end tests of the diff command over real files

use crate::common::{sample_data, CliTestRunner};

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

#[test]
fn test_diff_reports_all_outcomes() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::people_before()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::people_after()).unwrap();

    let outcome = runner.expect_success(&["-k", "1", a.to_str().unwrap(), b.to_str().unwrap()]);

    let out = lines(&outcome.output);
    assert_eq!(out[0], "=,id,name,age");
    assert!(out.contains(&"#,1,Alice,30|-|31"));
    assert!(out.contains(&"+,3,Carol,22"));
    assert!(out.contains(&"-,4,Dana,40"));
    assert_eq!(out.len(), 4);

    assert_eq!(outcome.summary.added, 1);
    assert_eq!(outcome.summary.removed, 1);
    assert_eq!(outcome.summary.modified, 1);
    assert_eq!(outcome.summary.exit_code(), 1);
}

#[test]
fn test_identical_files_exit_zero() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::people_before()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::people_before()).unwrap();

    let outcome = runner.expect_success(&["-k", "1", a.to_str().unwrap(), b.to_str().unwrap()]);
    // Only the header row is echoed
    assert_eq!(lines(&outcome.output), vec!["=,id,name,age"]);
    assert_eq!(outcome.summary.exit_code(), 0);
}

#[test]
fn test_no_header_mode() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::people_before()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::people_before()).unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-n", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert!(outcome.output.is_empty());
    assert!(outcome.summary.header.is_none());
}

#[test]
fn test_common_rows_flag() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::people_before()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::people_after()).unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-c", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert!(lines(&outcome.output).contains(&"=,2,Bob,25"));
}

#[test]
fn test_ignored_field() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::people_before()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::people_after()).unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-i", "3", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert_eq!(outcome.summary.modified, 0);
    assert!(!outcome.output.contains("30|-|31"));
}

#[test]
fn test_newline_format() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &[vec!["1", "x"]]).unwrap();
    let b = runner.fixture().create_csv("b.csv", &[vec!["1", "y"]]).unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-n", "-f", "newline", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert_eq!(outcome.output, "#,1,x\ny\n");
}

#[test]
fn test_bold_format_when_requested() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &[vec!["1", "x"]]).unwrap();
    let b = runner.fixture().create_csv("b.csv", &[vec!["1", "y"]]).unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-n", "-f", "bold", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert_eq!(outcome.output, "#,1,\x1b[1mx\x1b[0m|\x1b[1my\x1b[0m\n");
}

#[test]
fn test_separator_is_guessed_per_input() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_delimited("a.csv", &sample_data::people_before(), ";")
        .unwrap();
    let b = runner
        .fixture()
        .create_delimited("b.csv", &sample_data::people_after(), "\t")
        .unwrap();

    let outcome = runner.expect_success(&["-k", "1", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert!(lines(&outcome.output).contains(&"#,1,Alice,30|-|31"));
    assert_eq!(outcome.summary.modified, 1);
}

#[test]
fn test_explicit_separator_used_for_output() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_delimited("a.csv", &sample_data::people_before(), "|")
        .unwrap();
    let b = runner
        .fixture()
        .create_delimited("b.csv", &sample_data::people_after(), "|")
        .unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-s", "|", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert!(lines(&outcome.output).contains(&"#|1|Alice|30!-!31"));
}

#[test]
fn test_gzip_input() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv_gz("a.csv.gz", &sample_data::people_before()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::people_after()).unwrap();

    let outcome = runner.expect_success(&["-k", "1", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert_eq!(outcome.summary.added, 1);
    assert_eq!(outcome.summary.removed, 1);
    assert_eq!(outcome.summary.modified, 1);
}

#[test]
fn test_reversed_large_input() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_large_csv("a.csv", 2000, 4, false).unwrap();
    let b = runner.fixture().create_large_csv("b.csv", 2000, 4, true).unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-n", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert!(outcome.output.is_empty());
    assert_eq!(outcome.summary.unchanged, 2000);
    assert_eq!(outcome.summary.exit_code(), 0);
}

#[test]
fn test_rows_of_different_widths_are_written() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv("a.csv", &[vec!["1", "x", "y"], vec!["2", "p", "q"]])
        .unwrap();
    let b = runner
        .fixture()
        .create_csv("b.csv", &[vec!["1", "x", "y", "p", "q"], vec!["3", "r"]])
        .unwrap();

    let outcome = runner.expect_success(&["-k", "1", "-n", a.to_str().unwrap(), b.to_str().unwrap()]);

    let out = lines(&outcome.output);
    assert_eq!(out[0], "#,1,x,y,_|-|p,_|-|q");
    assert!(out.contains(&"-,2,p,q"));
    assert!(out.contains(&"+,3,r"));
    assert_eq!(out.len(), 3);
    assert_eq!(outcome.summary.modified, 1);
    assert_eq!(outcome.summary.removed, 1);
    assert_eq!(outcome.summary.added, 1);
}

#[test]
fn test_narrow_row_after_wide_modification() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv_raw("a.csv", "id,name,age\n1,Alice,30\n2,Bob\n")
        .unwrap();
    let b = runner
        .fixture()
        .create_csv_raw("b.csv", "id,name,age\n1,Alice,31\n4,Dana,40,extra\n")
        .unwrap();

    let outcome = runner.expect_success(&["-k", "1", a.to_str().unwrap(), b.to_str().unwrap()]);

    let out = lines(&outcome.output);
    assert_eq!(out[0], "=,id,name,age");
    assert_eq!(out[1], "#,1,Alice,30|-|31");
    assert!(out.contains(&"-,2,Bob"));
    assert!(out.contains(&"+,4,Dana,40,extra"));
    assert_eq!(out.len(), 4);
}
