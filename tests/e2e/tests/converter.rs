//! E2E тесты для CLI инструмента `qbo-converter`.
//!
//! Проверяем обе подкоманды:
//! - `convert` (CSV → QBO), включая отказ без частичного вывода
//! - `view` (разбор QBO), включая «чужие» выписки

use std::fs;

use assert_cmd::Command;
use e2e_tests::{fixture, fixture_text};
use predicates::prelude::*;
use tempfile::tempdir;

/// Создать команду для запуска qbo-converter.
///
/// `cargo_bin` deprecated из-за edge case с custom build directories,
/// но это единственный способ для кросс-крейтовых бинарников.
#[expect(deprecated)]
fn qbo_converter() -> Command {
    Command::cargo_bin("qbo-converter").unwrap()
}

// ============================================================================
// convert
// ============================================================================

#[test]
fn test_convert_to_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("converted_output.qbo");

    qbo_converter()
        .args([
            "convert",
            "--input",
            fixture("transactions.csv").to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Converted 4 transaction(s)"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("OFXHEADER:100\n"));
    assert!(content.contains("<BANKID>123456789\n"));
    assert!(content.contains("<ACCTID>987654321\n"));
    assert!(content.contains("<ACCTTYPE>CHECKING\n"));
    assert_eq!(content.matches("<STMTTRN>").count(), 4);
    assert!(content.ends_with("</OFX>"));
}

#[test]
fn test_convert_coffee_shop_block() {
    let output = qbo_converter()
        .args(["convert", "-i", fixture("transactions.csv").to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains(
        "<STMTTRN>\n<TRNTYPE>DEBIT\n<DTPOSTED>20240115\n<TRNAMT>-4.5\n<FITID>20240115"
    ));
    assert!(text.contains("<NAME>Coffee Shop\n<MEMO>\n</STMTTRN>"));
    assert!(text.contains("<TRNTYPE>CREDIT\n<DTPOSTED>20240116\n<TRNAMT>2500.0\n"));
    // Ноль — зачисление
    assert!(text.contains("<TRNTYPE>CREDIT\n<DTPOSTED>20240118\n<TRNAMT>0.0\n"));
}

#[test]
fn test_convert_custom_account_ids() {
    qbo_converter()
        .args([
            "convert",
            "-i",
            fixture("transactions.csv").to_str().unwrap(),
            "--bank-id",
            "111000025",
            "--account-id",
            "42",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<BANKID>111000025\n<ACCTID>42\n"));
}

#[test]
fn test_convert_from_stdin() {
    qbo_converter()
        .arg("convert")
        .write_stdin("Date,Description,Amount\n03/01/2024,Book,-12.00\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("<DTPOSTED>20240301\n<TRNAMT>-12.0\n"))
        .stderr(predicate::str::contains("Converted 1 transaction(s)"));
}

#[test]
fn test_convert_fixed_ids_are_deterministic() {
    let run = || {
        qbo_converter()
            .args(["convert", "-i", fixture("transactions.csv").to_str().unwrap()])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

// ============================================================================
// convert: ошибки (всё или ничего)
// ============================================================================

#[test]
fn test_convert_missing_amount_column() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.qbo");

    qbo_converter()
        .args([
            "convert",
            "-i",
            fixture("missing_amount.csv").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing required column 'Amount'"));

    assert!(!output.exists(), "no partial statement file");
}

#[test]
fn test_convert_invalid_date_names_row_and_value() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.qbo");

    qbo_converter()
        .args([
            "convert",
            "-i",
            fixture("invalid_date.csv").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Row 2: Invalid date '02/30/2024'"));

    assert!(!output.exists());
}

#[test]
fn test_convert_invalid_date_writes_nothing_to_stdout() {
    qbo_converter()
        .args(["convert", "-i", fixture("invalid_date.csv").to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_convert_missing_input_file() {
    qbo_converter()
        .args(["convert", "-i", "definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

// ============================================================================
// view
// ============================================================================

#[test]
fn test_convert_then_view() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("statement.qbo");

    qbo_converter()
        .args([
            "convert",
            "-i",
            fixture("transactions.csv").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    qbo_converter()
        .args(["view", "-i", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("QBO File Contents:\n"))
        .stdout(predicate::str::contains("Bank Routing Number: 123456789\n"))
        .stdout(predicate::str::contains("Account Type: CHECKING\n"))
        .stdout(predicate::str::contains(
            "Date: 01/15/2024\nType: DEBIT\nAmount: -$4.50\nDescription: Coffee Shop\n",
        ))
        .stdout(predicate::str::contains("Amount: $2,500.00\n"))
        .stdout(predicate::str::contains("Memo: January salary\n"));
}

#[test]
fn test_view_foreign_statement() {
    qbo_converter()
        .args(["view", "--input", fixture("foreign.qbo").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank Routing Number: 021000021\n"))
        .stdout(predicate::str::contains("Account Type: Unknown\n"))
        // DTPOSTED с временем и зоной — не дата формата YYYYMMDD
        .stdout(predicate::str::contains("Date: Unknown\nType: CHECK\nAmount: -$1,234.50\n"))
        .stdout(predicate::str::contains("Date: 01/10/2024\nType: DEP\nAmount: $0.00\n"))
        .stdout(predicate::str::contains("Transaction ID: Unknown\n"))
        .stdout(predicate::str::contains("CHECKNUM").not());
}

#[test]
fn test_view_empty_statement() {
    qbo_converter()
        .args(["view", "-i", fixture("empty.qbo").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found in the statement."));
}

#[test]
fn test_view_from_stdin() {
    let statement = fixture_text("foreign.qbo").unwrap();

    qbo_converter()
        .arg("view")
        .write_stdin(statement)
        .assert()
        .success()
        .stdout(predicate::str::contains("File: <stdin>\n"))
        .stdout(predicate::str::contains("Account Number: 000123456\n"));
}

#[test]
fn test_view_garbage_is_not_an_error() {
    qbo_converter()
        .arg("view")
        .write_stdin("this is not a statement\n<<<>>>\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank Routing Number: Unknown\n"));
}

// ============================================================================
// Аргументы
// ============================================================================

#[test]
fn test_missing_subcommand() {
    qbo_converter().assert().failure();
}

#[test]
fn test_help() {
    qbo_converter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("view"));
}
