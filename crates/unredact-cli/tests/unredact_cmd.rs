//! Integration tests for the `unredact` binary.

use std::path::Path;

use assert_cmd::Command;
use lopdf::{Dictionary, Object, Stream, dictionary};
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("unredact").unwrap()
}

/// Create a single-page PDF with the given content stream and annotations.
fn pdf_with(content: &[u8], annots: Vec<Dictionary>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let content_id = doc.add_object(Stream::new(dictionary! {}, content.to_vec()));

    let annot_refs: Vec<Object> = annots
        .into_iter()
        .map(|annot| Object::Reference(doc.add_object(annot)))
        .collect();

    let mut page_dict = dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
        "Contents" => Object::Reference(content_id),
    };
    if !annot_refs.is_empty() {
        page_dict.set("Annots", annot_refs);
    }
    let page_id = doc.add_object(page_dict);

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => Object::Integer(1),
    });

    if let Ok(page_obj) = doc.get_object_mut(page_id) {
        if let Ok(dict) = page_obj.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn redact_annot() -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Redact",
        "Rect" => vec![
            Object::Integer(72),
            Object::Integer(700),
            Object::Integer(300),
            Object::Integer(720),
        ],
    }
}

fn write_pdf(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn operators(path: &Path) -> Vec<String> {
    let doc = lopdf::Document::load(path).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    lopdf::content::Content::decode(&content)
        .unwrap()
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect()
}

#[test]
fn writes_default_output_and_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_pdf(
        dir.path(),
        "memo.pdf",
        &pdf_with(b"q 0 0 0 rg 10 10 100 50 re f Q", vec![redact_annot()]),
    );
    let expected = dir.path().join("memo_unredacted.pdf");

    cmd()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "Removed 1 redaction annotations and 2 rectangle ops -> {}\n",
            expected.display()
        )));

    assert!(expected.exists());
    assert_eq!(operators(&expected), vec!["q", "rg", "Q"]);
}

#[test]
fn small_rectangles_are_removed_too() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_pdf(dir.path(), "tiny.pdf", &pdf_with(b"0 g 1 1 2 2 re f", vec![]));

    cmd()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Removed 0 redaction annotations and 2 rectangle ops",
        ));
}

#[test]
fn explicit_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_pdf(dir.path(), "in.pdf", &pdf_with(b"BT ET", vec![]));
    let output = dir.path().join("clean.pdf");

    cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 redaction annotations and 0 rectangle ops"))
        .stdout(predicate::str::contains("clean.pdf"));

    assert!(output.exists());
    assert!(!dir.path().join("in_unredacted.pdf").exists());
}

#[test]
fn json_format_reports_pages() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_pdf(
        dir.path(),
        "doc.pdf",
        &pdf_with(b"0 g 0 0 100 100 re f", vec![redact_annot(), redact_annot()]),
    );

    let assert = cmd().arg(&input).args(["--format", "json"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["totals"]["annotations_removed"], 2);
    assert_eq!(json["totals"]["path_ops_removed"], 2);
    assert_eq!(json["pages"].as_array().unwrap().len(), 1);
    assert_eq!(json["pages"][0]["page_index"], 0);
    assert!(json["output"].as_str().unwrap().ends_with("doc_unredacted.pdf"));
}

#[test]
fn missing_file_exits_with_2() {
    cmd()
        .arg("/nonexistent/file.pdf")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File not found: /nonexistent/file.pdf"));
}

#[test]
fn directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn invalid_pdf_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_pdf(dir.path(), "broken.pdf", b"this is not a pdf");

    cmd()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
    assert!(!dir.path().join("broken_unredacted.pdf").exists());
}

#[test]
fn missing_argument_is_usage_error() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage"));
}
