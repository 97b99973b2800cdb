mod common;

use std::fs;
use tempfile::tempdir;

use common::{file_set, list_dir, page_count, page_texts, write_garbage, write_pdf};
use doc_flattener_core::merge::{merge, MergeOutcome};
use doc_flattener_core::model::{DirectoryPath, EligibleFileSet};
use doc_flattener_core::Error;

#[test]
fn test_empty_set_is_noop() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.pdf");

    let set = EligibleFileSet::new(DirectoryPath::root(), vec![]);
    let outcome = merge(&set, &output).unwrap();

    assert_eq!(outcome, MergeOutcome::Nothing);
    assert!(!output.exists());
    assert!(list_dir(tmp.path()).is_empty());
}

#[test]
fn test_single_file_is_copied_byte_for_byte() {
    let tmp = tempdir().unwrap();
    let input = write_pdf(&tmp.path().join("in/only.pdf"), "only", 3, 2048);
    let output = tmp.path().join("out.pdf");

    let outcome = merge(&file_set(&[input.clone()]), &output).unwrap();

    let original = fs::read(&input).unwrap();
    assert_eq!(fs::read(&output).unwrap(), original);
    assert_eq!(
        outcome,
        MergeOutcome::Copied {
            page_count: 3,
            size_bytes: original.len() as u64,
        }
    );
}

#[test]
fn test_single_unparsable_file_is_still_copied() {
    let tmp = tempdir().unwrap();
    let input = write_garbage(&tmp.path().join("in/odd.pdf"), 512);
    let output = tmp.path().join("out.pdf");

    let outcome = merge(&file_set(&[input.clone()]), &output).unwrap();

    assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());
    assert_eq!(
        outcome,
        MergeOutcome::Copied {
            page_count: 0,
            size_bytes: 512,
        }
    );
}

#[test]
fn test_merge_concatenates_pages_in_order() {
    let tmp = tempdir().unwrap();
    let a = write_pdf(&tmp.path().join("in/a.pdf"), "alpha", 2, 0);
    let b = write_pdf(&tmp.path().join("in/b.pdf"), "bravo", 1, 0);
    let c = write_pdf(&tmp.path().join("in/c.pdf"), "charlie", 3, 0);
    let output = tmp.path().join("out.pdf");

    // out of order on purpose; the set sorts by name
    let outcome = merge(&file_set(&[c, a, b]), &output).unwrap();

    match outcome {
        MergeOutcome::Merged {
            page_count,
            imported,
            failures,
            size_bytes,
        } => {
            assert_eq!(page_count, 6);
            assert_eq!(imported, 3);
            assert!(failures.is_empty());
            assert_eq!(size_bytes, fs::metadata(&output).unwrap().len());
        }
        other => panic!("expected a merge, got {:?}", other),
    }

    assert_eq!(page_count(&output), 6);
    let texts = page_texts(&output);
    let expected = [
        "(alpha page 1)",
        "(alpha page 2)",
        "(bravo page 1)",
        "(charlie page 1)",
        "(charlie page 2)",
        "(charlie page 3)",
    ];
    for (text, label) in texts.iter().zip(expected) {
        assert!(text.contains(label), "page {:?} should draw {}", text, label);
    }
}

#[test]
fn test_corrupt_input_is_skipped() {
    let tmp = tempdir().unwrap();
    let a = write_pdf(&tmp.path().join("in/a.pdf"), "first", 1, 0);
    let b = write_garbage(&tmp.path().join("in/b.pdf"), 4096);
    let c = write_pdf(&tmp.path().join("in/c.pdf"), "third", 2, 0);
    let output = tmp.path().join("out.pdf");

    let outcome = merge(&file_set(&[a, b.clone(), c]), &output).unwrap();

    match outcome {
        MergeOutcome::Merged {
            page_count,
            imported,
            failures,
            ..
        } => {
            assert_eq!(page_count, 3);
            assert_eq!(imported, 2);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].path, b);
        }
        other => panic!("expected a merge, got {:?}", other),
    }

    let texts = page_texts(&output);
    assert_eq!(texts.len(), 3);
    assert!(texts[0].contains("(first page 1)"));
    assert!(texts[1].contains("(third page 1)"));
    assert!(texts[2].contains("(third page 2)"));
}

#[test]
fn test_all_inputs_failing_writes_nothing() {
    let tmp = tempdir().unwrap();
    let out_dir = tmp.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();
    let a = write_garbage(&tmp.path().join("in/a.pdf"), 100);
    let b = write_garbage(&tmp.path().join("in/b.pdf"), 100);
    let output = out_dir.join("out.pdf");

    let result = merge(&file_set(&[a, b]), &output);

    assert!(matches!(result, Err(Error::NothingImported(2))));
    assert!(!output.exists());
    assert!(list_dir(&out_dir).is_empty(), "no temporary files left behind");
}

#[test]
fn test_write_failure_is_an_error() {
    let tmp = tempdir().unwrap();
    let a = write_pdf(&tmp.path().join("in/a.pdf"), "one", 1, 0);
    let b = write_pdf(&tmp.path().join("in/b.pdf"), "two", 1, 0);
    let output = tmp.path().join("missing-dir/out.pdf");

    assert!(merge(&file_set(&[a, b]), &output).is_err());
    assert!(!output.exists());
}

#[test]
fn test_existing_output_is_replaced() {
    let tmp = tempdir().unwrap();
    let a = write_pdf(&tmp.path().join("in/a.pdf"), "new", 1, 0);
    let b = write_pdf(&tmp.path().join("in/b.pdf"), "newer", 1, 0);
    let output = tmp.path().join("out.pdf");
    fs::write(&output, b"stale").unwrap();

    merge(&file_set(&[a, b]), &output).unwrap();

    assert_eq!(page_count(&output), 2);
}
