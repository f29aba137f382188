use std::fs;

use tempfile::tempdir;

use strife::{ErrorCode, StrifeError};
use strife_cli::{Args, run};

fn args(input: String, output: Option<String>) -> Args {
    Args {
        input,
        lower: false,
        tasks: false,
        bindings: false,
        output,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn test_outline_written_to_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("map01.acs");
    fs::write(
        &input,
        "#include \"zcommon.acs\"\n// TODO: tune\nnamespace Map {\n    enum Door { OPEN, SHUT };\n    function void Open(int tag) { }\n}\n",
    )
    .unwrap();
    let output = temp_dir.path().join("outline.txt");

    let mut args = args(
        input.to_string_lossy().to_string(),
        Some(output.to_string_lossy().to_string()),
    );
    args.lower = true;
    args.tasks = true;
    args.bindings = true;
    run(&args).expect("run succeeds");

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("include"), "lowering drops includes:\n{text}");
    assert!(text.contains("namespace Map\n  define OPEN  [line 4]\n"));
    assert!(text.contains("  map01.acs:2: TODO: tune\n"));
    assert!(text.contains("  Map.Open(int tag) -> void  [line 5]\n"));
}

#[test]
fn test_parse_error_is_returned() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.acs");
    fs::write(&input, "script 1 OPEN clientside clientside { }\n").unwrap();
    let output = temp_dir.path().join("out.txt");

    let err = run(&args(
        input.to_string_lossy().to_string(),
        Some(output.to_string_lossy().to_string()),
    ))
    .unwrap_err();
    match err {
        StrifeError::Parse(err) => {
            assert_eq!(err.diagnostic().code(), Some(ErrorCode::E101));
            assert_eq!(err.file(), "broken.acs");
        }
        other => panic!("unexpected error {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_missing_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("absent.acs");

    let err = run(&args(input.to_string_lossy().to_string(), None)).unwrap_err();
    assert!(matches!(err, StrifeError::Parse(ref e) if e.diagnostic().code() == Some(ErrorCode::E200)));
}
