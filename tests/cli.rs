use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn autograph_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("autograph").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn write_strokes(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("strokes.json");
    std::fs::write(
        &path,
        "[[[20, 80], [60, 60, 16], [100, 90, 32], [140, 70, 48]], [[30, 120], [160, 118]]]",
    )
    .unwrap();
    path
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    autograph_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Render transparent signatures to PNG, SVG and PDF",
        ));
}

#[test]
fn config_schema_is_json() {
    let temp = TempDir::new().unwrap();
    autograph_cmd(&temp)
        .arg("--config-schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"freehand\""))
        .stdout(predicate::str::contains("\"export\""));
}

#[test]
fn unsupported_format_is_rejected() {
    let temp = TempDir::new().unwrap();
    autograph_cmd(&temp)
        .args(["typed", "--name", "Jane Doe", "--format", "webp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported export format"));
}

#[test]
fn invalid_ratio_is_rejected() {
    let temp = TempDir::new().unwrap();
    autograph_cmd(&temp)
        .args(["typed", "--name", "Jane Doe", "--ratio", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pixel ratio must be 1, 2 or 3"));
}

#[test]
fn empty_typed_signature_fails() {
    let temp = TempDir::new().unwrap();
    autograph_cmd(&temp)
        .args(["typed", "--output-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to export"));
}

#[test]
fn freehand_png_is_written_with_generated_name() {
    let temp = TempDir::new().unwrap();
    let strokes = write_strokes(&temp);
    let out = temp.path().join("out");

    autograph_cmd(&temp)
        .args(["freehand", "--name", "John O'Brien", "--strokes"])
        .arg(&strokes)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "signature-john-o-brien-600x200@2x.png",
        ));

    let bytes = std::fs::read(out.join("signature-john-o-brien-600x200@2x.png")).unwrap();
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[test]
fn freehand_pdf_respects_ratio_flag() {
    let temp = TempDir::new().unwrap();
    let strokes = write_strokes(&temp);

    autograph_cmd(&temp)
        .args(["freehand", "--format", "document", "--ratio", "1", "--strokes"])
        .arg(&strokes)
        .arg("--output-dir")
        .arg(temp.path())
        .assert()
        .success();

    let bytes = std::fs::read(temp.path().join("signature-600x200.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn malformed_strokes_file_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    std::fs::write(&path, "[[[1, 2, 3, 4]]]").unwrap();

    autograph_cmd(&temp)
        .args(["freehand", "--strokes"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected [x, y] or [x, y, t]"));
}

#[test]
fn typed_svg_uses_config_canvas() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("autograph");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[canvas]\nwidth = 400\nheight = 120\npixel_ratio = 1\n\n[export]\nformat = \"svg\"\n",
    )
    .unwrap();

    autograph_cmd(&temp)
        .args(["typed", "--name", "Vinit Shahdeo", "--output-dir"])
        .arg(temp.path())
        .assert()
        .success();

    let svg = std::fs::read_to_string(temp.path().join("signature-vinit-shahdeo-400x120.svg")).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn out_of_range_flags_are_clamped() {
    let temp = TempDir::new().unwrap();

    autograph_cmd(&temp)
        .args([
            "typed",
            "--name",
            "Jane Doe",
            "--padding",
            "3000000000",
            "--slant",
            "90",
            "--rotation",
            "720",
            "--size",
            "9000",
            "--texture",
            "400",
            "--ratio",
            "1",
            "--output-dir",
        ])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("signature-jane-doe-600x200.png"));

    assert!(temp.path().join("signature-jane-doe-600x200.png").exists());
}
