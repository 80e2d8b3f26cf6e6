use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

// Dark top-left region above a boundary falling one row every 10 columns,
// with a mid-gray band below it.
fn write_edge_png(path: &Path) {
    let img = image::GrayImage::from_fn(300, 120, |x, y| {
        let edge = 70.0 - 0.1 * x as f32;
        let y = y as f32;
        let v = if y < edge {
            20
        } else if y < edge + 3.0 {
            160
        } else {
            230
        };
        image::Luma([v])
    });
    img.save(path).expect("write png");
}

fn edge_mtf() -> Command {
    Command::cargo_bin("edge-mtf").expect("edge-mtf binary")
}

#[test]
fn writes_all_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("edge.png");
    write_edge_png(&input);
    let out = dir.path().join("out");

    edge_mtf()
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .arg("--no-prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));

    for name in [
        "SumESF.csv",
        "LSFThreshold.csv",
        "MTF.csv",
        "LSFThresholdw.csv",
        "edge_changed.png",
        "original_source.bmp",
        "mtf_report.json",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    assert!(!out.join("ESFSegments.csv").exists());

    // 100 MTF samples, the last one is not exported
    let mtf = std::fs::read_to_string(out.join("MTF.csv")).expect("read MTF.csv");
    assert_eq!(mtf.lines().count(), 99);
    assert!(mtf.starts_with("0;"));

    let report = edge_mtf::MtfReport::load_json(out.join("mtf_report.json")).expect("report");
    assert_eq!(report.oversampling, Some(10));
    assert!(report.error.is_none());
}

#[test]
fn config_file_supplies_image_and_segments_dump() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("edge.png");
    write_edge_png(&input);
    let cfg = edge_mtf::MtfConfig {
        image_path: Some(input.to_string_lossy().into_owned()),
        output_dir: Some(dir.path().join("cfg_out").to_string_lossy().into_owned()),
        ..Default::default()
    };
    let cfg_path = dir.path().join("config.json");
    cfg.write_json(&cfg_path).expect("write config");

    edge_mtf()
        .arg("--config")
        .arg(&cfg_path)
        .arg("--dump-segments")
        .arg("--no-prompt")
        .assert()
        .success();

    assert!(dir.path().join("cfg_out/ESFSegments.csv").is_file());
}

#[test]
fn declining_the_chart_prompt_skips_launch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("edge.png");
    write_edge_png(&input);

    edge_mtf()
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--chart-tool")
        .arg(dir.path().join("missing-tool"))
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Y/n]"));
}

#[test]
fn missing_image_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    edge_mtf()
        .arg(dir.path().join("nope.png"))
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--no-prompt")
        .assert()
        .failure();
}

#[test]
fn flat_edge_reports_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("flat.png");
    image::GrayImage::from_fn(64, 64, |_, y| image::Luma([if y < 32 { 0 } else { 255 }]))
        .save(&input)
        .expect("write png");

    edge_mtf()
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--no-prompt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("oversampling"));

    let report =
        edge_mtf::MtfReport::load_json(dir.path().join("mtf_report.json")).expect("report");
    assert!(report.error.is_some());
}
