use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use x16::{Pixel, PNG};

const OUTPUT: &str = "x16.png";

fn x16(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("x16").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn workdir() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn logo_with_defaults_writes_the_png() {
    let dir = workdir();
    x16(dir.path()).arg("logo").assert().success();

    let image = PNG::decode(&fs::read(dir.path().join(OUTPUT)).unwrap())
        .unwrap()
        .into_image();
    let levels: Vec<u8> = image.palette().iter().map(|p| p.red).collect();
    assert_eq!(levels, [255, 170, 85, 0]);
    assert!(image.palette().iter().all(Pixel::is_grey));
}

#[test]
fn logo_with_four_levels_uses_them_in_order() {
    let dir = workdir();
    x16(dir.path())
        .args(["-v", "logo", "12", "0", "255", "99"])
        .assert()
        .success();

    let image = PNG::decode(&fs::read(dir.path().join(OUTPUT)).unwrap())
        .unwrap()
        .into_image();
    assert_eq!(
        image.palette(),
        &[
            Pixel::grey(12),
            Pixel::grey(0),
            Pixel::grey(255),
            Pixel::grey(99)
        ]
    );
    for i in 0..16i32 {
        for j in 0..16i32 {
            let stripe = (i - 2) % 3 == 0 || (j - 1) % 3 == 0;
            assert_eq!(image.pixel(i as u32, j as u32), Some(stripe as u8));
        }
    }
}

#[test]
fn logo_overwrites_previous_output() {
    let dir = workdir();
    let path = dir.path().join(OUTPUT);
    fs::write(&path, b"stale").unwrap();
    x16(dir.path()).arg("logo").assert().success();
    assert!(PNG::decode(&fs::read(&path).unwrap()).is_ok());
}

#[test]
fn wrong_parameter_count_creates_nothing() {
    for operands in [vec!["1"], vec!["1", "2"], vec!["1", "2", "3"], vec!["1"; 5]] {
        let dir = workdir();
        x16(dir.path())
            .arg("logo")
            .args(&operands)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Wrong number of parameters!"));
        assert!(!dir.path().join(OUTPUT).exists(), "{operands:?}");
    }
}

#[test]
fn wrong_parameter_count_leaves_existing_file_alone() {
    let dir = workdir();
    let path = dir.path().join(OUTPUT);
    fs::write(&path, b"keep me").unwrap();
    x16(dir.path()).args(["logo", "1", "2"]).assert().code(2);
    assert_eq!(fs::read(&path).unwrap(), b"keep me");
}

#[test]
fn non_numeric_level_is_a_format_error() {
    let dir = workdir();
    x16(dir.path())
        .args(["logo", "1", "two", "3", "4"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("'two'"));
    assert!(!dir.path().join(OUTPUT).exists());
}

#[test]
fn out_of_range_level_is_a_range_error() {
    let dir = workdir();
    x16(dir.path())
        .args(["logo", "1", "2", "3", "256"])
        .assert()
        .code(6);
    x16(dir.path())
        .args(["logo", "-1", "2", "3", "4"])
        .assert()
        .code(6);
    assert!(!dir.path().join(OUTPUT).exists());
}

#[test]
fn unwritable_output_is_a_system_error() {
    let dir = workdir();
    fs::create_dir(dir.path().join(OUTPUT)).unwrap();
    x16(dir.path())
        .arg("logo")
        .assert()
        .code(5)
        .stderr(predicate::str::starts_with("Error opening file x16.png: "));
}

#[test]
fn unknown_command_fails_with_its_name() {
    x16(workdir().path())
        .arg("foobar")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("foobar"));
}

#[test]
fn missing_command_fails() {
    x16(workdir().path())
        .arg("-d")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No command given!").and(
            predicate::str::contains("--help' to see possible parameters."),
        ));
}

#[test]
fn bad_flag_fails() {
    x16(workdir().path())
        .args(["--frobnicate", "logo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized option '--frobnicate'"));
}

#[test]
fn help_command_and_flag_agree() {
    let dir = workdir();
    let from_flag = x16(dir.path()).arg("-h").assert().success();
    let from_command = x16(dir.path()).arg("help").assert().success();
    assert_eq!(
        from_flag.get_output().stdout,
        from_command.get_output().stdout
    );
    assert!(String::from_utf8_lossy(&from_flag.get_output().stdout).contains("Commands are:"));
}

#[test]
fn version_flag_exits_before_dispatch() {
    let dir = workdir();
    x16(dir.path())
        .args(["--version", "logo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("Copyright"));
    assert!(!dir.path().join(OUTPUT).exists());
}

#[test]
fn usage_command_prints_hint_to_stderr() {
    x16(workdir().path())
        .arg("usage")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--help"));
}

#[test]
fn ambiguous_flag_lists_possibilities() {
    x16(workdir().path())
        .args(["--ver", "logo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "option '--ver' is ambiguous; possibilities: '--verbose' '--version'",
        ));
}

#[test]
fn verbose_logo_narrates_its_steps() {
    x16(workdir().path())
        .args(["-v", "logo"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("No colors given, using defaults")
                .and(predicate::str::contains("Setting pixels"))
                .and(predicate::str::contains("Writing file")),
        );
}

#[test]
fn debug_logo_logs_arguments_and_palette() {
    x16(workdir().path())
        .args(["-d", "logo", "1", "2", "3", "4"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("argc: 6")
                .and(predicate::str::contains("argv["))
                .and(predicate::str::contains("color levels: [1, 2, 3, 4]"))
                .and(predicate::str::contains("palette indices: [0, 1, 2, 3]")),
        );
}

#[test]
fn quiet_logo_prints_nothing() {
    x16(workdir().path())
        .arg("logo")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn log_flags_do_not_change_the_output_file() {
    let written = |flags: &[&str]| {
        let dir = workdir();
        x16(dir.path())
            .args(flags)
            .args(["logo", "1", "2", "3", "4"])
            .assert()
            .success();
        fs::read(dir.path().join(OUTPUT)).unwrap()
    };
    let plain = written(&[]);
    assert_eq!(written(&["-v"]), plain);
    assert_eq!(written(&["-d"]), plain);
}
