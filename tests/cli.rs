//! Command-line behaviour of the `stubsmith` binary.

mod common;

use assert_cmd::Command;
use common::TestProject;
use indoc::indoc;

const USERS: &str = indoc! {"
    #[mock]
    pub trait Users {
        fn fetch(&self, id: i64) -> Result<String, Error>;
    }

    pub trait Unmarked {
        fn ping(&self) -> Result<(), Error>;
    }
"};

const CLOCK: &str = indoc! {"
    #[mock]
    pub trait Clock {
        fn now(&self) -> u64;
    }
"};

fn stubsmith() -> Command {
    Command::cargo_bin("stubsmith").unwrap()
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_generate_prints_marked_mocks() {
    let project = TestProject::new();
    project.write("src/users.rs", USERS);

    let output = stubsmith()
        .current_dir(project.path())
        .args(["generate", "src", "--no-format"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("struct UsersMock"));
    assert!(!out.contains("UnmarkedMock"));
}

#[test]
fn test_generate_all_writes_output_file() {
    let project = TestProject::new();
    project.write("src/users.rs", USERS);

    stubsmith()
        .current_dir(project.path())
        .args(["generate", "src", "--all", "--no-format", "-o", "mocks/generated.rs"])
        .assert()
        .success();

    let generated = std::fs::read_to_string(project.path().join("mocks/generated.rs")).unwrap();
    assert!(generated.contains("struct UsersMock"));
    assert!(generated.contains("struct UnmarkedMock"));
    assert!(syn::parse_file(&generated).is_ok());
}

#[test]
fn test_generate_fails_for_unmockable_trait() {
    let project = TestProject::new();
    project.write("src/clock.rs", CLOCK);

    let output = stubsmith()
        .current_dir(project.path())
        .args(["generate", "src", "--no-format"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("`now`"));
}

#[test]
fn test_generate_honours_config_prefix() {
    let project = TestProject::new();
    project.write("src/users.rs", USERS);
    project.write("stubsmith.toml", "[mock]\nsetter_prefix = \"given\"\n");

    let output = stubsmith()
        .current_dir(project.path())
        .args(["generate", "src", "--no-format"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("fn given_fetch"));
}

#[test]
fn test_check_json_reports_failures() {
    let project = TestProject::new();
    project.write("src/users.rs", USERS);
    project.write("src/clock.rs", CLOCK);

    let output = stubsmith()
        .current_dir(project.path())
        .args(["check", "src", "--format", "json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["summary"]["traits"], 2);
    assert_eq!(report["summary"]["failed"], 1);
    assert_eq!(report["files"][0]["traits"][0]["kind"], "unrepresentable_failure");
}

#[test]
fn test_check_text_succeeds_when_all_mockable() {
    let project = TestProject::new();
    project.write("src/users.rs", USERS);

    let output = stubsmith()
        .current_dir(project.path())
        .args(["check", "src"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("Users -> UsersMock (1 methods)"));
}

#[test]
fn test_init_creates_config_once() {
    let project = TestProject::new();

    stubsmith()
        .current_dir(project.path())
        .arg("init")
        .assert()
        .success();
    assert!(project.path().join("stubsmith.toml").exists());

    stubsmith()
        .current_dir(project.path())
        .arg("init")
        .assert()
        .failure();
}
