//! CLI integration tests for hpcbuild.
//!
//! Each test runs the binary against a throwaway project directory with an
//! isolated hpcbuild home, so no user configuration leaks in.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the hpcbuild binary command, rooted at `project` with a private home.
fn hpcbuild(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hpcbuild").unwrap();
    cmd.current_dir(project)
        .env("HPCBUILD_HOME", project.join(".home"))
        .env_remove("HPCBUILD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_project_config(project: &Path, contents: &str) {
    let dir = project.join(".hpcbuild");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

// ============================================================================
// hpcbuild flags
// ============================================================================

#[test]
fn test_flags_debug_build() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "PLATFORM=linux", "BUILD_TYPE=Debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "-DLABEL_INT32 -DSCALAR_FLOAT64 -DWM_DP -fPIC -rdynamic -O0 -ggdb3 -DDEBUG -DTIMERS -DOMPI_SKIP_MPICXX",
        ));
}

#[test]
fn test_flags_fortran_adds_preprocessor_flags() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "--fortran", "PLATFORM=linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-O3 -g -DOMPI_SKIP_MPICXX -cpp -fcray-pointer"));
}

#[test]
fn test_flags_invalid_option_value() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "PLATFORM=linux", "PRECISION=XP"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PRECISION"))
        .stderr(predicate::str::contains("DP, SP"));
}

#[test]
fn test_flags_unsupported_platform() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "PLATFORM=solaris"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("solaris"))
        .stderr(predicate::str::contains("windows, linux, sw"));
}

#[test]
fn test_flags_unrecognized_compiler() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "PLATFORM=linux", "CC=xlc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xlc"));
}

#[test]
fn test_flags_malformed_assignment() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "BUILD_TYPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_flags_accelerator_slave_profile() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "--profile", "slave", "PLATFORM=sw", "ATHREAD=true"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "sw5gcc -mslave -mieee -msimd -DLABEL_INT32 -DSCALAR_FLOAT64 -g -O2 $_CPPINCFLAGS -fgnu89-inline -D_SW_COMPILER_VERSION -c -o $TARGET $SOURCES",
        ))
        .stdout(predicate::str::contains("-fPIC").not());
}

#[test]
fn test_flags_inactive_profile() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "--profile", "host", "PLATFORM=sw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not active"));
}

#[test]
fn test_flags_unknown_profile() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["flags", "--profile", "gpu", "PLATFORM=linux"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown profile `gpu`"));
}

// ============================================================================
// hpcbuild paths
// ============================================================================

#[test]
fn test_paths_default_build_option() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["paths", "PLATFORM=linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linuxg++Int32Float64Opt"));
}

#[test]
fn test_paths_json() {
    let tmp = temp_dir();

    let output = hpcbuild(tmp.path())
        .args(["paths", "--json", "PLATFORM=linux", "INT_TYPE=64", "BUILD_TYPE=Prof"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["build_option"], "linuxg++Int64Float64Prof");
    let lib_dir = json["lib_dir"].as_str().unwrap();
    assert!(lib_dir.ends_with("linuxg++Int64Float64Prof/lib"));
}

#[test]
fn test_paths_respects_project_dir() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    fs::create_dir_all(&project).unwrap();

    let output = hpcbuild(tmp.path())
        .args(["paths", "--json", "PLATFORM=linux"])
        .arg("--project-dir")
        .arg(&project)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let source_dir = json["source_dir"].as_str().unwrap();
    assert!(Path::new(source_dir).starts_with(&project));
}

// ============================================================================
// hpcbuild configure
// ============================================================================

#[test]
fn test_configure_json() {
    let tmp = temp_dir();

    let output = hpcbuild(tmp.path())
        .args(["configure", "--json", "PLATFORM=sw", "ATHREAD=yes"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["options"]["platform"], "sw");
    let profiles: Vec<_> = json["profiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["profile"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(profiles, vec!["c", "cxx", "fortran", "host", "slave", "cxx-host"]);
    assert_eq!(json["messages"]["CCCOMSTR"], "Compiling ==> $SOURCE");
}

#[test]
fn test_configure_reads_project_config() {
    let tmp = temp_dir();
    write_project_config(
        tmp.path(),
        r#"
[variables]
PLATFORM = "linux"
BUILD_TYPE = "Debug"

[[target]]
name = "solver"
kind = "app"
sources = ["apps/solver.cpp"]
linker = "fortran"
"#,
    );

    let output = hpcbuild(tmp.path())
        .args(["configure", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["paths"]["build_option"], "linuxg++Int32Float64Debug");
    assert_eq!(json["targets"][0]["name"], "solver");
    assert_eq!(json["targets"][0]["linker"], "mpiif90");
}

#[test]
fn test_cli_variables_override_config() {
    let tmp = temp_dir();
    write_project_config(tmp.path(), "[variables]\nPLATFORM = \"linux\"\nBUILD_TYPE = \"Debug\"\n");

    hpcbuild(tmp.path())
        .args(["paths", "BUILD_TYPE=Prof"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linuxg++Int32Float64Prof"));
}

#[test]
fn test_explicit_config_layer() {
    let tmp = temp_dir();
    let extra = tmp.path().join("site.toml");
    fs::write(&extra, "[compiler]\naliases = [{ key = \"xlc\", identity = \"c++\" }]\n").unwrap();

    hpcbuild(tmp.path())
        .args(["flags", "PLATFORM=linux", "CC=xlc"])
        .arg("--config")
        .arg(&extra)
        .assert()
        .success()
        .stdout(predicate::str::contains("-fPIC -rdynamic -O3 -g"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["paths", "PLATFORM=linux", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_broken_project_config_fails() {
    let tmp = temp_dir();
    write_project_config(
        tmp.path(),
        "[variables]\nPLATFORM = \"sw\"\nATHREAD = true\n\n[[target]\nname = \"solver\"\n",
    );

    hpcbuild(tmp.path())
        .args(["paths", "--color", "never"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: failed to parse config file"))
        .stderr(predicate::str::contains("--> "))
        .stderr(predicate::str::contains(".hpcbuild"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_compiler_path_keeps_install_roots_apart() {
    let tmp = temp_dir();

    let root_for = |cxx: &str| {
        let output = hpcbuild(tmp.path())
            .args(["paths", "--json", "PLATFORM=linux"])
            .arg(format!("CXX={}", cxx))
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        json["install_root"].as_str().unwrap().to_string()
    };

    assert_ne!(root_for("/opt/gcc9/bin/g++"), root_for("/opt/gcc12/bin/g++"));
}

#[test]
fn test_configure_text_output() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["configure", "--color", "never", "PLATFORM=linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build option: linuxg++Int32Float64Opt"))
        .stdout(predicate::str::contains("Profiles:"))
        .stderr(predicate::str::contains("Configured"));
}

// ============================================================================
// hpcbuild headers
// ============================================================================

#[test]
fn test_headers_plan() {
    let tmp = temp_dir();
    let src = tmp.path().join("src");
    fs::create_dir_all(src.join("mesh/lnInclude")).unwrap();
    fs::create_dir_all(src.join("OSspecific/posix")).unwrap();
    fs::create_dir_all(src.join("OSspecific/windows")).unwrap();
    fs::write(src.join("mesh/mesh.hpp"), "").unwrap();
    fs::write(src.join("mesh/mesh.cpp"), "").unwrap();
    fs::write(src.join("mesh/lnInclude/mesh.hpp"), "").unwrap();
    fs::write(src.join("OSspecific/posix/clock.H"), "").unwrap();
    fs::write(src.join("OSspecific/windows/winclock.H"), "").unwrap();

    let output = hpcbuild(tmp.path())
        .args(["headers", "--json", "PLATFORM=linux"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let mut names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            Path::new(h["dest"].as_str().unwrap())
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    assert_eq!(names, vec!["clock.H", "mesh.hpp"]);
}

#[test]
fn test_headers_with_clashing_names_fail() {
    let tmp = temp_dir();
    let src = tmp.path().join("src");
    fs::create_dir_all(src.join("fluid")).unwrap();
    fs::create_dir_all(src.join("solid")).unwrap();
    fs::write(src.join("fluid/Field.H"), "").unwrap();
    fs::write(src.join("solid/Field.H"), "").unwrap();

    hpcbuild(tmp.path())
        .args(["headers", "PLATFORM=linux"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("would both install to"));
}

#[test]
fn test_headers_without_source_dir_fails() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["headers", "PLATFORM=linux"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to plan header installation"));
}

// ============================================================================
// hpcbuild options / completions
// ============================================================================

#[test]
fn test_options_lists_platform_variables() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["options", "--platform", "sw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ATHREAD"))
        .stdout(predicate::str::contains("CC_SLAVE"))
        .stdout(predicate::str::contains("Opt|Debug|Prof"));
}

#[test]
fn test_options_json() {
    let tmp = temp_dir();

    let output = hpcbuild(tmp.path())
        .args(["options", "--json", "--platform", "linux"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let decls = json.as_array().unwrap();
    assert_eq!(decls[0]["name"], "PLATFORM");
    let cxx_linker = decls.iter().find(|d| d["name"] == "CXX_LINKER").unwrap();
    assert_eq!(cxx_linker["default"], "mpiicxx");
    assert!(decls.iter().all(|d| d["name"] != "ATHREAD"));
}

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    hpcbuild(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hpcbuild"));
}
