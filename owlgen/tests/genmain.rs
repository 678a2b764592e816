//! End-to-end tests for the generator driver.
//!
//! Each test lays out a package tree in a temp directory, crawls it with
//! [`RosPack`] and records what the driver hands to the generator.

use std::{
    cell::RefCell,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use owlgen::reports::BufferedOutput;
use owlgen_core::{Config, SearchPath, SpecKind};
use owlgen_generator::{GenerateError, MessageGenerator};
use owlgen_registry::RosPack;
use tempfile::TempDir;

#[derive(Debug, Clone)]
struct Call {
    package: String,
    files: Vec<PathBuf>,
    outdir: PathBuf,
    include: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Success,
    InvalidSpec,
    Generation,
}

struct RecordingGenerator {
    kind: SpecKind,
    outcome: Outcome,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl MessageGenerator for RecordingGenerator {
    fn kind(&self) -> SpecKind {
        self.kind
    }

    fn generate_messages(
        &self,
        package: &str,
        files: &[PathBuf],
        outdir: &Path,
        search_path: &SearchPath,
    ) -> Result<(), GenerateError> {
        self.calls.borrow_mut().push(Call {
            package: package.to_string(),
            files: files.to_vec(),
            outdir: outdir.to_path_buf(),
            include: search_path.include_args(),
        });
        match self.outcome {
            Outcome::Success => Ok(()),
            Outcome::InvalidSpec => Err(GenerateError::InvalidSpec(
                "Pose.msg: unknown type 'flaot64'".into(),
            )),
            Outcome::Generation => Err(GenerateError::Generation(
                "cannot emit constant 'MAX'".into(),
            )),
        }
    }
}

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            temp: TempDir::new().unwrap(),
        };
        ws.package("std_msgs", &[]);
        ws
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn package(&self, name: &str, depends: &[&str]) -> PathBuf {
        let root = self.root().join(name);
        fs::create_dir_all(root.join("msg")).unwrap();
        fs::create_dir_all(root.join("srv")).unwrap();
        let body: String = depends
            .iter()
            .map(|d| format!("  <depend package=\"{}\"/>\n", d))
            .collect();
        fs::write(
            root.join("manifest.xml"),
            format!("<package>\n{}</package>\n", body),
        )
        .unwrap();
        root
    }

    fn definition(&self, package: &str, kind: SpecKind, name: &str) -> PathBuf {
        let path = self
            .root()
            .join(package)
            .join(kind.subdir())
            .join(format!("{}.{}", name, kind.extension()));
        fs::write(&path, "Header header\nfloat64 x\n").unwrap();
        path
    }

    fn registry(&self) -> RosPack {
        RosPack::new([self.root().to_path_buf()])
    }
}

struct Run {
    code: u8,
    out: BufferedOutput,
    calls: Vec<Call>,
}

fn run_with(
    ws: &Workspace,
    kind: SpecKind,
    args: &[&str],
    config_path: Option<&Path>,
    outcome: Outcome,
) -> Run {
    let argv: Vec<OsString> = std::iter::once("genmsg_owl")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let recorded = Rc::clone(&calls);
    let mut out = BufferedOutput::new();

    let code = owlgen::run(
        &argv,
        kind,
        &ws.registry(),
        config_path,
        move |kind: SpecKind, _: &Config| -> Result<Box<dyn MessageGenerator>, GenerateError> {
            Ok(Box::new(RecordingGenerator {
                kind,
                outcome,
                calls: recorded,
            }))
        },
        &mut out,
    );

    let calls = calls.borrow().clone();
    Run { code, out, calls }
}

fn run(ws: &Workspace, kind: SpecKind, args: &[&str], outcome: Outcome) -> Run {
    run_with(ws, kind, args, None, outcome)
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn test_generates_message() {
    let ws = Workspace::new();
    ws.package("geometry_msgs", &[]);
    let root = ws.package("app_msgs", &["geometry_msgs"]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 0);
    assert!(result.out.stdout.is_empty());
    assert!(result.out.stderr.is_empty());
    assert_eq!(result.calls.len(), 1);

    let call = &result.calls[0];
    assert_eq!(call.package, "app_msgs");
    assert_eq!(call.files, vec![file]);
    assert_eq!(call.outdir, root.join("src").join("app_msgs").join("msg"));
    assert!(call.outdir.is_dir());
    assert_eq!(
        call.include,
        vec![
            format!("-Iapp_msgs:{}", root.join("msg").display()),
            format!("-Istd_msgs:{}", ws.root().join("std_msgs/msg").display()),
            format!("-Igeometry_msgs:{}", ws.root().join("geometry_msgs/msg").display()),
        ]
    );
}

#[test]
fn test_generates_service_into_srv_dir() {
    let ws = Workspace::new();
    let root = ws.package("app_msgs", &[]);
    let file = ws.definition("app_msgs", SpecKind::Srv, "Reset");

    let result = run(&ws, SpecKind::Srv, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 0);
    let call = &result.calls[0];
    assert_eq!(call.outdir, root.join("src").join("app_msgs").join("srv"));
    // services still resolve types through msg directories
    assert_eq!(
        call.include[0],
        format!("-Iapp_msgs:{}", root.join("msg").display())
    );
}

#[test]
fn test_include_path_has_entry_per_transitive_depend() {
    let ws = Workspace::new();
    ws.package("geometry_msgs", &["std_msgs"]);
    ws.package("sensor_msgs", &["geometry_msgs"]);
    ws.package("app_msgs", &["sensor_msgs"]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Scan");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 0);
    let packages: Vec<&str> = result.calls[0]
        .include
        .iter()
        .map(|arg| arg.trim_start_matches("-I").split(':').next().unwrap())
        .collect();
    assert_eq!(
        packages,
        vec!["app_msgs", "std_msgs", "sensor_msgs", "geometry_msgs"]
    );
}

#[test]
fn test_existing_output_dir_is_reused() {
    let ws = Workspace::new();
    let root = ws.package("app_msgs", &[]);
    let outdir = root.join("src").join("app_msgs").join("msg");
    fs::create_dir_all(&outdir).unwrap();
    fs::write(outdir.join("_Old.py"), "# stale").unwrap();
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 0);
    assert_eq!(result.calls.len(), 1);
    assert!(outdir.join("_Old.py").exists());
}

#[test]
fn test_file_in_the_way_fails_before_generation() {
    let ws = Workspace::new();
    let root = ws.package("app_msgs", &[]);
    let blocked = root.join("src").join("app_msgs").join("msg");
    fs::create_dir_all(blocked.parent().unwrap()).unwrap();
    fs::write(&blocked, "not a directory").unwrap();
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 3);
    assert!(result.calls.is_empty());
    assert_eq!(
        result.out.stderr.last().unwrap(),
        &format!("ERROR: Cannot write to {}: file in the way", blocked.display())
    );
}

#[test]
fn test_invalid_spec_exits_one() {
    let ws = Workspace::new();
    ws.package("app_msgs", &[]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::InvalidSpec);

    assert_eq!(result.code, 1);
    assert_eq!(
        result.out.stderr,
        vec!["ERROR: Pose.msg: unknown type 'flaot64'"]
    );
}

#[test]
fn test_generation_failure_exits_two() {
    let ws = Workspace::new();
    ws.package("app_msgs", &[]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Generation);

    assert_eq!(result.code, 2);
    assert_eq!(result.out.stderr, vec!["ERROR: cannot emit constant 'MAX'"]);
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let ws = Workspace::new();

    let result = run(&ws, SpecKind::Msg, &[], Outcome::Success);

    assert_eq!(result.code, 3);
    assert_eq!(result.out.stdout, vec!["genmsg_owl file(s)"]);
    assert!(result.calls.is_empty());
    assert!(result.out.stderr.last().unwrap().starts_with("ERROR: "));
}

#[test]
fn test_only_flags_fails_without_usage() {
    let ws = Workspace::new();

    let result = run(&ws, SpecKind::Msg, &["--noinitpy"], Outcome::Success);

    assert_eq!(result.code, 3);
    assert!(result.out.stdout.is_empty());
    assert!(result.calls.is_empty());
    assert_eq!(
        result.out.stderr.last().unwrap(),
        "ERROR: expected exactly one definition file, got none"
    );
}

#[test]
fn test_two_files_fail() {
    let ws = Workspace::new();
    ws.package("app_msgs", &[]);
    let a = ws.definition("app_msgs", SpecKind::Msg, "A");
    let b = ws.definition("app_msgs", SpecKind::Msg, "B");

    let result = run(
        &ws,
        SpecKind::Msg,
        &[&path_arg(&a), &path_arg(&b)],
        Outcome::Success,
    );

    assert_eq!(result.code, 3);
    assert!(result.calls.is_empty());
    assert!(result.out.stdout.is_empty());
}

#[test]
fn test_flags_are_ignored() {
    let ws = Workspace::new();
    ws.package("app_msgs", &[]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(
        &ws,
        SpecKind::Msg,
        &["--initpy", &path_arg(&file), "--verbose"],
        Outcome::Success,
    );

    assert_eq!(result.code, 0);
    assert_eq!(result.calls[0].files, vec![file]);
}

#[test]
fn test_file_outside_package_exits_three() {
    let ws = Workspace::new();
    let loose = ws.root().join("Loose.msg");
    fs::write(&loose, "").unwrap();

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&loose)], Outcome::Success);

    assert_eq!(result.code, 3);
    assert!(result.calls.is_empty());
    assert_eq!(
        result.out.stderr.last().unwrap(),
        &format!("ERROR: '{}' is not inside a package", loose.display())
    );
}

#[test]
fn test_missing_dependency_exits_three() {
    let ws = Workspace::new();
    ws.package("app_msgs", &["ghost_msgs"]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 3);
    assert!(result.calls.is_empty());
    // the trace comes first, then the error line
    assert_eq!(result.out.stderr.len(), 2);
    assert!(result.out.stderr[1].contains("package 'ghost_msgs' not found"));
}

#[test]
fn test_missing_core_package_exits_three() {
    let ws = Workspace::new();
    fs::remove_dir_all(ws.root().join("std_msgs")).unwrap();
    ws.package("app_msgs", &[]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 3);
    assert!(result.calls.is_empty());
}

#[test]
fn test_package_config_selects_core_package() {
    let ws = Workspace::new();
    ws.package("core_msgs", &[]);
    let root = ws.package("app_msgs", &[]);
    fs::write(
        root.join("owlgen.toml"),
        "[search]\ncore_package = \"core_msgs\"\n",
    )
    .unwrap();
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    let result = run(&ws, SpecKind::Msg, &[&path_arg(&file)], Outcome::Success);

    assert_eq!(result.code, 0);
    assert_eq!(
        result.calls[0].include[1],
        format!("-Icore_msgs:{}", ws.root().join("core_msgs/msg").display())
    );
}

#[test]
fn test_broken_config_exits_three() {
    let ws = Workspace::new();
    ws.package("app_msgs", &[]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");
    let config = ws.root().join("broken.toml");
    fs::write(&config, "[generator]\ncommand = []\n").unwrap();

    let result = run_with(
        &ws,
        SpecKind::Msg,
        &[&path_arg(&file)],
        Some(&config),
        Outcome::Success,
    );

    assert_eq!(result.code, 3);
    assert!(result.calls.is_empty());
    assert_eq!(
        result.out.stderr.last().unwrap(),
        "ERROR: generator command must not be empty"
    );
}

#[test]
fn test_help_and_version_flags_are_ignored() {
    let ws = Workspace::new();
    ws.package("app_msgs", &[]);
    let file = ws.definition("app_msgs", SpecKind::Msg, "Pose");

    for flag in ["--help", "--version"] {
        let result = run(&ws, SpecKind::Msg, &[flag, &path_arg(&file)], Outcome::Success);

        assert_eq!(result.code, 0, "{flag}");
        assert!(result.out.stdout.is_empty(), "{flag}");
        assert_eq!(result.calls.len(), 1, "{flag}");
        assert_eq!(result.calls[0].files, vec![file.clone()]);
    }
}

#[cfg(unix)]
#[test]
fn test_non_utf8_definition_path_reaches_generator() {
    use std::os::unix::ffi::OsStrExt;

    let ws = Workspace::new();
    ws.package("app_msgs", &[]);
    let name = std::ffi::OsStr::from_bytes(b"Pos\xe9.msg");
    let file = ws.root().join("app_msgs").join("msg").join(name);
    if fs::write(&file, "float64 x\n").is_err() {
        // filesystems that insist on UTF-8 names cannot hold this file
        return;
    }

    let calls = Rc::new(RefCell::new(Vec::new()));
    let recorded = Rc::clone(&calls);
    let argv = vec![OsString::from("genmsg_owl"), file.clone().into_os_string()];
    let code = owlgen::run(
        &argv,
        SpecKind::Msg,
        &ws.registry(),
        None,
        move |kind: SpecKind, _: &Config| -> Result<Box<dyn MessageGenerator>, GenerateError> {
            Ok(Box::new(RecordingGenerator {
                kind,
                outcome: Outcome::Success,
                calls: recorded,
            }))
        },
        &mut BufferedOutput::new(),
    );

    assert_eq!(code, 0);
    assert_eq!(calls.borrow()[0].files, vec![file]);
}
