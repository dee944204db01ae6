//! End-to-end driver scenarios, driven against temp-dir fixtures.

use c3c_ast::{ast::Path as AstPath, parse_file, Span, TranslationContext};
use c3c_cli::driver;
use c3c_config::Opts;
use c3c_interface::{Session, Symbol};
use c3c_sema::{AnalysisStage, GlobalContext};
use clap::Parser;
use std::fs;

fn opts(args: &[&str]) -> Opts {
    let mut full = vec!["c3c"];
    full.extend_from_slice(args);
    Opts::parse_from(full)
}

/// Compiling with zero input sources is a fatal, non-zero-exit configuration
/// error, never a successful no-op build.
#[test]
fn zero_sources_is_a_fatal_configuration_error() {
    let opts = opts(&["--target-type", "library"]);
    let target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
    let err = driver::compile(&target, Session::new()).expect_err("no input files must fail");
    assert!(matches!(
        err,
        c3c_cli::error::DriverError::Fatal(c3c_interface::FatalError::NoFiles)
    ));
}

/// A single well-formed file compiles clean through every stage.
#[test]
fn single_module_compiles_as_a_library() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("hello.c3");
    fs::write(&file, "module hello; public fn int main() { return 0; }").unwrap();

    let mut opts = opts(&[file.to_str().unwrap(), "--target-type", "library"]);
    opts.output = dir.path().join("hello_out").to_string_lossy().into_owned();

    let target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
    driver::compile(&target, Session::new()).expect("a clean single-module build should succeed");
}

/// `dir/*` expands to every `.c3` file directly in `dir`, and all of
/// them are compiled without error.
#[test]
fn wildcard_expansion_compiles_every_file_in_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.c3"), "module a; public fn int a_fn() { return 1; }").unwrap();
    fs::write(dir.path().join("b.c3"), "module b; public fn int b_fn() { return 2; }").unwrap();

    let pattern = format!("{}/*", dir.path().display());
    let mut opts = opts(&[&pattern, "--target-type", "library"]);
    opts.output = dir.path().join("wild_out").to_string_lossy().into_owned();

    let target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
    assert_eq!(target.sources.len(), 2);
    driver::compile(&target, Session::new()).expect("wildcard-expanded sources should all compile");
}

/// `--parse-only` prints the parsed AST and exits clean without running any
/// semantic pass.
#[test]
fn parse_only_prints_the_ast_and_skips_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("hello.c3");
    fs::write(&file, "module hello; public fn int main() { return 0; }").unwrap();

    let mut opts = opts(&[file.to_str().unwrap(), "--parse-only"]);
    opts.output = dir.path().join("hello_parse").to_string_lossy().into_owned();

    let target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
    driver::compile(&target, Session::new()).expect("parse-only should not run semantic analysis");
}

/// `--emit-headers` writes one header per module instead of linking.
#[test]
fn emit_headers_writes_one_header_per_module() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("hello.c3");
    fs::write(&file, "module hello; public fn int main() { return 0; }").unwrap();

    let out_name = dir.path().join("hello_headers").to_string_lossy().into_owned();
    let mut opts = opts(&[file.to_str().unwrap(), "--emit-headers"]);
    opts.output = out_name.clone();

    let target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
    driver::compile(&target, Session::new()).expect("header emission should not attempt to link");

    let header = std::path::PathBuf::from(format!("{out_name}.objs")).join("hello.h");
    assert!(header.exists());
}

/// The same public name declared in two modules poisons the global symbol
/// slot, so an unqualified lookup stops resolving. Neither module here
/// references `shared` itself, so nothing triggers the use-site diagnostic
/// and the compile still succeeds — see
/// `ambiguous_unqualified_use_is_a_diagnostic_error` for the case where it
/// does.
#[test]
fn duplicate_public_symbol_poisons_the_global_slot() {
    let session = Session::new();
    let mut gcx = GlobalContext::new(session, None);
    gcx.bootstrap_std_module();

    let sources = [
        ("a.c3", "module a; public fn int shared() { return 1; }"),
        ("b.c3", "module b; public fn int shared() { return 2; }"),
    ];

    for (name, src) in sources {
        let file = std::sync::Arc::new(c3c_interface::File {
            id: Default::default(),
            full_path: std::path::PathBuf::from(name),
            contents: src.to_string(),
        });
        let mut ctx = TranslationContext::new(file);
        assert!(parse_file(&mut ctx, &mut gcx.arenas, &gcx.session.dcx));
        let module_name = ctx.current_module.unwrap();
        let path = AstPath { module_name, span: Span::default(), length: 1 };
        let id = gcx.find_or_create_module(path, None);
        gcx.module_mut(id).contexts.push(ctx);
    }

    gcx.analyze_to_stage(AnalysisStage::LAST).unwrap();

    let (shared, _) = Symbol::intern("shared");
    assert_eq!(gcx.find_symbol(shared), None, "ambiguous unqualified symbol must not resolve");

    let (a, _) = Symbol::intern("a");
    let qualified = gcx.module(gcx.find_or_create_module(
        AstPath { module_name: a, span: Span::default(), length: 1 },
        None,
    ));
    assert!(qualified.public_symbols.get(shared).is_some(), "each module still resolves its own symbol");
}

/// A third module that refers to an ambiguously-named symbol unqualified
/// turns the poisoned slot into an actual diagnostic error (spec §4.5's
/// Guarantee, scenario S6), and the overall compile fails.
#[test]
fn ambiguous_unqualified_use_is_a_diagnostic_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.c3"), "module a; public fn int shared() { return 1; }").unwrap();
    fs::write(dir.path().join("b.c3"), "module b; public fn int shared() { return 2; }").unwrap();
    fs::write(dir.path().join("c.c3"), "module c; x := shared;").unwrap();

    let pattern = format!("{}/*", dir.path().display());
    let mut opts = opts(&[&pattern, "--target-type", "library"]);
    opts.output = dir.path().join("ambiguous_out").to_string_lossy().into_owned();

    let target = c3c_config::BuildTarget::from_opts(&opts).unwrap();
    let err = driver::compile(&target, Session::new())
        .expect_err("referencing an ambiguous symbol unqualified must fail the compile");
    assert!(matches!(err, c3c_cli::error::DriverError::DiagnosedErrors));
}
