//! The top-level compile driver, built around an owned [`GlobalContext`]
//! instead of process-wide statics.

use crate::error::DriverError;
use c3c_ast::{ast::Path as AstPath, parse_file, Lexer, Span, TranslationContext};
use c3c_config::BuildTarget;
use c3c_interface::Session;
use c3c_sema::{AnalysisStage, GlobalContext};
use std::path::PathBuf;

/// Drives one full compile of `target`, from source loading through linking.
///
/// Early-exits after lexing (`--lex-only`) or parsing (`--parse-only`)
/// without ever constructing a [`GlobalContext`].
pub fn compile(target: &BuildTarget, session: Session) -> Result<(), DriverError> {
    session.dcx.clear();
    if target.sources.is_empty() {
        return Err(DriverError::Fatal(c3c_interface::FatalError::NoFiles));
    }

    if target.lex_only {
        return lex_only(target, &session);
    }

    let mut gcx = GlobalContext::with_symtab_capacity(session, target.lib_dir.clone(), target.symtab_size);
    gcx.bootstrap_std_module();

    for path in &target.sources {
        let (file, was_cached) = gcx
            .session
            .source_loader
            .load(path)
            .map_err(|source| DriverError::Io { path: path.clone(), source })?;
        // A file already in the cache was reached via a second `import` of
        // the same path; it was already parsed the first time.
        if was_cached {
            continue;
        }

        let mut ctx = TranslationContext::new(file);
        parse_file(&mut ctx, &mut gcx.arenas, &gcx.session.dcx);

        if target.parse_only {
            print!("{}", c3c_ast::print_translation_context(&ctx, &gcx.arenas));
        }

        if let Some(module_name) = ctx.current_module {
            let path = AstPath { module_name, span: Span::default(), length: 1 };
            let id = gcx.find_or_create_module(path, None);
            gcx.module_mut(id).contexts.push(ctx);
        }
    }

    if target.parse_only {
        return Ok(());
    }

    gcx.analyze_to_stage(AnalysisStage::LAST).map_err(|_| DriverError::DiagnosedErrors)?;

    let out_dir = PathBuf::from(format!("{}.objs", target.name));
    if target.output_headers {
        c3c_codegen::dispatch_headers(&gcx, &out_dir, target.threads)
            .map_err(|e| DriverError::Fatal(c3c_interface::FatalError::Other(e.to_string())))?;
        return Ok(());
    }

    let objects = c3c_codegen::dispatch_objects(&gcx, &out_dir, target.threads)
        .map_err(|e| DriverError::Fatal(c3c_interface::FatalError::Other(e.to_string())))?;

    let stats = gcx.arenas.stats();
    tracing::debug!(?stats, "arena usage before freeing AST-family arenas");
    gcx.arenas.free_ast_arenas();

    if target.produces_executable() {
        let outcome = c3c_codegen::link(&objects, target)?;
        if let (true, Some(binary)) = (outcome.should_run, &outcome.binary) {
            let code = c3c_codegen::run_after_compile(binary)?;
            if code != 0 {
                return Err(DriverError::RunFailed(code));
            }
        }
    }

    Ok(())
}

/// `--lex-only`: prints the token-kind stream of the first newly-loaded
/// file and returns, without looking at the rest of `target.sources`. A
/// second source argument to `--lex-only` is silently ignored.
fn lex_only(target: &BuildTarget, session: &Session) -> Result<(), DriverError> {
    for path in &target.sources {
        let (file, was_cached) =
            session.source_loader.load(path).map_err(|source| DriverError::Io { path: path.clone(), source })?;
        if was_cached {
            continue;
        }
        for token in Lexer::new(&file.contents).into_tokens() {
            println!("{}", token.kind.as_str());
        }
        return Ok(());
    }
    Ok(())
}
