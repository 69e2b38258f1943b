//! Import extraction from Python modules.
//!
//! A module is parsed into its syntax tree and every `import` statement is
//! collected, however deeply nested (functions, classes, conditionals,
//! `try` blocks, `match` arms). Names are returned exactly as written
//! (`os.path`, not `os`); reducing them to their top-level package is the
//! scanner's job.

use std::collections::BTreeSet;
use std::path::Path;

use rustpython_parser::{ast, Parse};

use crate::core::PreqsError;
use crate::util::diagnostic::SyntaxError;
use crate::util::fs::read_to_string;

/// Extract imported module names from the Python module at `path`.
///
/// A read failure is an unexpected error. A parse failure is a
/// [`SyntaxError`] pointing at the offending offset.
pub fn extract_imports(path: &Path) -> Result<BTreeSet<String>, PreqsError> {
    let source = read_to_string(path)?;
    extract_imports_from_source(&source, path)
}

/// Extract imported module names from Python source text.
///
/// `path` is only used to label errors.
pub fn extract_imports_from_source(
    source: &str,
    path: &Path,
) -> Result<BTreeSet<String>, PreqsError> {
    let filename = path.display().to_string();
    let suite = ast::Suite::parse(source, &filename).map_err(|err| {
        SyntaxError::new(
            path.to_path_buf(),
            source.to_string(),
            u32::from(err.offset) as usize,
            err.error.to_string(),
        )
    })?;

    let mut collector = ImportCollector::default();
    collector.visit_suite(&suite);
    Ok(collector.imports)
}

/// Walks statement bodies collecting absolute import names.
#[derive(Default)]
struct ImportCollector {
    imports: BTreeSet<String>,
}

impl ImportCollector {
    fn visit_suite(&mut self, suite: &[ast::Stmt]) {
        for stmt in suite {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &ast::Stmt) {
        match stmt {
            ast::Stmt::Import(import) => {
                // `import a.b` and `import a.b as c` both name `a.b`.
                for alias in &import.names {
                    self.imports.insert(alias.name.as_str().to_string());
                }
            }
            ast::Stmt::ImportFrom(import_from) => {
                let level = import_from.level.as_ref().map_or(0, ast::Int::to_u32);
                // Relative imports always refer to the project itself.
                if level > 0 {
                    return;
                }
                if let Some(module) = &import_from.module {
                    self.imports.insert(module.as_str().to_string());
                }
            }
            ast::Stmt::FunctionDef(function_def) => self.visit_suite(&function_def.body),
            ast::Stmt::AsyncFunctionDef(function_def) => self.visit_suite(&function_def.body),
            ast::Stmt::ClassDef(class_def) => self.visit_suite(&class_def.body),
            ast::Stmt::For(for_stmt) => {
                self.visit_suite(&for_stmt.body);
                self.visit_suite(&for_stmt.orelse);
            }
            ast::Stmt::AsyncFor(for_stmt) => {
                self.visit_suite(&for_stmt.body);
                self.visit_suite(&for_stmt.orelse);
            }
            ast::Stmt::While(while_stmt) => {
                self.visit_suite(&while_stmt.body);
                self.visit_suite(&while_stmt.orelse);
            }
            ast::Stmt::If(if_stmt) => {
                self.visit_suite(&if_stmt.body);
                self.visit_suite(&if_stmt.orelse);
            }
            ast::Stmt::With(with_stmt) => self.visit_suite(&with_stmt.body),
            ast::Stmt::AsyncWith(with_stmt) => self.visit_suite(&with_stmt.body),
            ast::Stmt::Try(try_stmt) => {
                self.visit_suite(&try_stmt.body);
                self.visit_handlers(&try_stmt.handlers);
                self.visit_suite(&try_stmt.orelse);
                self.visit_suite(&try_stmt.finalbody);
            }
            ast::Stmt::TryStar(try_stmt) => {
                self.visit_suite(&try_stmt.body);
                self.visit_handlers(&try_stmt.handlers);
                self.visit_suite(&try_stmt.orelse);
                self.visit_suite(&try_stmt.finalbody);
            }
            ast::Stmt::Match(match_stmt) => {
                for case in &match_stmt.cases {
                    self.visit_suite(&case.body);
                }
            }
            _ => {}
        }
    }

    fn visit_handlers(&mut self, handlers: &[ast::ExceptHandler]) {
        for handler in handlers {
            let ast::ExceptHandler::ExceptHandler(handler) = handler;
            self.visit_suite(&handler.body);
        }
    }
}
