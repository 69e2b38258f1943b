//! Separating external packages from standard-library and local names.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use crate::core::PreqsError;

/// Every name the project itself could be importing: each component of each
/// file's path, with and without its extension.
pub fn local_names(files: &BTreeSet<PathBuf>) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for file in files {
        for component in file.components() {
            let Component::Normal(part) = component else {
                continue;
            };
            let part = part.to_string_lossy();
            if let Some(stem) = Path::new(part.as_ref()).file_stem() {
                names.insert(stem.to_string_lossy().into_owned());
            }
            names.insert(part.into_owned());
        }
    }
    names.retain(|n| !matches!(n.as_str(), "" | "." | ".."));
    names
}

/// Remove standard-library and local names from `imports`, leaving only
/// external packages.
///
/// The result is checked against both exclusion sets; any overlap is an
/// internal error rather than something to paper over.
pub fn external_imports(
    imports: &BTreeSet<String>,
    files: &BTreeSet<PathBuf>,
    stdlib: &BTreeSet<String>,
) -> Result<BTreeSet<String>, PreqsError> {
    let locals = local_names(files);

    let external: BTreeSet<String> = imports
        .iter()
        .filter(|name| !stdlib.contains(*name) && !locals.contains(*name))
        .cloned()
        .collect();

    verify_external(&external, stdlib, &locals)?;

    tracing::debug!(
        "Removed {} standard library and local imports",
        imports.len() - external.len()
    );
    Ok(external)
}

/// Post-condition of [`external_imports`].
fn verify_external(
    external: &BTreeSet<String>,
    stdlib: &BTreeSet<String>,
    locals: &BTreeSet<String>,
) -> Result<(), PreqsError> {
    let leaked: Vec<String> = external
        .iter()
        .filter(|name| stdlib.contains(*name) || locals.contains(*name))
        .cloned()
        .collect();

    if leaked.is_empty() {
        Ok(())
    } else {
        Err(PreqsError::Classification { leaked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{stdlib, FixedStdlib, ProjectFixture};
    use crate::python::StdlibSource;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_local_names_with_and_without_extension() {
        let files: BTreeSet<PathBuf> = [
            PathBuf::from("/proj/mypkg/sub.py"),
            PathBuf::from("/proj/tool.pyw"),
        ]
        .into_iter()
        .collect();

        let names = local_names(&files);
        for expected in ["proj", "mypkg", "sub", "sub.py", "tool", "tool.pyw"] {
            assert!(names.contains(expected), "missing {expected}");
        }
        assert!(!names.contains(""));
        assert!(!names.contains("/"));
    }

    #[test]
    fn test_local_names_skip_placeholders() {
        let files: BTreeSet<PathBuf> = [PathBuf::from("./a/../b.py")].into_iter().collect();
        let names = local_names(&files);
        assert!(!names.contains("."));
        assert!(!names.contains(".."));
        assert!(names.contains("b"));
    }

    #[test]
    fn test_stdlib_local_and_external() {
        let project = ProjectFixture::new()
            .file("main.py", "import os\nimport requests\nimport mypkg.sub\n")
            .file("mypkg/__init__.py", "")
            .file("mypkg/sub.py", "")
            .build();

        let files = project.files();
        let imports = set(&["os", "requests", "mypkg"]);
        let stdlib = FixedStdlib::new(stdlib()).stdlib_names().unwrap();

        let external = external_imports(&imports, &files, &stdlib).unwrap();
        assert_eq!(external, set(&["requests"]));
    }

    #[test]
    fn test_result_never_intersects_exclusions() {
        let project = ProjectFixture::new()
            .file("app.py", "")
            .file("helpers/json_tools.py", "")
            .build();
        let files = project.files();
        let stdlib = stdlib();
        let imports = set(&["app", "helpers", "json_tools", "json", "sys", "numpy", "click"]);

        let external = external_imports(&imports, &files, &stdlib).unwrap();
        let locals = local_names(&files);

        assert!(external.is_disjoint(&stdlib));
        assert!(external.is_disjoint(&locals));
        assert_eq!(external, set(&["click", "numpy"]));
    }

    #[test]
    fn test_verify_reports_leaks() {
        let err = verify_external(&set(&["os", "numpy"]), &set(&["os"]), &BTreeSet::new())
            .unwrap_err();
        match err {
            PreqsError::Classification { ref leaked } => assert_eq!(leaked, &["os"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code().code(), 40);
    }
}
