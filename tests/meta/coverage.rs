//! Checks that every source module has a mirrored unit test file under `tests/unit`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    fn rust_files(dir: &Path) -> Result<Vec<PathBuf>, io::Error> {
        let mut files = Vec::new();
        if !dir.is_dir() {
            return Ok(files);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files.extend(rust_files(&path)?);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn relative_modules(dir: &Path) -> BTreeSet<String> {
        rust_files(dir)
            .unwrap_or_else(|error| panic!("Failed to read {}: {error}", dir.display()))
            .iter()
            .filter_map(|path| path.strip_prefix(dir).ok())
            .map(|path| path.to_string_lossy().replace('\\', "/"))
            // Entry points and module organization files don't require separate test files
            .filter(|path| path != "main.rs" && path != "lib.rs" && !path.ends_with("mod.rs"))
            .collect()
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let sources = relative_modules(Path::new("src"));
        let tests = relative_modules(Path::new("tests/unit"));

        let missing: Vec<String> = sources
            .difference(&tests)
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = relative_modules(Path::new("src"));
        let tests = relative_modules(Path::new("tests/unit"));

        let orphaned: Vec<String> = tests
            .difference(&sources)
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    #[test]
    fn test_unit_files_are_declared() {
        let unit_dir = Path::new("tests/unit");
        let mut undeclared = Vec::new();

        for module in relative_modules(unit_dir) {
            let path = unit_dir.join(&module);
            let (Some(parent), Some(stem)) = (
                path.parent(),
                path.file_stem().and_then(|stem| stem.to_str()),
            ) else {
                continue;
            };

            let declarations = fs::read_to_string(parent.join("mod.rs")).unwrap_or_default();
            if !declarations.contains(&format!("mod {stem};")) {
                undeclared.push(format!("  - tests/unit/{module}"));
            }
        }

        assert!(
            undeclared.is_empty(),
            "The following unit test files are not declared in their mod.rs and never run:\n{}",
            undeclared.join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_files(Path::new("tests"))
            .unwrap_or_else(|error| panic!("Failed to scan tests directory: {error}"));

        let without_tests: Vec<String> = files
            .iter()
            .filter(|path| path.file_name().and_then(|name| name.to_str()) != Some("mod.rs"))
            .filter(|path| {
                !fs::read_to_string(path)
                    .unwrap_or_default()
                    .contains("#[test]")
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(
            without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            without_tests.join("\n")
        );
    }
}
