use std::path::{Path, PathBuf};

use crate::error::CodegenError;

const EXTENSIONS: &[&str] = &["graphql", "gql"];

/// Loads every `.graphql`/`.gql` file under `root` (recursively) and
/// concatenates their contents, one trailing newline each. Paths are
/// visited in sorted order so the corpus is stable across filesystems.
pub fn load_corpus(root: &Path) -> Result<String, CodegenError> {
    if !root.is_dir() {
        return Err(CodegenError::SourcePathInvalid {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    files.sort();

    let mut source = String::new();
    for file in &files {
        let contents = std::fs::read_to_string(file).map_err(|_| CodegenError::SourcePathInvalid {
            path: file.clone(),
        })?;
        source.push_str(&contents);
        source.push('\n');
    }

    if source.trim().is_empty() {
        return Err(CodegenError::EmptySourceCorpus {
            path: root.to_path_buf(),
        });
    }

    tracing::debug!(files = files.len(), root = %root.display(), "loaded source corpus");

    Ok(source)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CodegenError> {
    let entries = std::fs::read_dir(dir).map_err(|_| CodegenError::SourcePathInvalid {
        path: dir.to_path_buf(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|_| CodegenError::SourcePathInvalid {
            path: dir.to_path_buf(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_files(&path, files)?;
        } else if has_recognized_extension(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn has_recognized_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            EXTENSIONS
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
}
