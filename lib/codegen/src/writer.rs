use std::io::ErrorKind;
use std::path::Path;

use crate::error::CodegenError;
use crate::generator::Artifact;

/// Writes rendered artifacts verbatim under `destination_root`, creating
/// parent directories as needed. The root itself must already exist;
/// generation never scaffolds the destination.
pub fn write_artifacts(destination_root: &Path, artifacts: &[Artifact]) -> Result<(), CodegenError> {
    if !destination_root.is_dir() {
        return Err(CodegenError::DestinationNotWritable {
            path: destination_root.to_path_buf(),
        });
    }

    for artifact in artifacts {
        let path = destination_root.join(&artifact.relative_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| write_error(destination_root, parent, source))?;
        }

        std::fs::write(&path, &artifact.contents)
            .map_err(|source| write_error(destination_root, &path, source))?;

        tracing::debug!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
    }

    Ok(())
}

/// Mode bits alone don't tell whether the process may write (ownership,
/// ACLs), so writability is judged by the write attempt itself.
fn write_error(destination_root: &Path, path: &Path, source: std::io::Error) -> CodegenError {
    if source.kind() == ErrorKind::PermissionDenied {
        CodegenError::DestinationNotWritable {
            path: destination_root.to_path_buf(),
        }
    } else {
        CodegenError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
