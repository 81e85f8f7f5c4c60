mod naming;
mod render;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::ast::Document;
use crate::corpus::load_corpus;
use crate::error::CodegenError;
use crate::generator::naming::{artifact_names, is_reserved, ArtifactNames};
use crate::parse::parse_document;
use crate::splitter::split;
use crate::writer::write_artifacts;

pub use render::GENERATED_HEADER;

/// One rendered source unit, addressed relative to the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Drives one namespace/source/destination triple: load the corpus, split
/// it, render one artifact per operation plus the facade, and hand
/// everything to the writer. Rendering itself is pure; only
/// [`Generator::generate`] touches the filesystem.
pub struct Generator {
    namespace: String,
    source_path: PathBuf,
    destination_path: PathBuf,
    facade_name: String,
}

impl Generator {
    pub fn new(
        namespace: impl Into<String>,
        source_path: impl Into<PathBuf>,
        destination_path: impl Into<PathBuf>,
        facade_name: impl Into<String>,
    ) -> Self {
        Generator {
            namespace: namespace.into(),
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            facade_name: facade_name.into(),
        }
    }

    pub fn generate(&self) -> Result<(), CodegenError> {
        let source = load_corpus(&self.source_path)?;
        let document = parse_document(&source)?;
        let artifacts = self.render(&document)?;
        write_artifacts(&self.destination_path, &artifacts)
    }

    /// Renders every artifact for `document` without performing any I/O.
    /// Output is byte-identical across runs for the same document.
    pub fn render(&self, document: &Document) -> Result<Vec<Artifact>, CodegenError> {
        let namespace_dir = namespace_dir(&self.namespace);

        let mut artifacts = Vec::new();
        let mut operations: Vec<ArtifactNames> = Vec::new();
        let mut modules_seen: HashMap<String, String> = HashMap::new();

        for unit in split(document) {
            let unit = unit?;
            let names = artifact_names(unit.name);

            if is_reserved(&names.module) {
                return Err(CodegenError::ArtifactNamingConflict {
                    operation: unit.name.to_string(),
                    artifact: names.module,
                    reason: "is a reserved Rust identifier".to_string(),
                });
            }
            if names.trait_name == self.facade_name {
                return Err(CodegenError::ArtifactNamingConflict {
                    operation: unit.name.to_string(),
                    artifact: names.trait_name,
                    reason: "collides with the facade name".to_string(),
                });
            }
            if let Some(previous) = modules_seen.insert(names.module.clone(), unit.name.to_string())
            {
                return Err(CodegenError::ArtifactNamingConflict {
                    operation: unit.name.to_string(),
                    artifact: names.module,
                    reason: format!("collides with the artifact generated for operation `{previous}`"),
                });
            }

            let contents = render::render_operation(&unit, &names)?;
            artifacts.push(Artifact {
                relative_path: namespace_dir.join(format!("{}.rs", names.module)),
                contents,
            });
            operations.push(names);
        }

        artifacts.push(Artifact {
            relative_path: namespace_dir.join("mod.rs"),
            contents: render::render_facade(&self.facade_name, &operations),
        });

        tracing::debug!(
            operations = operations.len(),
            namespace = %self.namespace,
            "rendered artifacts"
        );

        Ok(artifacts)
    }
}

/// Maps a logical namespace like `app::graphql` onto a relative directory.
fn namespace_dir(namespace: &str) -> PathBuf {
    namespace
        .split("::")
        .filter(|segment| !segment.is_empty())
        .collect::<PathBuf>()
}
