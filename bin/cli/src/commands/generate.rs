use std::path::Path;
use std::process::ExitCode;

use graphql_codegen_config::{load_config, CodegenConfig};
use graphql_codegen_core::Generator;

use crate::logger::configure_logging;

/// Runs every configured generator. Each entry is an independent
/// namespace/source/destination triple: a failure in one aborts that
/// generator only, the rest are still attempted.
pub fn run(config_file: Option<&Path>) -> ExitCode {
    let config = match load_config(config_file) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    configure_logging(&config.log);

    if run_generators(&config) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Attempts every generator entry, returning whether any of them failed.
fn run_generators(config: &CodegenConfig) -> bool {
    let mut failed = false;

    for (name, entry) in &config.generators {
        let generator = Generator::new(
            entry.namespace.clone(),
            entry.source_path.clone(),
            entry.destination_path.clone(),
            entry.facade_name(name),
        );

        match generator.generate() {
            Ok(()) => tracing::info!("Generated Rust code for `{name}` successful"),
            Err(err) => {
                failed = true;
                tracing::error!("Generator `{name}` failed: {err}");
            }
        }
    }

    failed
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use graphql_codegen_config::log::LoggingConfig;
    use graphql_codegen_config::{CodegenConfig, GeneratorConfig};

    use super::run_generators;

    fn entry(source: &std::path::Path, destination: &std::path::Path, namespace: &str) -> GeneratorConfig {
        GeneratorConfig {
            namespace: namespace.to_string(),
            source_path: source.to_path_buf(),
            destination_path: destination.to_path_buf(),
            facade_name: None,
        }
    }

    #[test]
    fn a_failing_generator_does_not_stop_the_others() {
        let source = tempfile::tempdir().unwrap();
        let destination = tempfile::tempdir().unwrap();
        std::fs::write(
            source.path().join("users.graphql"),
            "query getUsers { users { id } }\n",
        )
        .unwrap();

        // BTreeMap iteration runs `broken` before `working`.
        let mut generators = BTreeMap::new();
        generators.insert(
            "broken".to_string(),
            entry(
                &source.path().join("absent"),
                destination.path(),
                "broken::graphql",
            ),
        );
        generators.insert(
            "working".to_string(),
            entry(source.path(), destination.path(), "working::graphql"),
        );

        let config = CodegenConfig {
            log: LoggingConfig::default(),
            generators,
        };

        assert!(run_generators(&config));

        let facade = destination.path().join("working/graphql/mod.rs");
        assert!(facade.exists());
        assert!(destination.path().join("working/graphql/get_users.rs").exists());
        assert!(!destination.path().join("broken").exists());
    }

    #[test]
    fn all_entries_succeeding_reports_no_failure() {
        let source = tempfile::tempdir().unwrap();
        let destination = tempfile::tempdir().unwrap();
        std::fs::write(
            source.path().join("users.graphql"),
            "query getUsers { users { id } }\n",
        )
        .unwrap();

        let mut generators = BTreeMap::new();
        generators.insert(
            "app".to_string(),
            entry(source.path(), destination.path(), "app::graphql"),
        );

        let config = CodegenConfig {
            log: LoggingConfig::default(),
            generators,
        };

        assert!(!run_generators(&config));
    }
}
