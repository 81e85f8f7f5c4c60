use std::path::{Path, PathBuf};
use std::process::ExitCode;

use graphql_codegen_config::{CONFIG_TEMPLATE, DEFAULT_FILE_NAME};
use inquire::Confirm;

/// Scaffolds the config template at the target path. An existing file is
/// only replaced after explicit confirmation; declining leaves it
/// untouched and still exits successfully.
pub fn run(config_file: Option<&Path>) -> ExitCode {
    let target = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));

    let confirm_overwrite = || {
        Confirm::new(&format!(
            "Config file `{}` already exists, do you want to overwrite it?",
            target.display()
        ))
        .with_default(false)
        .prompt()
        .unwrap_or(false)
    };

    match init_config_at(&target, confirm_overwrite) {
        Ok(InitOutcome::Written) => {
            println!("Init config file `{}` successful", target.display());
            println!("Now you can generate code with: `graphql-codegen generate`");
            ExitCode::SUCCESS
        }
        Ok(InitOutcome::Declined) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to write config file `{}`: {err}", target.display());
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug)]
enum InitOutcome {
    Written,
    Declined,
}

/// The prompt is only consulted when the target already exists.
fn init_config_at(
    target: &Path,
    confirm_overwrite: impl FnOnce() -> bool,
) -> std::io::Result<InitOutcome> {
    if target.exists() && !confirm_overwrite() {
        return Ok(InitOutcome::Declined);
    }

    std::fs::write(target, CONFIG_TEMPLATE)?;
    Ok(InitOutcome::Written)
}

#[cfg(test)]
mod tests {
    use graphql_codegen_config::CONFIG_TEMPLATE;
    use pretty_assertions::assert_eq;

    use super::{init_config_at, InitOutcome};

    #[test]
    fn scaffolds_the_template_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("codegen.config.yaml");

        let outcome = init_config_at(&target, || false).unwrap();

        assert!(matches!(outcome, InitOutcome::Written));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn declining_the_overwrite_leaves_the_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("codegen.config.yaml");
        std::fs::write(&target, "generators: {}\n").unwrap();

        let outcome = init_config_at(&target, || false).unwrap();

        assert!(matches!(outcome, InitOutcome::Declined));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "generators: {}\n");
    }

    #[test]
    fn confirming_the_overwrite_replaces_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("codegen.config.yaml");
        std::fs::write(&target, "generators: {}\n").unwrap();

        let outcome = init_config_at(&target, || true).unwrap();

        assert!(matches!(outcome, InitOutcome::Written));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), CONFIG_TEMPLATE);
    }
}
