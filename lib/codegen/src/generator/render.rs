use std::fmt::Write;

use crate::error::CodegenError;
use crate::generator::naming::ArtifactNames;
use crate::splitter::OperationUnit;

pub const GENERATED_HEADER: &str = "// Generated file, please don't edit by hand.";

const RUNTIME_CRATE: &str = "graphql_codegen_core";

/// Renders one operation artifact: a trait bound to that single operation,
/// exposing an async accessor and a blocking one, with the operation AST
/// and its fragment closure embedded as JSON so the artifact never needs
/// the source corpus again.
pub fn render_operation(
    unit: &OperationUnit<'_>,
    names: &ArtifactNames,
) -> Result<String, CodegenError> {
    let has_variables = !unit.operation.variable_definitions.is_empty();

    let operation_json = serde_json::to_string(unit.operation)?;
    let fragments_json = serde_json::to_string(&unit.fragments)?;

    let variables_param = if has_variables {
        ", variables: Map<String, Value>"
    } else {
        ""
    };
    let variables_argument = if has_variables { "Some(variables)" } else { "None" };
    let variables_forward = if has_variables { "variables" } else { "" };
    let map_import = if has_variables {
        "use serde_json::{Map, Value};\n"
    } else {
        ""
    };

    let mut out = String::new();
    let _ = writeln!(out, "{GENERATED_HEADER}");
    let _ = writeln!(out);
    let _ = writeln!(out, "use async_trait::async_trait;");
    let _ = writeln!(out, "{map_import}use {RUNTIME_CRATE}::ast::{{FragmentDefinition, OperationDefinition}};");
    let _ = writeln!(
        out,
        "use {RUNTIME_CRATE}::delegate::{{DelegateError, ExecutionResult, HasSchemaDelegate, SchemaDelegate}};"
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "const OPERATION: &str = \"{}\";", escape(&operation_json));
    let _ = writeln!(out, "const FRAGMENTS: &str = \"{}\";", escape(&fragments_json));
    let _ = writeln!(out);
    let _ = writeln!(out, "#[async_trait]");
    let _ = writeln!(out, "pub trait {}: HasSchemaDelegate + Sync {{", names.trait_name);
    let _ = writeln!(
        out,
        "    async fn {}(&self{}) -> Result<ExecutionResult, DelegateError> {{",
        names.async_method, variables_param
    );
    let _ = writeln!(
        out,
        "        let operation: OperationDefinition = serde_json::from_str(OPERATION)?;"
    );
    let _ = writeln!(
        out,
        "        let fragments: Vec<FragmentDefinition> = serde_json::from_str(FRAGMENTS)?;"
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "        self.delegate()");
    let _ = writeln!(
        out,
        "            .delegate_to_execute(operation, fragments, {variables_argument})"
    );
    let _ = writeln!(out, "            .await");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "    fn {}(&self{}) -> Result<ExecutionResult, DelegateError> {{",
        names.sync_method, variables_param
    );
    let _ = writeln!(out, "        let adapter = self");
    let _ = writeln!(out, "            .delegate()");
    let _ = writeln!(out, "            .sync_adapter()");
    let _ = writeln!(out, "            .ok_or(DelegateError::SyncAdapterUnavailable)?;");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "        adapter.wait(self.{}({variables_forward}))",
        names.async_method
    );
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");

    Ok(out)
}

/// Renders the facade artifact (`mod.rs`): module declarations and
/// re-exports for every operation artifact, plus one constructable struct
/// mixing every operation trait into its surface.
pub fn render_facade(facade_name: &str, operations: &[ArtifactNames]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{GENERATED_HEADER}");
    let _ = writeln!(out);

    for names in operations {
        let _ = writeln!(out, "mod {};", names.module);
    }
    if !operations.is_empty() {
        let _ = writeln!(out);
        for names in operations {
            let _ = writeln!(out, "pub use {}::{};", names.module, names.trait_name);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "use {RUNTIME_CRATE}::delegate::{{");
    let _ = writeln!(out, "    DefaultDelegate, ExecutableSchema, HasSchemaDelegate, SchemaDelegate,");
    let _ = writeln!(out, "}};");
    let _ = writeln!(out);
    let _ = writeln!(out, "pub struct {facade_name}<D: SchemaDelegate + Sync> {{");
    let _ = writeln!(out, "    delegate: D,");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl<D: SchemaDelegate + Sync> {facade_name}<D> {{");
    let _ = writeln!(out, "    pub fn new(delegate: D) -> Self {{");
    let _ = writeln!(out, "        {facade_name} {{ delegate }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl<S: ExecutableSchema> {facade_name}<DefaultDelegate<S>> {{");
    let _ = writeln!(out, "    pub fn from_schema(schema: S) -> Self {{");
    let _ = writeln!(out, "        {facade_name}::new(DefaultDelegate::new(schema))");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl<D: SchemaDelegate + Sync> HasSchemaDelegate for {facade_name}<D> {{");
    let _ = writeln!(out, "    type Delegate = D;");
    let _ = writeln!(out);
    let _ = writeln!(out, "    fn delegate(&self) -> &D {{");
    let _ = writeln!(out, "        &self.delegate");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");

    for names in operations {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "impl<D: SchemaDelegate + Sync> {} for {facade_name}<D> {{}}",
            names.trait_name
        );
    }

    out
}

/// Escapes text for embedding in a normal (non-raw) Rust string literal.
/// JSON never contains raw control characters, so backslashes and quotes
/// are the only metacharacters to handle.
fn escape(json: &str) -> String {
    json.replace('\\', "\\\\").replace('"', "\\\"")
}
