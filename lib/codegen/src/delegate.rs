use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ast::{FragmentDefinition, OperationDefinition};

/// Result of executing one operation against a schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("Expected the delegate's execution adapter to be synchronous-capable")]
    SyncAdapterUnavailable,

    #[error("Failed to rehydrate embedded operation AST: {0}")]
    Rehydrate(#[from] serde_json::Error),

    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Capability that actually runs a parsed operation against a schema.
/// Generated artifacts only ever talk to this trait.
#[async_trait]
pub trait SchemaDelegate {
    type Schema;

    fn schema(&self) -> &Self::Schema;

    async fn delegate_to_execute(
        &self,
        operation: OperationDefinition,
        fragments: Vec<FragmentDefinition>,
        variables: Option<Map<String, Value>>,
    ) -> Result<ExecutionResult, DelegateError>;

    /// Returns a synchronous-capable adapter when the runtime supports
    /// blocking on pending results. Generated sync accessors treat `None`
    /// as a contract violation.
    fn sync_adapter(&self) -> Option<&dyn SyncAdapter> {
        None
    }
}

/// Provides the delegate capability to generated operation traits; the
/// generated facade is the one implementor.
pub trait HasSchemaDelegate {
    type Delegate: SchemaDelegate + Sync;

    fn delegate(&self) -> &Self::Delegate;
}

/// Blocks on a pending execution result.
pub trait SyncAdapter: Sync {
    fn wait(
        &self,
        pending: BoxFuture<'_, Result<ExecutionResult, DelegateError>>,
    ) -> Result<ExecutionResult, DelegateError>;
}

/// Sync adapter backed by `futures::executor::block_on`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingAdapter;

impl SyncAdapter for BlockingAdapter {
    fn wait(
        &self,
        pending: BoxFuture<'_, Result<ExecutionResult, DelegateError>>,
    ) -> Result<ExecutionResult, DelegateError> {
        futures::executor::block_on(pending)
    }
}

/// Schema types that know how to execute an operation. The seam the
/// consuming runtime implements so a plain schema handle can be wrapped
/// into [`DefaultDelegate`].
#[async_trait]
pub trait ExecutableSchema: Sync {
    async fn execute(
        &self,
        operation: OperationDefinition,
        fragments: Vec<FragmentDefinition>,
        variables: Option<Map<String, Value>>,
    ) -> Result<ExecutionResult, DelegateError>;
}

/// Default delegate wrapping an [`ExecutableSchema`] with a blocking-capable
/// sync adapter.
pub struct DefaultDelegate<S> {
    schema: S,
    adapter: BlockingAdapter,
}

impl<S: ExecutableSchema> DefaultDelegate<S> {
    pub fn new(schema: S) -> Self {
        DefaultDelegate {
            schema,
            adapter: BlockingAdapter,
        }
    }
}

#[async_trait]
impl<S: ExecutableSchema> SchemaDelegate for DefaultDelegate<S> {
    type Schema = S;

    fn schema(&self) -> &S {
        &self.schema
    }

    async fn delegate_to_execute(
        &self,
        operation: OperationDefinition,
        fragments: Vec<FragmentDefinition>,
        variables: Option<Map<String, Value>>,
    ) -> Result<ExecutionResult, DelegateError> {
        self.schema.execute(operation, fragments, variables).await
    }

    fn sync_adapter(&self) -> Option<&dyn SyncAdapter> {
        Some(&self.adapter)
    }
}
