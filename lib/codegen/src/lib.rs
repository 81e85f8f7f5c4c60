pub mod ast;
pub mod corpus;
pub mod delegate;
pub mod error;
pub mod generator;
pub mod parse;
pub mod splitter;
pub mod writer;

pub use error::CodegenError;
pub use generator::{Artifact, Generator};
pub use splitter::{split, OperationUnit};
