use graphql_parser::{parse_query, parse_schema};

use crate::ast::{Definition, Document};
use crate::error::CodegenError;

/// Parses raw source text into a [`Document`].
///
/// Executable documents go through the query grammar. Text that is not a
/// valid executable document but parses as a type-system document is
/// still accepted here and mapped to [`Definition::Other`] entries, so the
/// splitter can reject it with a message naming the definition instead of
/// a bare syntax error.
pub fn parse_document(source: &str) -> Result<Document, CodegenError> {
    let query_error = match parse_query::<String>(source) {
        Ok(document) => return Ok(document.into()),
        Err(err) => err,
    };

    if let Ok(schema_document) = parse_schema::<String>(source) {
        return Ok(Document {
            definitions: schema_document
                .definitions
                .into_iter()
                .map(|definition| Definition::Other(definition.into()))
                .collect(),
        });
    }

    Err(CodegenError::Syntax(query_error))
}
