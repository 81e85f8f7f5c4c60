use std::collections::{HashMap, HashSet};

use crate::ast::{Definition, Document, FragmentDefinition, OperationDefinition, Selection, SelectionSet};
use crate::error::CodegenError;

/// One named operation together with the transitive, deduplicated set of
/// fragment definitions it depends on, in first-seen traversal order.
#[derive(Debug)]
pub struct OperationUnit<'a> {
    pub name: &'a str,
    pub operation: &'a OperationDefinition,
    pub fragments: Vec<&'a FragmentDefinition>,
}

/// Splits a document into per-operation units.
///
/// The returned iterator is lazy: fragment closures are computed one
/// operation at a time, so errors on later operations only surface once
/// the stream is consumed up to them.
pub fn split(document: &Document) -> Split<'_> {
    Split::new(document)
}

pub struct Split<'a> {
    fragments: HashMap<&'a str, &'a FragmentDefinition>,
    operations: std::vec::IntoIter<(&'a str, &'a OperationDefinition)>,
    pending_error: Option<CodegenError>,
    done: bool,
}

impl<'a> Split<'a> {
    fn new(document: &'a Document) -> Self {
        match classify(document) {
            Ok((operations, fragments)) => Split {
                fragments,
                operations: operations.into_iter(),
                pending_error: None,
                done: false,
            },
            Err(err) => Split {
                fragments: HashMap::new(),
                operations: Vec::new().into_iter(),
                pending_error: Some(err),
                done: false,
            },
        }
    }
}

impl<'a> Iterator for Split<'a> {
    type Item = Result<OperationUnit<'a>, CodegenError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(err) = self.pending_error.take() {
            self.done = true;
            return Some(Err(err));
        }

        let (name, operation) = self.operations.next()?;

        let mut visited = HashSet::new();
        let mut closure = Vec::new();
        if let Err(err) = collect_fragments(
            &operation.selection_set,
            &self.fragments,
            &mut visited,
            &mut closure,
        ) {
            self.done = true;
            return Some(Err(err));
        }

        tracing::debug!(
            operation = name,
            fragments = closure.len(),
            "computed fragment closure"
        );

        Some(Ok(OperationUnit {
            name,
            operation,
            fragments: closure,
        }))
    }
}

type Classified<'a> = (
    Vec<(&'a str, &'a OperationDefinition)>,
    HashMap<&'a str, &'a FragmentDefinition>,
);

/// Single pass over the document: operations keyed by name in first-seen
/// order, fragments keyed by name. Rejects anything non-executable.
fn classify(document: &Document) -> Result<Classified<'_>, CodegenError> {
    let mut operations: Vec<(&str, &OperationDefinition)> = Vec::new();
    let mut seen_operations: HashSet<&str> = HashSet::new();
    let mut fragments: HashMap<&str, &FragmentDefinition> = HashMap::new();

    for definition in &document.definitions {
        match definition {
            Definition::Fragment(fragment) => {
                fragments.insert(fragment.name.as_str(), fragment);
            }
            Definition::Operation(operation) => {
                let name = operation.name.as_deref().ok_or(CodegenError::UnnamedOperation {
                    kind: operation.kind.as_str(),
                })?;

                if !seen_operations.insert(name) {
                    return Err(CodegenError::DuplicateOperationName {
                        name: name.to_string(),
                    });
                }

                operations.push((name, operation));
            }
            Definition::Other(other) => {
                return Err(CodegenError::UnsupportedDefinitionKind {
                    description: other.description.clone(),
                });
            }
        }
    }

    Ok((operations, fragments))
}

/// Depth-first walk of a selection set, recording every fragment reachable
/// through spreads. The visited set doubles as the cycle guard: a spread of
/// an already-visited fragment is skipped without recursing, so cyclic
/// fragment graphs terminate with each fragment recorded once.
fn collect_fragments<'a>(
    selection_set: &'a SelectionSet,
    fragments: &HashMap<&'a str, &'a FragmentDefinition>,
    visited: &mut HashSet<&'a str>,
    closure: &mut Vec<&'a FragmentDefinition>,
) -> Result<(), CodegenError> {
    for selection in &selection_set.items {
        match selection {
            Selection::Field(field) => {
                if !field.selection_set.is_empty() {
                    collect_fragments(&field.selection_set, fragments, visited, closure)?;
                }
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.fragment_name.as_str();

                if visited.contains(name) {
                    continue;
                }

                let fragment =
                    fragments
                        .get(name)
                        .copied()
                        .ok_or_else(|| CodegenError::MissingFragment {
                            name: name.to_string(),
                        })?;

                visited.insert(name);
                closure.push(fragment);
                collect_fragments(&fragment.selection_set, fragments, visited, closure)?;
            }
            Selection::InlineFragment(inline) => {
                collect_fragments(&inline.selection_set, fragments, visited, closure)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::split;
    use crate::error::CodegenError;
    use crate::parse::parse_document;

    fn closure_names(source: &str) -> Vec<(String, Vec<String>)> {
        let document = parse_document(source).unwrap();
        split(&document)
            .map(|unit| {
                let unit = unit.unwrap();
                (
                    unit.name.to_string(),
                    unit.fragments
                        .iter()
                        .map(|fragment| fragment.name.clone())
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn computes_transitive_closures_per_operation() {
        let units = closure_names(
            r#"
            fragment UserInfo on User {
              id
              country {
                ...CountryInfo
              }
            }

            fragment CountryInfo on Country {
              code
            }

            query getUser {
              user {
                ...UserInfo
              }
            }

            query getCountry {
              country {
                ...CountryInfo
              }
            }
            "#,
        );

        assert_eq!(
            units,
            vec![
                (
                    "getUser".to_string(),
                    vec!["UserInfo".to_string(), "CountryInfo".to_string()]
                ),
                ("getCountry".to_string(), vec!["CountryInfo".to_string()]),
            ]
        );
    }

    #[test]
    fn cyclic_fragments_terminate_with_each_visited_once() {
        let units = closure_names(
            r#"
            fragment A on User {
              name
              ...B
            }

            fragment B on User {
              id
              ...A
            }

            query getUser {
              user {
                ...A
              }
            }
            "#,
        );

        assert_eq!(
            units,
            vec![("getUser".to_string(), vec!["A".to_string(), "B".to_string()])]
        );
    }

    #[test]
    fn spreads_behind_inline_fragments_are_collected() {
        let units = closure_names(
            r#"
            fragment DroidInfo on Droid {
              primaryFunction
            }

            query getHero {
              hero {
                ... on Droid {
                  ...DroidInfo
                }
              }
            }
            "#,
        );

        assert_eq!(
            units,
            vec![("getHero".to_string(), vec!["DroidInfo".to_string()])]
        );
    }

    #[test]
    fn type_system_definitions_are_rejected() {
        let document = parse_document("type Droid { id: ID! }").unwrap();
        let err = split(&document).next().unwrap().unwrap_err();

        assert!(matches!(
            err,
            CodegenError::UnsupportedDefinitionKind { ref description } if description == "type `Droid`"
        ));
    }

    #[test]
    fn anonymous_operations_are_rejected() {
        let document = parse_document("query { test }").unwrap();
        let err = split(&document).next().unwrap().unwrap_err();

        assert!(matches!(err, CodegenError::UnnamedOperation { kind: "query" }));
    }

    #[test]
    fn duplicate_operation_names_are_rejected() {
        let document = parse_document(
            r#"
            query duplicated { a }
            query duplicated { b }
            "#,
        )
        .unwrap();
        let err = split(&document).next().unwrap().unwrap_err();

        assert!(matches!(
            err,
            CodegenError::DuplicateOperationName { ref name } if name == "duplicated"
        ));
    }

    #[test]
    fn missing_fragments_are_reported_at_the_offending_operation() {
        let document = parse_document(
            r#"
            query first { a }
            query second { ...Gone }
            "#,
        )
        .unwrap();

        let mut stream = split(&document);

        let first = stream.next().unwrap().unwrap();
        assert_eq!(first.name, "first");
        assert!(first.fragments.is_empty());

        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            CodegenError::MissingFragment { ref name } if name == "Gone"
        ));
    }

    #[test]
    fn duplicate_spreads_are_deduplicated() {
        let units = closure_names(
            r#"
            fragment Shared on User {
              id
            }

            query getUser {
              user {
                ...Shared
              }
              viewer {
                ...Shared
              }
            }
            "#,
        );

        assert_eq!(
            units,
            vec![("getUser".to_string(), vec!["Shared".to_string()])]
        );
    }
}
