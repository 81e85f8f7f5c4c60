use graphql_parser::query as parser;
use graphql_parser::schema;
use serde::{Deserialize, Serialize};

/// Parsed representation of one generation run's source corpus: an ordered
/// list of top-level definitions. Produced once per run, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    /// Any non-executable definition (type-system definitions). Carried only
    /// so the splitter can reject it with a message naming the offender.
    Other(OtherDefinition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDefinition {
    pub name: String,
    pub variable_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherDefinition {
    /// Short human description of the definition, e.g. "type `Droid`".
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    pub items: Vec<Selection>,
}

impl SelectionSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

/// A field selection. An empty nested selection set means the field is a
/// leaf (graphql-parser keeps the set present but empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alias: Option<String>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentSpread {
    pub fragment_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineFragment {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub type_condition: Option<String>,
    pub selection_set: SelectionSet,
}

impl From<parser::Document<'_, String>> for Document {
    fn from(value: parser::Document<'_, String>) -> Self {
        Document {
            definitions: value.definitions.into_iter().map(|d| d.into()).collect(),
        }
    }
}

impl From<parser::Definition<'_, String>> for Definition {
    fn from(value: parser::Definition<'_, String>) -> Self {
        match value {
            parser::Definition::Operation(op) => Definition::Operation(op.into()),
            parser::Definition::Fragment(frag) => Definition::Fragment(frag.into()),
        }
    }
}

impl From<parser::OperationDefinition<'_, String>> for OperationDefinition {
    fn from(value: parser::OperationDefinition<'_, String>) -> Self {
        match value {
            parser::OperationDefinition::SelectionSet(selection_set) => OperationDefinition {
                kind: OperationKind::Query,
                name: None,
                variable_definitions: Vec::new(),
                selection_set: selection_set.into(),
            },
            parser::OperationDefinition::Query(query) => OperationDefinition {
                kind: OperationKind::Query,
                name: query.name,
                variable_definitions: query
                    .variable_definitions
                    .into_iter()
                    .map(|v| v.into())
                    .collect(),
                selection_set: query.selection_set.into(),
            },
            parser::OperationDefinition::Mutation(mutation) => OperationDefinition {
                kind: OperationKind::Mutation,
                name: mutation.name,
                variable_definitions: mutation
                    .variable_definitions
                    .into_iter()
                    .map(|v| v.into())
                    .collect(),
                selection_set: mutation.selection_set.into(),
            },
            parser::OperationDefinition::Subscription(subscription) => OperationDefinition {
                kind: OperationKind::Subscription,
                name: subscription.name,
                variable_definitions: subscription
                    .variable_definitions
                    .into_iter()
                    .map(|v| v.into())
                    .collect(),
                selection_set: subscription.selection_set.into(),
            },
        }
    }
}

impl From<parser::VariableDefinition<'_, String>> for VariableDefinition {
    fn from(value: parser::VariableDefinition<'_, String>) -> Self {
        VariableDefinition {
            name: value.name,
            variable_type: render_type(&value.var_type),
        }
    }
}

fn render_type(ty: &parser::Type<'_, String>) -> String {
    match ty {
        parser::Type::NamedType(name) => name.clone(),
        parser::Type::ListType(inner) => format!("[{}]", render_type(inner)),
        parser::Type::NonNullType(inner) => format!("{}!", render_type(inner)),
    }
}

impl From<parser::FragmentDefinition<'_, String>> for FragmentDefinition {
    fn from(value: parser::FragmentDefinition<'_, String>) -> Self {
        let parser::TypeCondition::On(type_condition) = value.type_condition;
        FragmentDefinition {
            name: value.name,
            type_condition,
            selection_set: value.selection_set.into(),
        }
    }
}

impl From<parser::SelectionSet<'_, String>> for SelectionSet {
    fn from(value: parser::SelectionSet<'_, String>) -> Self {
        SelectionSet {
            items: value.items.into_iter().map(|s| s.into()).collect(),
        }
    }
}

impl From<parser::Selection<'_, String>> for Selection {
    fn from(value: parser::Selection<'_, String>) -> Self {
        match value {
            parser::Selection::Field(field) => Selection::Field(Field {
                name: field.name,
                alias: field.alias,
                selection_set: field.selection_set.into(),
            }),
            parser::Selection::FragmentSpread(spread) => {
                Selection::FragmentSpread(FragmentSpread {
                    fragment_name: spread.fragment_name,
                })
            }
            parser::Selection::InlineFragment(inline) => Selection::InlineFragment(InlineFragment {
                type_condition: inline
                    .type_condition
                    .map(|parser::TypeCondition::On(name)| name),
                selection_set: inline.selection_set.into(),
            }),
        }
    }
}

impl From<schema::Definition<'_, String>> for OtherDefinition {
    fn from(value: schema::Definition<'_, String>) -> Self {
        let description = match &value {
            schema::Definition::SchemaDefinition(_) => "schema".to_string(),
            schema::Definition::TypeDefinition(type_def) => match type_def {
                schema::TypeDefinition::Scalar(t) => format!("scalar `{}`", t.name),
                schema::TypeDefinition::Object(t) => format!("type `{}`", t.name),
                schema::TypeDefinition::Interface(t) => format!("interface `{}`", t.name),
                schema::TypeDefinition::Union(t) => format!("union `{}`", t.name),
                schema::TypeDefinition::Enum(t) => format!("enum `{}`", t.name),
                schema::TypeDefinition::InputObject(t) => format!("input `{}`", t.name),
            },
            schema::Definition::TypeExtension(_) => "type extension".to_string(),
            schema::Definition::DirectiveDefinition(d) => format!("directive `@{}`", d.name),
        };

        OtherDefinition { description }
    }
}
