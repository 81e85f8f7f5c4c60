use cruet::Inflector;

/// Identifiers derived from one operation name. Collision-free across a
/// run only because operation names are already unique; the render loop
/// still guards the lossy snake_case mapping.
#[derive(Debug, Clone)]
pub struct ArtifactNames {
    /// Module (and file stem) of the operation artifact.
    pub module: String,
    /// Trait exposing the two accessors.
    pub trait_name: String,
    pub sync_method: String,
    pub async_method: String,
}

pub fn artifact_names(operation_name: &str) -> ArtifactNames {
    let module = operation_name.to_snake_case();
    ArtifactNames {
        trait_name: operation_name.to_pascal_case(),
        sync_method: module.clone(),
        async_method: format!("{module}_async"),
        module,
    }
}

// Strict and reserved keywords; a generated module or method may not shadow
// any of them. "mod" also keeps the facade's mod.rs collision-free.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

pub fn is_reserved(identifier: &str) -> bool {
    RUST_KEYWORDS.contains(&identifier)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{artifact_names, is_reserved};

    #[test]
    fn derives_identifiers_from_operation_names() {
        let names = artifact_names("getUsers");
        assert_eq!(names.module, "get_users");
        assert_eq!(names.trait_name, "GetUsers");
        assert_eq!(names.sync_method, "get_users");
        assert_eq!(names.async_method, "get_users_async");
    }

    #[test]
    fn pascal_case_operation_names_round_trip() {
        let names = artifact_names("GetCountry");
        assert_eq!(names.module, "get_country");
        assert_eq!(names.trait_name, "GetCountry");
    }

    #[test]
    fn keywords_are_reserved() {
        assert!(is_reserved("mod"));
        assert!(is_reserved("type"));
        assert!(!is_reserved("get_users"));
    }
}
