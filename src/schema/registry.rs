//! Registry of embedded form schemas

use rust_embed::Embed;

#[derive(Embed)]
#[folder = "assets/schemas/"]
struct EmbeddedSchemas;

/// The forms the client validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Register,
    Login,
}

impl FormKind {
    fn filename(&self) -> &'static str {
        match self {
            FormKind::Register => "register.schema.json",
            FormKind::Login => "login.schema.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Register => "register",
            FormKind::Login => "login",
        }
    }
}

/// Lookup over the embedded schema files
#[derive(Debug, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Get the raw schema JSON for a form
    pub fn get(&self, kind: FormKind) -> Option<String> {
        EmbeddedSchemas::get(kind.filename())
            .map(|file| String::from_utf8_lossy(file.data.as_ref()).into_owned())
    }

    pub fn has_schema(&self, kind: FormKind) -> bool {
        EmbeddedSchemas::get(kind.filename()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_schemas_embedded() {
        let registry = SchemaRegistry::new();
        assert!(registry.has_schema(FormKind::Register));
        assert!(registry.has_schema(FormKind::Login));
    }

    #[test]
    fn test_schemas_are_valid_json() {
        let registry = SchemaRegistry::new();
        for kind in [FormKind::Register, FormKind::Login] {
            let raw = registry.get(kind).unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
            assert!(parsed.get("properties").is_some(), "{} schema", kind.as_str());
        }
    }
}
