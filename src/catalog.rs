//! Type Catalog
//!
//! Loads declarative record-type definitions from a directory of JSON
//! declaration files and exposes them as an immutable, ordered catalog.
//! A declaration file holds either a single type declaration or an array
//! of them:
//!
//! ```json
//! { "name": "Advanced",
//!   "fields": [
//!     { "name": "greeting", "type": "string" },
//!     { "name": "postfix",  "type": "string", "optional": true },
//!     { "name": "basic",    "type": "Basic" } ] }
//! ```
//!
//! The catalog is a read-only projection created once per generation run;
//! nothing downstream mutates it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::checksum::Checksum;
use crate::error::{ModelError, Result};

/// Scalar keywords that are recognized but produce no property schema.
/// Anything outside this list that is not `number`/`string` is treated as a
/// reference to another declared type.
const UNSUPPORTED_SCALARS: &[&str] = &[
    "boolean", "integer", "object", "array", "null", "any", "unknown", "undefined", "never",
    "void", "bigint", "symbol",
];

/// Classification of a field's declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Numeric primitive
    Number,
    /// String primitive
    String,
    /// Reference to another record type by name
    Reference(String),
    /// Recognized scalar keyword with no schema mapping; skipped at build time
    Unsupported(String),
}

impl FieldKind {
    /// Classify a raw declared type string
    pub fn classify(raw: &str) -> Self {
        match raw {
            "number" => FieldKind::Number,
            "string" => FieldKind::String,
            other if UNSUPPORTED_SCALARS.contains(&other) => {
                FieldKind::Unsupported(other.to_string())
            }
            other => FieldKind::Reference(other.to_string()),
        }
    }

    /// Reference target, if this is a reference kind
    pub fn reference_target(&self) -> Option<&str> {
        match self {
            FieldKind::Reference(target) => Some(target),
            _ => None,
        }
    }
}

/// A single field of a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as declared
    pub name: String,
    /// Classified field kind
    pub kind: FieldKind,
    /// Whether the declaration carried the optional marker
    pub optional: bool,
}

/// A named record type with its ordered fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTypeDef {
    /// Type name, unique within one catalog
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDef>,
    /// Declaration file this type came from
    pub source_path: PathBuf,
}

/// Raw on-disk field declaration
#[derive(Debug, Deserialize)]
struct FieldDecl {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    optional: bool,
}

/// Raw on-disk type declaration
#[derive(Debug, Deserialize)]
struct TypeDecl {
    name: String,
    #[serde(default)]
    fields: Vec<FieldDecl>,
}

/// A declaration file is either one declaration or an array of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeclFile {
    Single(TypeDecl),
    Many(Vec<TypeDecl>),
}

impl DeclFile {
    fn into_decls(self) -> Vec<TypeDecl> {
        match self {
            DeclFile::Single(decl) => vec![decl],
            DeclFile::Many(decls) => decls,
        }
    }
}

/// The loaded set of record types for one generation run
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: Vec<RecordTypeDef>,
    by_name: HashMap<String, usize>,
    bundle_hash: Checksum,
}

impl TypeCatalog {
    /// Load all declaration files under `dir`.
    ///
    /// Walks the directory in sorted order so catalog order (and with it
    /// every planner tie-break) is deterministic across runs. Fails if the
    /// location is unreadable or yields no declarations.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let meta = fs::metadata(dir).map_err(|source| ModelError::CatalogUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(ModelError::CatalogUnreadable {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotADirectory,
                    "catalog location is not a directory",
                ),
            });
        }

        let mut types: Vec<RecordTypeDef> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut hasher = Sha256::new();

        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }

            let content = fs::read_to_string(path)?;
            hasher.update(content.as_bytes());

            let file: DeclFile = serde_json::from_str(&content).map_err(|source| {
                ModelError::InvalidDeclaration {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

            for decl in file.into_decls() {
                let def = RecordTypeDef {
                    name: decl.name,
                    fields: decl
                        .fields
                        .into_iter()
                        .map(|f| FieldDef {
                            name: f.name,
                            kind: FieldKind::classify(&f.ty),
                            optional: f.optional,
                        })
                        .collect(),
                    source_path: path.to_path_buf(),
                };

                // Last declaration of a name wins, keeping its original
                // position in catalog order.
                match by_name.get(&def.name) {
                    Some(&idx) => {
                        tracing::warn!(
                            name = %def.name,
                            path = %path.display(),
                            "duplicate type declaration, later one replaces earlier"
                        );
                        types[idx] = def;
                    }
                    None => {
                        by_name.insert(def.name.clone(), types.len());
                        types.push(def);
                    }
                }
            }
        }

        if types.is_empty() {
            return Err(ModelError::EmptyCatalog {
                path: dir.to_path_buf(),
            });
        }

        let bundle_hash = Checksum::from(format!("{:x}", hasher.finalize()));

        Ok(Self {
            types,
            by_name,
            bundle_hash,
        })
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&RecordTypeDef> {
        self.by_name.get(name).map(|&idx| &self.types[idx])
    }

    /// Whether a type name is declared in this catalog
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterate types in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &RecordTypeDef> {
        self.types.iter()
    }

    /// Type names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// Number of declared types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Fingerprint over all declaration bytes, in walk order
    pub fn bundle_hash(&self) -> &Checksum {
        &self.bundle_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_primitives() {
        assert_eq!(FieldKind::classify("number"), FieldKind::Number);
        assert_eq!(FieldKind::classify("string"), FieldKind::String);
    }

    #[test]
    fn test_classify_unsupported_scalars() {
        for raw in ["boolean", "any", "void", "bigint"] {
            assert_eq!(
                FieldKind::classify(raw),
                FieldKind::Unsupported(raw.to_string())
            );
        }
    }

    #[test]
    fn test_classify_reference() {
        assert_eq!(
            FieldKind::classify("Basic"),
            FieldKind::Reference("Basic".to_string())
        );
        // Unknown lowercase names that are not scalar keywords are still
        // references; resolution happens later.
        assert_eq!(
            FieldKind::classify("basicish"),
            FieldKind::Reference("basicish".to_string())
        );
    }

    #[test]
    fn test_decl_file_accepts_single_and_many() {
        let single: DeclFile =
            serde_json::from_str(r#"{ "name": "A", "fields": [] }"#).unwrap();
        assert_eq!(single.into_decls().len(), 1);

        let many: DeclFile = serde_json::from_str(
            r#"[ { "name": "A", "fields": [] }, { "name": "B", "fields": [] } ]"#,
        )
        .unwrap();
        assert_eq!(many.into_decls().len(), 2);
    }

    #[test]
    fn test_optional_marker_defaults_to_false() {
        let decl: TypeDecl = serde_json::from_str(
            r#"{ "name": "A", "fields": [ { "name": "x", "type": "string" } ] }"#,
        )
        .unwrap();
        assert!(!decl.fields[0].optional);
    }
}
