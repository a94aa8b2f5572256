use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::line::{CLASS_INITIALIZER, CONSTRUCTOR};

/// One declaration of a (possibly overloaded) method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodOverload {
    pub obfuscated: String,
    pub argument_types: Vec<String>,
    pub return_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub obfuscated: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub obfuscated: String,
    /// Overloads grouped by method name, in declaration order. Never holds an empty `Vec`.
    #[serde(default)]
    pub methods: IndexMap<String, Vec<MethodOverload>>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldEntry>,
}

impl ClassEntry {
    pub(crate) fn new(obfuscated: String) -> Self {
        Self {
            obfuscated,
            methods: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    /// All overloads declared under `name`, or an empty slice.
    pub fn overloads(&self, name: &str) -> &[MethodOverload] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.get(name)
    }

    fn overload_count(&self) -> usize {
        self.methods.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MappingStats {
    pub classes: usize,
    /// Number of method overloads (not distinct method names).
    pub methods: usize,
    pub fields: usize,
}

/// Parsed mapping file: readable class name to [`ClassEntry`], in order of first appearance.
///
/// The index only exposes read access once built, so a single instance can be shared between
/// threads and searched concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, ClassEntry>")]
pub struct MappingIndex {
    classes: IndexMap<String, ClassEntry>,
}

impl MappingIndex {
    pub(crate) fn from_classes(classes: IndexMap<String, ClassEntry>) -> Self {
        Self { classes }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassEntry> {
        self.classes.get(class_name)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassEntry)> + '_ {
        self.classes.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.keys().map(String::as_str)
    }

    /// Reverse lookup: the first class (in index order) whose obfuscated name is `obfuscated`.
    pub fn find_by_obfuscated(&self, obfuscated: &str) -> Option<(&str, &ClassEntry)> {
        self.iter().find(|(_, entry)| entry.obfuscated == obfuscated)
    }

    pub fn stats(&self) -> MappingStats {
        MappingStats {
            classes: self.classes.len(),
            methods: self.classes.values().map(ClassEntry::overload_count).sum(),
            fields: self.classes.values().map(|entry| entry.fields.len()).sum(),
        }
    }
}

impl Serialize for MappingIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.classes.serialize(serializer)
    }
}

impl TryFrom<IndexMap<String, ClassEntry>> for MappingIndex {
    type Error = String;

    fn try_from(classes: IndexMap<String, ClassEntry>) -> Result<Self, Self::Error> {
        for (name, entry) in &classes {
            if entry.obfuscated.is_empty() {
                return Err(format!("class {name} has an empty obfuscated name"));
            }
            for (method, overloads) in &entry.methods {
                if method == CONSTRUCTOR || method == CLASS_INITIALIZER {
                    return Err(format!("class {name} maps initializer {method}"));
                }
                if overloads.is_empty() {
                    return Err(format!("class {name} has no overloads for method {method}"));
                }
            }
        }
        Ok(Self { classes })
    }
}
