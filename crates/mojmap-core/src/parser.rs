use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{Error, MalformedReason, Result};
use crate::line::{classify_line, MappingLine};
use crate::model::{ClassEntry, FieldEntry, MappingIndex, MethodOverload};

/// Parses mapping text into a [`MappingIndex`].
///
/// Empty lines and `#` comments are skipped; a line holding only whitespace is not empty and is
/// rejected like any other unrecognized line. Any other line that is not a class header, method
/// or field mapping aborts the parse with [`Error::MalformedLine`]; no partial index is returned.
pub fn parse_mappings(text: &str) -> Result<MappingIndex> {
    let _span = tracing::debug_span!(target: "mojmap.parser", "parse_mappings", bytes = text.len())
        .entered();

    let mut builder = IndexBuilder::default();
    for (idx, raw) in text.lines().enumerate() {
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let line_number = idx + 1;
        if let Err(reason) = builder.push(raw) {
            tracing::warn!(
                target: "mojmap.parser",
                line_number,
                %reason,
                "rejecting malformed mapping line"
            );
            return Err(Error::MalformedLine {
                line_number,
                line: raw.to_string(),
                reason,
            });
        }
    }

    let index = builder.finish();
    let stats = index.stats();
    tracing::debug!(
        target: "mojmap.parser",
        classes = stats.classes,
        methods = stats.methods,
        fields = stats.fields,
        "parsed mappings"
    );
    Ok(index)
}

impl FromStr for MappingIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_mappings(s)
    }
}

/// Accumulates classes in source order. `current` is the key of the class that member lines
/// are attached to.
#[derive(Default)]
struct IndexBuilder {
    classes: IndexMap<String, ClassEntry>,
    current: Option<usize>,
}

impl IndexBuilder {
    fn push(&mut self, raw: &str) -> std::result::Result<(), MalformedReason> {
        match classify_line(raw)? {
            MappingLine::ClassHeader { name, obfuscated } => {
                let entry = ClassEntry::new(obfuscated.to_string());
                let (slot, _) = self.classes.insert_full(name.to_string(), entry);
                self.current = Some(slot);
            }
            line @ MappingLine::Method { .. } if line.is_initializer() => {
                self.current_class()?;
            }
            MappingLine::Method {
                name,
                obfuscated,
                argument_types,
                return_type,
            } => {
                let overload = MethodOverload {
                    obfuscated: obfuscated.to_string(),
                    argument_types: argument_types.into_iter().map(str::to_string).collect(),
                    return_type: return_type.to_string(),
                };
                self.current_class()?
                    .methods
                    .entry(name.to_string())
                    .or_default()
                    .push(overload);
            }
            MappingLine::Field {
                name,
                obfuscated,
                ty,
            } => {
                let field = FieldEntry {
                    obfuscated: obfuscated.to_string(),
                    ty: ty.to_string(),
                };
                self.current_class()?.fields.insert(name.to_string(), field);
            }
        }
        Ok(())
    }

    fn current_class(&mut self) -> std::result::Result<&mut ClassEntry, MalformedReason> {
        self.current
            .and_then(|slot| self.classes.get_index_mut(slot))
            .map(|(_, entry)| entry)
            .ok_or(MalformedReason::MemberBeforeClass)
    }

    fn finish(self) -> MappingIndex {
        MappingIndex::from_classes(self.classes)
    }
}
