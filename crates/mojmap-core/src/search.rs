use serde::Serialize;

use crate::model::{ClassEntry, FieldEntry, MappingIndex, MethodOverload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMatch {
    pub name: String,
    pub obfuscated: String,
    pub argument_types: Vec<String>,
    pub return_type: String,
}

impl MethodMatch {
    fn new(name: &str, overload: &MethodOverload) -> Self {
        Self {
            name: name.to_string(),
            obfuscated: overload.obfuscated.clone(),
            argument_types: overload.argument_types.clone(),
            return_type: overload.return_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    pub name: String,
    pub obfuscated: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl FieldMatch {
    fn new(name: &str, field: &FieldEntry) -> Self {
        Self {
            name: name.to_string(),
            obfuscated: field.obfuscated.clone(),
            ty: field.ty.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMatch {
    pub class_name: String,
    pub obfuscated: String,
    /// `None` rather than an empty `Vec` when no method of this class was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<MethodMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldMatch>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub num_results: usize,
    pub limit_reached: bool,
    pub results: Vec<ClassMatch>,
}

/// Case-insensitive substring search over class, method and field names.
///
/// Classes whose own name matches are returned first, with all of their members. Classes that
/// only match through member names follow, restricted to the matching members. Every included
/// class, method overload and field counts toward `limit`; the search stops as soon as another
/// unit would exceed it.
///
/// `limitReached` is only set when some unit was cut off. With `limit == 0` that means it is
/// `true` when anything matched and `false` for a filter that matches nothing, even though both
/// return no results.
pub fn search(index: &MappingIndex, filter: &str, limit: usize) -> SearchResult {
    let needle = filter.to_lowercase();
    let mut collector = Collector::new(limit);

    let limit_reached = index
        .iter()
        .try_for_each(|(name, entry)| collector.collect_class(name, entry, &needle))
        .is_err();

    let result = collector.finish(limit_reached);
    tracing::debug!(
        target: "mojmap.search",
        filter,
        limit,
        num_results = result.num_results,
        limit_reached = result.limit_reached,
        "searched mappings"
    );
    result
}

impl MappingIndex {
    pub fn search(&self, filter: &str, limit: usize) -> SearchResult {
        search(self, filter, limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    /// The class name itself matched.
    Class,
    /// Only some members matched.
    Member,
}

struct LimitReached;

struct Collector {
    limit: usize,
    num_results: usize,
    class_matches: Vec<ClassMatch>,
    member_matches: Vec<ClassMatch>,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            num_results: 0,
            class_matches: Vec::new(),
            member_matches: Vec::new(),
        }
    }

    fn take(&mut self) -> Result<(), LimitReached> {
        if self.num_results >= self.limit {
            return Err(LimitReached);
        }
        self.num_results += 1;
        Ok(())
    }

    fn group(&mut self, tier: Tier) -> &mut Vec<ClassMatch> {
        match tier {
            Tier::Class => &mut self.class_matches,
            Tier::Member => &mut self.member_matches,
        }
    }

    /// Counts the class entry and appends it to its group the first time it is needed,
    /// returning its position within the group.
    fn open(
        &mut self,
        slot: &mut Option<usize>,
        tier: Tier,
        name: &str,
        entry: &ClassEntry,
    ) -> Result<usize, LimitReached> {
        if let Some(slot) = *slot {
            return Ok(slot);
        }
        self.take()?;
        let group = self.group(tier);
        group.push(ClassMatch {
            class_name: name.to_string(),
            obfuscated: entry.obfuscated.clone(),
            methods: None,
            fields: None,
        });
        let opened = group.len() - 1;
        *slot = Some(opened);
        Ok(opened)
    }

    fn collect_class(
        &mut self,
        name: &str,
        entry: &ClassEntry,
        needle: &str,
    ) -> Result<(), LimitReached> {
        let tier = if contains_ignore_case(name, needle) {
            Tier::Class
        } else {
            Tier::Member
        };
        let mut slot = None;

        for (method_name, overloads) in &entry.methods {
            if tier == Tier::Member && !contains_ignore_case(method_name, needle) {
                continue;
            }
            for overload in overloads {
                let opened = self.open(&mut slot, tier, name, entry)?;
                self.take()?;
                self.group(tier)[opened]
                    .methods
                    .get_or_insert_with(Vec::new)
                    .push(MethodMatch::new(method_name, overload));
            }
        }

        for (field_name, field) in &entry.fields {
            if tier == Tier::Member && !contains_ignore_case(field_name, needle) {
                continue;
            }
            let opened = self.open(&mut slot, tier, name, entry)?;
            self.take()?;
            self.group(tier)[opened]
                .fields
                .get_or_insert_with(Vec::new)
                .push(FieldMatch::new(field_name, field));
        }

        if tier == Tier::Class {
            self.open(&mut slot, tier, name, entry)?;
        }
        Ok(())
    }

    fn finish(self, limit_reached: bool) -> SearchResult {
        let mut results = self.class_matches;
        results.extend(self.member_matches);
        SearchResult {
            num_results: if limit_reached {
                self.limit
            } else {
                self.num_results
            },
            limit_reached,
            results,
        }
    }
}

/// `needle` must already be lower-cased. ASCII haystacks are compared in place.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if !haystack.is_ascii() {
        return haystack.to_lowercase().contains(needle);
    }

    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| {
            window
                .iter()
                .zip(needle)
                .all(|(&h, &n)| h.to_ascii_lowercase() == n)
        })
}
