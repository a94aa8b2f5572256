use crate::error::MalformedReason;

pub(crate) const CONSTRUCTOR: &str = "<init>";
pub(crate) const CLASS_INITIALIZER: &str = "<clinit>";

const ARROW: &str = " -> ";
const JAVA_LANG: &str = "java.lang.";

/// A single classified line of a mapping file, borrowing from the source text.
///
/// Type names are already simplified with [`simplify_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingLine<'a> {
    ClassHeader {
        name: &'a str,
        obfuscated: &'a str,
    },
    Method {
        name: &'a str,
        obfuscated: &'a str,
        argument_types: Vec<&'a str>,
        return_type: &'a str,
    },
    Field {
        name: &'a str,
        obfuscated: &'a str,
        ty: &'a str,
    },
}

impl MappingLine<'_> {
    /// `true` for `<init>` and `<clinit>`, which never make it into an index.
    pub fn is_initializer(&self) -> bool {
        matches!(self, MappingLine::Method { name, .. } if *name == CONSTRUCTOR || *name == CLASS_INITIALIZER)
    }
}

/// Strips a leading `java.lang.` from a type name. Nothing else is normalized.
pub fn simplify_type(ty: &str) -> &str {
    ty.strip_prefix(JAVA_LANG).unwrap_or(ty)
}

/// Classifies a non-blank, non-comment mapping line.
///
/// Unindented lines are class headers. Indented lines containing a parenthesis are methods,
/// every other indented line is a field.
pub fn classify_line(line: &str) -> Result<MappingLine<'_>, MalformedReason> {
    let line = line.trim_end();
    let body = line.trim_start();

    if body.len() == line.len() {
        return parse_class_header(line).ok_or(MalformedReason::InvalidClassHeader);
    }
    if body.contains(['(', ')']) {
        parse_method(body).ok_or(MalformedReason::InvalidMethod)
    } else {
        parse_field(body).ok_or(MalformedReason::InvalidField)
    }
}

// `<name> -> <obfuscated>:`
fn parse_class_header(line: &str) -> Option<MappingLine<'_>> {
    let (name, rest) = line.split_once(ARROW)?;
    let obfuscated = &rest[..rest.rfind(':')?];
    if !is_token(name) || obfuscated.is_empty() {
        return None;
    }
    Some(MappingLine::ClassHeader { name, obfuscated })
}

// `[<from>:<to>:]<return> <name>(<args>) -> <obfuscated>`
fn parse_method(body: &str) -> Option<MappingLine<'_>> {
    let body = strip_line_range(body);
    let (signature, obfuscated) = body.split_once(ARROW)?;
    let (return_type, rest) = signature.split_once(' ')?;
    let (name, rest) = rest.split_once('(')?;
    let args = rest.strip_suffix(')')?;

    if !is_token(return_type) || !is_token(name) || obfuscated.is_empty() {
        return None;
    }
    if name.contains(')') || args.contains(['(', ')', ' ']) {
        return None;
    }

    let argument_types = if args.is_empty() {
        Vec::new()
    } else {
        args.split(',')
            .map(|arg| (!arg.is_empty()).then(|| simplify_type(arg)))
            .collect::<Option<Vec<_>>>()?
    };

    Some(MappingLine::Method {
        name,
        obfuscated,
        argument_types,
        return_type: simplify_type(return_type),
    })
}

// `<type> <name> -> <obfuscated>`
fn parse_field(body: &str) -> Option<MappingLine<'_>> {
    let (signature, obfuscated) = body.split_once(ARROW)?;
    let (ty, name) = signature.split_once(' ')?;
    if !is_token(ty) || !is_token(name) || obfuscated.is_empty() {
        return None;
    }
    Some(MappingLine::Field {
        name,
        obfuscated,
        ty: simplify_type(ty),
    })
}

/// Drops an optional `<digits>:<digits>:` bytecode line-range prefix.
fn strip_line_range(body: &str) -> &str {
    fn digits_then_colon(input: &str) -> Option<&str> {
        let end = input.find(|c: char| !c.is_ascii_digit())?;
        if end == 0 {
            return None;
        }
        input[end..].strip_prefix(':')
    }

    digits_then_colon(body)
        .and_then(digits_then_colon)
        .unwrap_or(body)
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace)
}
