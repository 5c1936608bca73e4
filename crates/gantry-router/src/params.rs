//! Path parameter parsing.
//!
//! Route paths use `{name}` segments for parameters, optionally typed with a
//! converter suffix: `{id:int}`, `{ratio:float}`, `{key:uuid}`, `{rest:path}`.
//! Nothing here matches requests; the parsed parameters only feed the
//! generated schema document.

/// Path parameter type converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// String (default).
    Str,
    /// Integer (i64).
    Int,
    /// Float (f64).
    Float,
    /// UUID.
    Uuid,
    /// Path segment (can contain /).
    Path,
}

impl Converter {
    fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "int" => Self::Int,
            "float" => Self::Float,
            "uuid" => Self::Uuid,
            "path" => Self::Path,
            _ => Self::Str,
        }
    }
}

/// Path parameter information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    /// Parameter name.
    pub name: String,
    /// Type converter.
    pub converter: Converter,
}

fn parse_segment(segment: &str) -> Option<ParamInfo> {
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
    let (name, converter) = match inner.split_once(':') {
        Some((name, suffix)) => (name, Converter::from_suffix(suffix)),
        None => (inner, Converter::Str),
    };
    if name.is_empty() {
        return None;
    }
    Some(ParamInfo {
        name: name.to_string(),
        converter,
    })
}

/// Extracts the path parameters of a route path, in order of appearance.
///
/// ```
/// use gantry_router::{Converter, extract_path_params};
///
/// let params = extract_path_params("/users/{id:int}/posts/{slug}");
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[0].converter, Converter::Int);
/// assert_eq!(params[1].name, "slug");
/// ```
#[must_use]
pub fn extract_path_params(path: &str) -> Vec<ParamInfo> {
    path.split('/').filter_map(parse_segment).collect()
}

/// Returns the path with converter suffixes removed (`/items/{id:int}` becomes
/// `/items/{id}`), which is the form documented in a schema.
#[must_use]
pub fn strip_converters(path: &str) -> String {
    path.split('/')
        .map(|segment| match parse_segment(segment) {
            Some(param) => format!("{{{}}}", param.name),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Joins a prefix and a path, normalizing the slash between them.
pub(crate) fn combine_paths(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{}", path)
            }
        }
        (false, true) => prefix.to_string(),
        (false, false) => {
            let prefix = prefix.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            if path.is_empty() {
                prefix.to_string()
            } else {
                format!("{}/{}", prefix, path)
            }
        }
    }
}
