//! License policy
//!
//! Pure rules for reading a definition's declared license and deciding
//! whether it is excluded. A definition is excluded when its declared license
//! contains any exclusion fragment as a case-sensitive substring, so `GPL`
//! matches `GPL-3.0-or-later` and also `LGPL-2.1`.

use serde_yaml_ng::Value;

/// License declared in a definition's `meta.license`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredLicense {
    Single(String),
    /// Some definitions list several licenses
    Multiple(Vec<String>),
}

impl DeclaredLicense {
    /// Extract `meta.license` from a parsed definition document
    pub fn from_document(document: &Value) -> Option<Self> {
        let license = document.get("meta")?.get("license")?;
        match license {
            Value::String(s) if !s.is_empty() => Some(Self::Single(s.clone())),
            Value::Sequence(items) => {
                let names: Vec<String> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                (!names.is_empty()).then_some(Self::Multiple(names))
            }
            _ => None,
        }
    }

    fn names(&self) -> &[String] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Multiple(names) => names,
        }
    }

    /// First exclusion fragment found in this license, if any
    pub fn matching_fragment<'a>(&self, fragments: &'a [String]) -> Option<&'a str> {
        self.names().iter().find_map(|name| {
            fragments
                .iter()
                .find(|fragment| !fragment.is_empty() && name.contains(fragment.as_str()))
                .map(String::as_str)
        })
    }
}

/// Parse definition source and return its declared license
pub fn declared_license(source: &str) -> Result<Option<DeclaredLicense>, serde_yaml_ng::Error> {
    if source.trim().is_empty() {
        return Ok(None);
    }
    let document: Value = serde_yaml_ng::from_str(source)?;
    Ok(DeclaredLicense::from_document(&document))
}
