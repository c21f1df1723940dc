use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::codec::{Dependencies, Registry};

pub struct Context {
    pub registry: &'static Registry,
    pub dependencies: Dependencies,
}

impl Context {
    pub fn new(registry: &'static Registry, dependencies: Dependencies) -> Self {
        Self {
            registry,
            dependencies,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            registry: Registry::global(),
            dependencies: Dependencies::bundled(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Encoder,
    Decoder,
    Hasher,
    Script,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Encoder,
        Category::Decoder,
        Category::Hasher,
        Category::Script,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Encoder => "encoder",
            Category::Decoder => "decoder",
            Category::Hasher => "hasher",
            Category::Script => "script",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Identity of a codec plugin. Constant for the lifetime of the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecMeta {
    pub name: &'static str,
    pub category: Category,
    pub author: &'static str,
    pub dependencies: &'static [&'static str],
}

impl CodecMeta {
    /// Registry key in the form `category:name`, lowercased.
    pub fn key(&self) -> String {
        format!("{}:{}", self.category, self.name.to_lowercase())
    }
}

#[derive(Debug, Clone)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    Literal(Vec<u8>),
}

impl InputSource {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => InputSource::Stdin,
            s if s.starts_with('@') => InputSource::File(PathBuf::from(&s[1..])),
            s => InputSource::Literal(s.as_bytes().to_vec()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum OutputDest {
    Stdout,
    File(PathBuf),
}

impl OutputDest {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => OutputDest::Stdout,
            s if s.starts_with('@') => OutputDest::File(PathBuf::from(&s[1..])),
            s => OutputDest::File(PathBuf::from(s)),
        }
    }
}
