use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use tracing::{debug, warn};

use super::Codec;
use crate::error::{DecoderError, Result};
use crate::types::{Category, CodecMeta};

/// External libraries linked into this build.
const BUNDLED_DEPENDENCIES: &[&str] = &["base64", "data-encoding", "md-5", "sha1", "sha2"];

macro_rules! register_codecs {
    ($($module:ident :: $codec:ident),* $(,)?) => {
        fn build_registry() -> Registry {
            let codecs: Vec<Box<dyn Codec>> = vec![
                $(Box::new(super::$module::$codec)),*
            ];

            let mut key_map = HashMap::new();
            let mut name_map: HashMap<String, Vec<usize>> = HashMap::new();
            for (idx, codec) in codecs.iter().enumerate() {
                let meta = codec.meta();
                if key_map.insert(meta.key(), idx).is_some() {
                    panic!("Duplicate codec '{}' in category '{}'", meta.name, meta.category);
                }
                name_map.entry(meta.name.to_lowercase()).or_default().push(idx);
            }

            Registry { codecs, key_map, name_map }
        }

        // Public for testing - generates list of expected codec names
        pub fn expected_codec_names() -> Vec<&'static str> {
            vec![
                $(super::$module::$codec.name(),)*
            ]
        }
    };
}

register_codecs! {
    hex_int::HexIntEncoder,
    hex::HexEncoder,
    base64::Base64Encoder,
    hex_int::HexIntDecoder,
    hex::HexDecoder,
    base64::Base64Decoder,
    hash::Md5Hasher,
    hash::Sha1Hasher,
    hash::Sha256Hasher,
    hash::Sha384Hasher,
    hash::Sha512Hasher,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The set of external libraries the host considers available at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependencies {
    available: BTreeSet<String>,
}

impl Dependencies {
    pub fn bundled() -> Self {
        Self {
            available: BUNDLED_DEPENDENCIES.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            available: BTreeSet::new(),
        }
    }

    pub fn without<I, S>(mut self, disabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for dep in disabled {
            if !self.available.remove(dep.as_ref()) {
                warn!("dependency '{}' is not bundled, nothing to disable", dep.as_ref());
            }
        }
        self
    }

    pub fn contains(&self, dependency: &str) -> bool {
        self.available.contains(dependency)
    }

    /// First declared dependency of `meta` that is not available.
    pub fn first_missing(&self, meta: &CodecMeta) -> Option<&'static str> {
        meta.dependencies.iter().copied().find(|d| !self.contains(d))
    }
}

impl Default for Dependencies {
    fn default() -> Self {
        Self::bundled()
    }
}

pub struct Registry {
    codecs: Vec<Box<dyn Codec>>,
    key_map: HashMap<String, usize>,
    name_map: HashMap<String, Vec<usize>>,
}

impl Registry {
    fn new() -> Self {
        build_registry()
    }

    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Registry::new)
    }

    /// Looks up a codec by `category:name` or by bare name when the name
    /// is unique across categories. Case-insensitive.
    pub fn get(&self, name: &str) -> Result<&dyn Codec> {
        let lower = name.trim().to_lowercase();
        if let Some(&idx) = self.key_map.get(&lower) {
            return Ok(self.codecs[idx].as_ref());
        }

        match self.name_map.get(&lower).map(Vec::as_slice) {
            Some([idx]) => Ok(self.codecs[*idx].as_ref()),
            Some(indices) => Err(DecoderError::AmbiguousCodec {
                name: name.to_string(),
                candidates: indices.iter().map(|&i| self.codecs[i].meta().key()).collect(),
            }),
            None => Err(DecoderError::unsupported_codec(name)),
        }
    }

    pub fn find(&self, category: Category, name: &str) -> Result<&dyn Codec> {
        let key = format!("{}:{}", category, name.trim().to_lowercase());
        self.key_map
            .get(&key)
            .map(|&idx| self.codecs[idx].as_ref())
            .ok_or_else(|| DecoderError::unsupported_codec(key))
    }

    pub fn list(&self) -> Vec<CodecMeta> {
        self.codecs.iter().map(|c| c.meta()).collect()
    }

    pub fn list_category(&self, category: Category) -> Vec<CodecMeta> {
        self.codecs
            .iter()
            .map(|c| c.meta())
            .filter(|m| m.category == category)
            .collect()
    }

    /// Runs one codec after checking that its declared dependencies are available.
    pub fn run(&self, codec: &dyn Codec, text: &str, deps: &Dependencies) -> Result<String> {
        let meta = codec.meta();
        if let Some(missing) = deps.first_missing(&meta) {
            warn!("{} cannot run, '{}' is unavailable", meta.key(), missing);
            return Err(DecoderError::missing_dependency(meta.name, missing));
        }
        debug!("running {} on {} bytes", meta.key(), text.len());
        codec.run(text)
    }

    /// Feeds `text` through each named codec in turn. Stops at the first failure.
    pub fn run_chain<S: AsRef<str>>(&self, names: &[S], text: &str, deps: &Dependencies) -> Result<String> {
        let mut current = text.to_string();
        for name in names {
            let codec = self.get(name.as_ref())?;
            current = self.run(codec, &current, deps)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codecs_registered() {
        let registry = Registry::global();
        assert_eq!(registry.list().len(), expected_codec_names().len());
    }

    #[test]
    fn test_get_by_key_and_unique_name() {
        let registry = Registry::global();
        assert_eq!(registry.get("hasher:sha256").unwrap().name(), "SHA256");
        assert_eq!(registry.get("sha256").unwrap().name(), "SHA256");
        assert_eq!(registry.get("Encoder:HEX (int)").unwrap().category(), Category::Encoder);
    }

    #[test]
    fn test_get_ambiguous_name() {
        let err = Registry::global().get("hex (int)").err().unwrap();
        match err {
            DecoderError::AmbiguousCodec { candidates, .. } => {
                assert_eq!(candidates, vec!["encoder:hex (int)", "decoder:hex (int)"]);
            }
            other => panic!("expected AmbiguousCodec, got {:?}", other),
        }
    }

    #[test]
    fn test_get_unknown() {
        assert!(matches!(
            Registry::global().get("rot13"),
            Err(DecoderError::UnsupportedCodec { .. })
        ));
    }

    #[test]
    fn test_find() {
        let codec = Registry::global().find(Category::Decoder, "BASE64").unwrap();
        assert_eq!(codec.category(), Category::Decoder);
        assert!(Registry::global().find(Category::Hasher, "BASE64").is_err());
    }

    #[test]
    fn test_list_category() {
        let hashers = Registry::global().list_category(Category::Hasher);
        let names: Vec<_> = hashers.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["MD5", "SHA1", "SHA256", "SHA384", "SHA512"]);
        assert!(Registry::global().list_category(Category::Script).is_empty());
    }

    #[test]
    fn test_every_declared_dependency_is_bundled() {
        let deps = Dependencies::bundled();
        for meta in Registry::global().list() {
            assert_eq!(deps.first_missing(&meta), None, "{}", meta.key());
        }
    }

    #[test]
    fn test_run_missing_dependency() {
        let registry = Registry::global();
        let deps = Dependencies::bundled().without(["sha2"]);
        let codec = registry.get("sha384").unwrap();
        match registry.run(codec, "abc", &deps) {
            Err(DecoderError::MissingDependency { codec, dependency }) => {
                assert_eq!(codec, "SHA384");
                assert_eq!(dependency, "sha2");
            }
            other => panic!("expected MissingDependency, got {:?}", other),
        }
        // MD5 does not need sha2
        let md5 = registry.get("md5").unwrap();
        assert!(registry.run(md5, "abc", &deps).is_ok());
    }

    #[test]
    fn test_run_without_dependencies_needed() {
        let registry = Registry::global();
        let codec = registry.get("encoder:hex (int)").unwrap();
        assert_eq!(registry.run(codec, "255", &Dependencies::none()).unwrap(), "0xff");
    }

    #[test]
    fn test_run_chain() {
        let registry = Registry::global();
        let deps = Dependencies::bundled();
        let out = registry
            .run_chain(&["encoder:base64", "decoder:base64", "md5"], "", &deps)
            .unwrap();
        assert_eq!(out, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_run_chain_stops_on_failure() {
        let registry = Registry::global();
        let result = registry.run_chain(
            &["encoder:hex (int)", "decoder:base64"],
            "abc",
            &Dependencies::bundled(),
        );
        assert!(matches!(result, Err(DecoderError::InvalidFormat { line: Some(1), .. })));
    }

    #[test]
    fn test_run_chain_empty_is_identity() {
        let names: [&str; 0] = [];
        let out = Registry::global()
            .run_chain(&names, "unchanged", &Dependencies::bundled())
            .unwrap();
        assert_eq!(out, "unchanged");
    }
}
