mod base64;
mod hash;
mod hex;
mod hex_int;
pub mod registry;
pub(crate) mod util;

pub use registry::{Dependencies, Registry};

use crate::error::Result;
use crate::types::{Category, CodecMeta};

/// A single text transformation the host can list, describe and invoke.
///
/// Implementations hold no state between calls.
pub trait Codec: Send + Sync {
    fn meta(&self) -> CodecMeta;
    fn run(&self, text: &str) -> Result<String>;

    fn name(&self) -> &'static str {
        self.meta().name
    }

    fn category(&self) -> Category {
        self.meta().category
    }
}

pub(crate) const AUTHOR: &str = "Thomas Engel";
