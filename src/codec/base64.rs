use base64::prelude::*;
use base64::Engine;

use super::{Codec, AUTHOR};
use crate::error::{DecoderError, Result};
use crate::types::{Category, CodecMeta};

const NAME: &str = "BASE64";

pub struct Base64Encoder;

impl Codec for Base64Encoder {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: NAME,
            category: Category::Encoder,
            author: AUTHOR,
            dependencies: &["base64"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        Ok(BASE64_STANDARD.encode(text.as_bytes()))
    }
}

pub struct Base64Decoder;

impl Codec for Base64Decoder {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: NAME,
            category: Category::Decoder,
            author: AUTHOR,
            dependencies: &["base64"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = BASE64_STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|e| DecoderError::invalid_format(NAME, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| DecoderError::invalid_format(NAME, e.to_string()))
    }
}
