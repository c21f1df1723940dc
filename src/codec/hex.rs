use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};

use super::{Codec, AUTHOR};
use crate::error::{DecoderError, Result};
use crate::types::{Category, CodecMeta};

const NAME: &str = "HEX";

pub struct HexEncoder;

impl Codec for HexEncoder {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: NAME,
            category: Category::Encoder,
            author: AUTHOR,
            dependencies: &["data-encoding"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        Ok(HEXLOWER.encode(text.as_bytes()))
    }
}

pub struct HexDecoder;

impl Codec for HexDecoder {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: NAME,
            category: Category::Decoder,
            author: AUTHOR,
            dependencies: &["data-encoding"],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        let bytes = HEXLOWER_PERMISSIVE
            .decode(text.trim().as_bytes())
            .map_err(|e| DecoderError::invalid_format(NAME, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| DecoderError::invalid_format(NAME, e.to_string()))
    }
}
