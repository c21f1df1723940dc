use super::{util, Codec, AUTHOR};
use crate::error::Result;
use crate::types::{Category, CodecMeta};

const NAME: &str = "HEX (int)";

fn signed(value: &util::Integer, prefix: &str, radix: u32) -> String {
    let sign = if value.negative { "-" } else { "" };
    format!("{}{}{}", sign, prefix, value.magnitude_in(radix))
}

/// Converts each decimal line to its `0x`-prefixed hexadecimal form.
pub struct HexIntEncoder;

impl Codec for HexIntEncoder {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: NAME,
            category: Category::Encoder,
            author: AUTHOR,
            dependencies: &[],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        util::run_lines(NAME, text, |line| {
            util::parse_int(line, 10).map(|v| signed(&v, "0x", 16))
        })
    }
}

/// Converts each hexadecimal line (prefix optional) back to decimal.
pub struct HexIntDecoder;

impl Codec for HexIntDecoder {
    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: NAME,
            category: Category::Decoder,
            author: AUTHOR,
            dependencies: &[],
        }
    }

    fn run(&self, text: &str) -> Result<String> {
        util::run_lines(NAME, text, |line| {
            util::parse_int(line, 16).map(|v| signed(&v, "", 10))
        })
    }
}
