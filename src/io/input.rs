use std::fs::File;
use std::io::{self, Read};

use decoderpp::error::{DecoderError, Result};
use decoderpp::types::InputSource;

pub fn read_input(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        InputSource::File(path) => {
            let mut file = File::open(path)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            Ok(buf)
        }
        InputSource::Literal(data) => Ok(data.clone()),
    }
}

/// Reads the whole input as UTF-8 text; codecs operate on text only.
pub fn read_text(source: &InputSource) -> Result<String> {
    let data = read_input(source)?;
    String::from_utf8(data).map_err(|e| DecoderError::invalid_format("input", e.to_string()))
}
