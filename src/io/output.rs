use std::fs::File;
use std::io::{self, Write};

use decoderpp::error::Result;
use decoderpp::types::OutputDest;

pub struct OutputConfig {
    pub dest: OutputDest,
    pub trailing_newline: bool,
}

pub fn write_output(data: &str, config: &OutputConfig) -> Result<()> {
    match &config.dest {
        OutputDest::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(data.as_bytes())?;
            Ok(())
        }
        OutputDest::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data.as_bytes())?;
            if config.trailing_newline {
                handle.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}
