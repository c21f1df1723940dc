use tracing::info;

use crate::io::read_text;
use decoderpp::error::Result;
use decoderpp::types::{Context, InputSource};

pub fn run_codecs(ctx: &Context, codecs: &[String], input: &InputSource) -> Result<String> {
    let text = read_text(input)?;
    let output = ctx.registry.run_chain(codecs, &text, &ctx.dependencies)?;
    info!("ran {} codec(s), {} -> {} bytes", codecs.len(), text.len(), output.len());
    Ok(output)
}
