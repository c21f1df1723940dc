use serde::Serialize;

use decoderpp::error::Result;
use decoderpp::types::{CodecMeta, Context};

#[derive(Debug, Serialize)]
pub struct InfoResult {
    #[serde(flatten)]
    pub meta: CodecMeta,
    pub key: String,
    pub missing_dependency: Option<&'static str>,
}

pub fn run_info(ctx: &Context, codec_name: &str) -> Result<InfoResult> {
    let meta = ctx.registry.get(codec_name)?.meta();
    Ok(InfoResult {
        key: meta.key(),
        missing_dependency: ctx.dependencies.first_missing(&meta),
        meta,
    })
}
