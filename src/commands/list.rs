use decoderpp::types::{Category, CodecMeta, Context};

pub fn run_list(ctx: &Context, category: Option<Category>) -> Vec<CodecMeta> {
    match category {
        Some(category) => ctx.registry.list_category(category),
        None => ctx.registry.list(),
    }
}
