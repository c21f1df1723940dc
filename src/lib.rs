pub mod codec;
pub mod error;
pub mod shortcut;
pub mod types;

pub use codec::{Codec, Dependencies, Registry};
pub use error::{DecoderError, Result, TableError};
pub use shortcut::{Shortcut, ShortcutTable};
pub use types::{Category, CodecMeta, Context, InputSource, OutputDest};
