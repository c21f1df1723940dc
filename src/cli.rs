use clap::{Args, Parser, Subcommand, ValueEnum};

use decoderpp::types::Category;

#[derive(Parser)]
#[command(name = "decoderpp")]
#[command(about = "Decode, encode and hash text through chainable codecs")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(
        long = "disable-dependency",
        global = true,
        value_name = "LIB",
        help = "Treat an external library as unavailable"
    )]
    pub disabled_dependencies: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Run text through one or more codecs, in order")]
    Run {
        #[arg(
            long = "codec",
            short = 'c',
            required = true,
            help = "Codec name or category:name, repeat to chain"
        )]
        codecs: Vec<String>,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, short = 'o', default_value = "-")]
        out: String,
    },

    #[command(about = "List available codecs")]
    List {
        #[arg(long)]
        category: Option<CategoryArg>,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Show codec details")]
    Info {
        codec: String,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Inspect or edit keyboard shortcuts", subcommand)]
    Shortcuts(ShortcutsCommand),
}

#[derive(Subcommand)]
pub enum ShortcutsCommand {
    #[command(about = "Show shortcuts matching a name filter")]
    List {
        #[command(flatten)]
        source: ShortcutSource,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Assign a new key to a shortcut")]
    Set {
        #[command(flatten)]
        source: ShortcutSource,

        #[arg(long)]
        id: String,

        #[arg(long)]
        key: String,
    },
}

#[derive(Args)]
pub struct ShortcutSource {
    #[arg(long, short = 'f', help = "JSON file holding the shortcut list")]
    pub file: String,

    #[arg(long, default_value = "", help = "Case-insensitive name filter")]
    pub filter: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Encoder,
    Decoder,
    Hasher,
    Script,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Encoder => Category::Encoder,
            CategoryArg::Decoder => Category::Decoder,
            CategoryArg::Hasher => Category::Hasher,
            CategoryArg::Script => Category::Script,
        }
    }
}
