mod info;
mod list;
mod run;
mod shortcuts;

pub use info::run_info;
pub use list::run_list;
pub use run::run_codecs;
pub use shortcuts::{run_shortcut_list, run_shortcut_set};

use std::path::PathBuf;

use crate::io::{write_output, OutputConfig};
use decoderpp::error::Result;
use decoderpp::types::{Category, Context, InputSource, OutputDest};

pub trait CommandHandler {
    fn execute(&self, ctx: &Context) -> Result<()>;
}

pub struct RunCommand {
    pub codecs: Vec<String>,
    pub input: InputSource,
    pub output: OutputDest,
}

impl CommandHandler for RunCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let result = run_codecs(ctx, &self.codecs, &self.input)?;
        let config = OutputConfig {
            dest: self.output.clone(),
            trailing_newline: true,
        };
        write_output(&result, &config)
    }
}

pub struct ListCommand {
    pub category: Option<Category>,
    pub json: bool,
}

impl CommandHandler for ListCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let codecs = run_list(ctx, self.category);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&codecs)?);
        } else {
            println!("{:<12} {:<10} DEPENDENCIES", "NAME", "CATEGORY");
            println!("{}", "-".repeat(50));
            for c in codecs {
                let deps = if c.dependencies.is_empty() {
                    "-".to_string()
                } else {
                    c.dependencies.join(", ")
                };
                println!("{:<12} {:<10} {}", c.name, c.category, deps);
            }
        }
        Ok(())
    }
}

pub struct InfoCommand {
    pub codec: String,
    pub json: bool,
}

impl CommandHandler for InfoCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let info = run_info(ctx, &self.codec)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("Name:         {}", info.meta.name);
            println!("Category:     {}", info.meta.category);
            println!("Author:       {}", info.meta.author);
            println!("Key:          {}", info.key);
            println!("Dependencies: {}", info.meta.dependencies.join(", "));
            if let Some(missing) = info.missing_dependency {
                println!("Unavailable:  {}", missing);
            }
        }
        Ok(())
    }
}

pub struct ShortcutListCommand {
    pub file: PathBuf,
    pub filter: String,
    pub json: bool,
}

impl CommandHandler for ShortcutListCommand {
    fn execute(&self, _ctx: &Context) -> Result<()> {
        let rows = run_shortcut_list(&self.file, &self.filter)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            println!("{:<32} SHORTCUT", "NAME");
            println!("{}", "-".repeat(50));
            for row in rows {
                println!("{:<32} {}", row.name, row.key);
            }
        }
        Ok(())
    }
}

pub struct ShortcutSetCommand {
    pub file: PathBuf,
    pub filter: String,
    pub id: String,
    pub key: String,
}

impl CommandHandler for ShortcutSetCommand {
    fn execute(&self, _ctx: &Context) -> Result<()> {
        let updated = run_shortcut_set(&self.file, &self.filter, &self.id, &self.key)?;
        println!("{} = {}", updated.name, updated.key);
        Ok(())
    }
}
