use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use translate_icon_gen::{
    design::{Preset, DEFAULT_SIZES},
    icon_gen::{self, Options},
};

#[derive(Debug, Parser)]
#[clap(
    name = "translate-icon-gen",
    about = "Generate the translate extension icons"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Icon design to draw.
    #[clap(long, value_enum, default_value_t = Preset::default())]
    preset: Preset,

    /// Resample this image instead of drawing the icon.
    #[clap(long, value_name = "PATH")]
    master: Option<PathBuf>,

    /// Icon sizes to generate.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES", default_values_t = DEFAULT_SIZES)]
    sizes: Vec<u32>,

    /// Also write icons.json for the extension manifest.
    #[clap(long)]
    manifest: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Self {
            output: args.output,
            sizes: args.sizes,
            preset: args.preset,
            master: args.master,
            manifest: args.manifest,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let report = icon_gen::generate_icons(&args.into());

    // A skipped batch has already been reported on its own line
    if report.icon_failures() > 0 {
        log::warn!(
            "{} written, {} failed",
            report.written.len(),
            report.icon_failures()
        );
    }

    Ok(())
}
