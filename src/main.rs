use anyhow::Result;
use clap::{ArgAction, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rhythmbox_shuffler::rhythmbox::{self, DEFAULT_PLAYLISTS_PATH};
use rhythmbox_shuffler::shuffle::{DisplayLevel, ShuffleMode};
use rhythmbox_shuffler::{ReorderOptions, ShuffleConfig, ShufflePipeline};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rhythmbox-shuffler")]
#[command(about = "Shuffle or sort a Rhythmbox playlist folder by folder", long_about = None)]
struct Args {
    /// Path to Rhythmbox playlists (playlists.xml)
    #[arg(short = 'p', long, default_value = DEFAULT_PLAYLISTS_PATH)]
    playlists: String,

    /// File to write the processed XML to (nothing is written if omitted)
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,

    /// Shuffle the order of folders; if false, they are sorted
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    shuffle_dirs: bool,

    /// Shuffle the tracks within each folder; if false, they are sorted
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    shuffle_in_dir: bool,

    /// Reorder every static playlist in place instead of adding a shuffled copy
    #[arg(long)]
    in_place: bool,

    /// Display info on static playlists
    #[arg(long)]
    display: bool,

    /// Display the track paths as well (implies --display)
    #[arg(long)]
    display_all: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let playlists_path = PathBuf::from(shellexpand::tilde(&args.playlists).as_ref());
    let mut document = rhythmbox::parse_playlists(&playlists_path)?;

    let mode = if args.in_place {
        ShuffleMode::InPlace
    } else {
        ShuffleMode::Copy
    };
    let config = ShuffleConfig::new(ReorderOptions::new(args.shuffle_dirs, args.shuffle_in_dir))
        .with_mode(mode)
        .with_display(DisplayLevel::from_flags(args.display, args.display_all));

    // One generator per run, seeded from the OS so runs are uncorrelated
    let mut rng = StdRng::from_os_rng();
    let pipeline = ShufflePipeline::new(config);
    let summary = pipeline.run_and_save(
        &mut document,
        &mut rng,
        &mut io::stdout().lock(),
        args.out.as_deref(),
    )?;

    for playlist in &summary.playlists {
        log::debug!("{:?}", playlist);
    }

    Ok(())
}
