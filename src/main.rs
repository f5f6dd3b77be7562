use anyhow::Result;
use clap::{Parser, ValueEnum};
use soundplot::analysis::{ChannelReduction, WindowFunction};
use soundplot::batch::clips_in;
use soundplot::{ArtifactStore, BatchRunner, ClipId, ClipPipeline, DirectoryStore, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "soundplot")]
#[command(about = "Render waveform and spectrogram images for PCM audio clips", long_about = None)]
struct Args {
    /// Directory of clips to render (searched recursively)
    #[arg(short = 'i', long, required_unless_present_any = ["lookup", "list"])]
    input: Option<String>,

    /// Artifact store directory
    #[arg(short = 'o', long)]
    output: String,

    /// Canvas width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "400")]
    height: u32,

    /// Samples per analysis window
    #[arg(long, default_value = "1024")]
    window_size: usize,

    /// Samples shared by consecutive windows
    #[arg(long, default_value = "512")]
    overlap: usize,

    /// Window function applied before each transform
    #[arg(long, value_enum, default_value_t = WindowFunction::Hann)]
    window: WindowFunction,

    /// How multi-channel audio is reduced to one signal
    #[arg(long, value_enum, default_value_t = ChannelArg::First)]
    channel: ChannelArg,

    /// Print the stored record for one clip id and exit
    #[arg(long, conflicts_with = "list")]
    lookup: Option<String>,

    /// Print every stored clip id and exit
    #[arg(long)]
    list: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelArg {
    /// Channel 0 only
    First,
    /// Mean of all channels
    Mean,
}

impl From<ChannelArg> for ChannelReduction {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::First => ChannelReduction::First,
            ChannelArg::Mean => ChannelReduction::Mean,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let output = PathBuf::from(shellexpand::tilde(&args.output).as_ref());
    let store = DirectoryStore::open(&output)?;

    if let Some(id) = &args.lookup {
        return lookup(&store, id);
    }

    if args.list {
        for id in store.ids()? {
            println!("{}", id);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(input) = &args.input else {
        anyhow::bail!("--input is required when rendering");
    };
    let input = PathBuf::from(shellexpand::tilde(input).as_ref());

    let config = PipelineConfig::new()
        .with_size(args.width, args.height)
        .with_framing(args.window_size, args.overlap)
        .with_window(args.window)
        .with_reduction(args.channel.into());
    config.validate()?;

    log::info!("Soundplot");
    log::info!("=========");
    log::info!("Clips: {:?}", input);
    log::info!("Store: {:?}", output);
    log::info!(
        "Canvas {}x{}, W={} O={}, {:?} window, {:?} channel",
        args.width,
        args.height,
        args.window_size,
        args.overlap,
        args.window,
        args.channel
    );

    let clips = clips_in(&input)?;
    let mut runner = BatchRunner::new(ClipPipeline::new(config), store);
    let report = runner.run(clips);

    if report.is_success() {
        log::info!("✅ Rendered {} clips into {:?}", report.total(), output);
        Ok(ExitCode::SUCCESS)
    } else {
        for failure in &report.failed {
            log::error!("{}: {}", failure.label, failure.error);
        }
        log::error!(
            "{} of {} clips failed",
            report.failed.len(),
            report.total()
        );
        Ok(ExitCode::FAILURE)
    }
}

fn lookup(store: &DirectoryStore, id: &str) -> Result<ExitCode> {
    match store.find(&ClipId::new(id))? {
        Some(stored) => {
            let dir = store.entry_dir(&stored.id);
            println!("id:          {}", stored.id);
            println!("label:       {}", stored.label);
            println!("generated:   {}", stored.generated_at.to_rfc3339());
            println!(
                "waveform:    {} ({} bytes, {})",
                dir.join(format!("waveform.{}", stored.waveform.extension())).display(),
                stored.waveform.bytes.len(),
                stored.waveform.content_type
            );
            println!(
                "spectrogram: {} ({} bytes, {})",
                dir.join(format!("spectrogram.{}", stored.spectrogram.extension())).display(),
                stored.spectrogram.bytes.len(),
                stored.spectrogram.content_type
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("not found: {}", id);
            Ok(ExitCode::FAILURE)
        }
    }
}
