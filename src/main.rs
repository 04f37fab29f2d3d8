use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gtpm::synth::{write_wav, SynthParams};
use gtpm::{generate_exercise, ExerciseConfig, GtpmError};

#[derive(Parser)]
#[command(name = "gtpm")]
#[command(version = "0.1")]
#[command(about = "Guitar Tab Problem Maker: fingering and reading exercises")]
struct Cli {
    /// YAML configuration file (kebab-case keys)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Tuning, highest string first (e.g. "E5 B4 G4 D4 A3 E3")
    #[arg(long)]
    tuning: Option<String>,

    #[arg(long)]
    first_fret: Option<u32>,

    #[arg(long)]
    last_fret: Option<u32>,

    /// Used fingers as fret offsets, comma separated (e.g. 0,1,2,3)
    #[arg(long, value_delimiter = ',')]
    fingers: Option<Vec<u32>>,

    /// Maximum tablature line width
    #[arg(short, long)]
    width: Option<usize>,

    /// Tempo in beats per minute
    #[arg(long)]
    bpm: Option<f64>,

    #[arg(long)]
    notes_per_beat: Option<u32>,

    /// Count-in beats (0 disables the count-in)
    #[arg(long)]
    starting_beats: Option<u32>,

    /// Keep the finger order fixed
    #[arg(long)]
    no_shuffle: bool,

    /// Shuffle each string's notes separately (reading exercise)
    #[arg(long, conflicts_with = "no_shuffle")]
    per_string: bool,

    /// Keep the finger order when traversing strings backwards
    #[arg(long)]
    no_invert: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Render the exercise audio to this WAV file
    #[arg(long, value_name = "FILE")]
    wav: Option<PathBuf>,

    /// Write the tablature here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<ExerciseConfig, GtpmError> {
        let config = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                ExerciseConfig::from_yaml(&content)?
            }
            None => ExerciseConfig::default(),
        };

        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    /// Override the fields given on the command line
    fn apply(&self, mut config: ExerciseConfig) -> ExerciseConfig {
        if let Some(tuning) = &self.tuning {
            config.tuning = tuning.clone();
        }
        if let Some(fret) = self.first_fret {
            config.first_fret = fret;
        }
        if let Some(fret) = self.last_fret {
            config.last_fret = fret;
        }
        if let Some(fingers) = &self.fingers {
            config.fingers = fingers.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(bpm) = self.bpm {
            config.beat = bpm;
        }
        if let Some(n) = self.notes_per_beat {
            config.notes_per_beat = n;
        }
        if let Some(n) = self.starting_beats {
            config.starting_beats = n;
        }
        if self.no_shuffle {
            config.shuffle_fingers = false;
        }
        if self.per_string {
            config.shuffle_fingers = true;
            config.shuffle_per_string = true;
        }
        if self.no_invert {
            config.invert_when_backwards = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

fn run(cli: &Cli) -> Result<(), GtpmError> {
    let config = cli.load_config()?;
    let exercise = generate_exercise(&config)?;
    let tab = exercise.tab(config.width)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &tab)?;
            eprintln!("Wrote tablature to {}", path.display());
        }
        None => print!("{}", tab),
    }

    if let Some(path) = &cli.wav {
        let audio = exercise.synthesize(&SynthParams::from_config(&config))?;
        write_wav(path, &audio)?;
        eprintln!(
            "Wrote {:.1}s of audio to {}",
            audio.duration_seconds(),
            path.display()
        );
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
