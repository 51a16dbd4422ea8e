use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use izhinet::config::{parse_type_fractions, OutputMode, SimulationConfig};
use izhinet::error::SNNError;
use izhinet::network::Coupling;
use izhinet::simulation::Simulation;

#[derive(Parser, Debug)]
#[command(about = "Simulate a random network of Izhikevich neurons under thalamic noise")]
struct Args {
    /// A JSON configuration file, overridden by the other options
    #[arg(long)]
    config: Option<PathBuf>,
    /// The number of neurons
    #[arg(short = 'N', long)]
    number: Option<usize>,
    /// The fraction of inhibitory neurons, ignored when --types is given
    #[arg(short = 'i', long)]
    inhib: Option<f64>,
    /// The number of simulation steps (ms)
    #[arg(short = 't', long)]
    time: Option<usize>,
    /// The mean out-degree of a neuron
    #[arg(short = 'c', long)]
    connectivity: Option<f64>,
    /// The mean strength of a link
    #[arg(short = 'L', long)]
    strength: Option<f64>,
    /// The standard deviation of the thalamic input
    #[arg(short = 'l', long)]
    thalamic: Option<f64>,
    /// The seed of the random source (0 draws one from entropy)
    #[arg(short = 'S', long)]
    seed: Option<u64>,
    /// The fraction of each neuron type, e.g. FS:0.2,IB:0.1
    #[arg(short = 'T', long)]
    types: Option<String>,
    /// The report to write, must be one of: spikes, summary, params
    #[arg(short = 'o', long)]
    output: Option<String>,
    /// The synaptic coupling rule, must be one of: literal, presynaptic
    #[arg(long)]
    coupling: Option<String>,
    /// Write the report to this file instead of the standard output
    #[arg(short = 'O', long)]
    outfile: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(SimulationConfig, Option<PathBuf>), SNNError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(number) = self.number {
            config.number = number;
        }
        if let Some(inhib) = self.inhib {
            config.inhib = inhib;
        }
        if let Some(time) = self.time {
            config.time = time;
        }
        if let Some(connectivity) = self.connectivity {
            config.connectivity = connectivity;
        }
        if let Some(strength) = self.strength {
            config.strength = strength;
        }
        if let Some(thalamic) = self.thalamic {
            config.thalamic = thalamic;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(types) = &self.types {
            config.types = parse_type_fractions(types)?;
        }
        if let Some(output) = &self.output {
            config.output = output.parse::<OutputMode>()?;
        }
        if let Some(coupling) = &self.coupling {
            config.coupling = coupling.parse::<Coupling>()?;
        }

        Ok((config, self.outfile))
    }
}

fn run(args: Args) -> Result<(), SNNError> {
    let (config, outfile) = args.into_config()?;
    let mut simulation = Simulation::new(config)?;

    let mut out: BufWriter<Box<dyn Write>> = match outfile {
        Some(path) => BufWriter::new(Box::new(File::create(path)?)),
        None => BufWriter::new(Box::new(io::stdout().lock())),
    };
    let summary = simulation.run(&mut out)?;
    out.flush()?;

    log::info!(
        "{} spikes in {} steps over {} links (seed {})",
        summary.total_spikes,
        summary.steps,
        summary.links,
        simulation.seed()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
