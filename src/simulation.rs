//! Simulation driver: builds a random network from a configuration and runs it under noisy
//! thalamic input, writing the requested report as it goes.
use itertools::Itertools;
use std::io::Write;

use crate::config::{OutputMode, SimulationConfig};
use crate::error::SNNError;
use crate::network::Network;
use crate::random::RandomNumbers;

/// Totals of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub total_spikes: usize,
    pub links: usize,
}

#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    network: Network,
    rng: RandomNumbers,
}

impl Simulation {
    /// Build the network described by the configuration.
    ///
    /// Without type fractions, `round(inhib * number)` neurons are fast spiking and the others
    /// regular spiking. With type fractions, each type gets `round(fraction * number)` neurons
    /// and the rest are regular spiking. The network is then randomly connected.
    pub fn new(config: SimulationConfig) -> Result<Self, SNNError> {
        config.validate()?;

        let mut rng = RandomNumbers::new(config.seed);
        log::info!(
            "Building a network of {} neurons with seed {}",
            config.number,
            rng.seed()
        );

        let mut network = Network::with_coupling(config.coupling);
        if config.types.is_empty() {
            network.resize(config.number, config.inhib, &mut rng);
        } else {
            network.resize(config.number, 0.0, &mut rng);
            network.set_default_params(&config.type_counts(), 0, &mut rng);
        }

        let links = network.random_connect(config.connectivity, config.strength, &mut rng);
        log::info!("Network connected with {} links", links);

        Ok(Simulation {
            config,
            network,
            rng,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The seed actually used, which differs from the configured one when that one is 0.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Run the configured number of steps and write the configured report to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary, SNNError> {
        let types = self.config.report_groups();
        let steps = self.config.time;
        let log_interval = (steps / 10).max(1);

        if self.config.output == OutputMode::Summary {
            self.network.print_head(&types, out)?;
        }

        let mut thalamic = vec![0.0; self.network.size()];
        let mut total_spikes = 0;
        for time in 0..steps {
            if self.config.thalamic > 0.0 {
                self.rng.normals(&mut thalamic, 0.0, self.config.thalamic);
            }

            let firing = self.network.step(&thalamic);
            total_spikes += firing.len();

            match self.config.output {
                OutputMode::Spikes => writeln!(
                    out,
                    "{}",
                    std::iter::once(time).chain(firing.iter().copied()).format("\t")
                )?,
                OutputMode::Summary => self.network.print_traj(time, &types, out)?,
                OutputMode::Params => {}
            }

            if (time + 1) % log_interval == 0 {
                log::debug!(
                    "Simulation progress: {}/{} steps, {} spikes",
                    time + 1,
                    steps,
                    total_spikes
                );
            }
        }

        if self.config.output == OutputMode::Params {
            self.network.print_params(out)?;
        }

        log::info!(
            "Simulation completed: {} spikes over {} steps",
            total_spikes,
            steps
        );
        Ok(RunSummary {
            steps,
            total_spikes,
            links: self.network.num_links(),
        })
    }
}
