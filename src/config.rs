//! Simulation configuration, read from JSON files and command line options.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::error::SNNError;
use crate::network::Coupling;
use crate::neuron::NeuronType;
use crate::random::UNSEEDED;

/// What the simulation writes while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One line per step with the ids of the neurons that fired.
    #[default]
    Spikes,
    /// Potential, recovery and input of one neuron per type group, at every step.
    Summary,
    /// The parameter table of the network, once the run is over.
    Params,
}

impl FromStr for OutputMode {
    type Err = SNNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spikes" => Ok(OutputMode::Spikes),
            "summary" => Ok(OutputMode::Summary),
            "params" => Ok(OutputMode::Params),
            _ => Err(SNNError::ParseError(format!(
                "unknown output mode {}, expected one of spikes, summary, params",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputMode::Spikes => write!(f, "spikes"),
            OutputMode::Summary => write!(f, "summary"),
            OutputMode::Params => write!(f, "params"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// The number of neurons.
    pub number: usize,
    /// The fraction of inhibitory neurons, used when `types` is empty.
    pub inhib: f64,
    /// The number of simulation steps (ms).
    pub time: usize,
    /// The mean out-degree of a neuron.
    pub connectivity: f64,
    /// The mean strength of a link.
    pub strength: f64,
    /// The standard deviation of the thalamic input.
    pub thalamic: f64,
    /// The seed of the random source, 0 to draw one from entropy.
    pub seed: u64,
    /// The fraction of neurons of each type; neurons not covered are regular spiking.
    pub types: BTreeMap<NeuronType, f64>,
    pub output: OutputMode,
    pub coupling: Coupling,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            number: 200,
            inhib: 0.2,
            time: 1000,
            connectivity: 20.0,
            strength: 5.0,
            thalamic: 5.0,
            seed: UNSEEDED,
            types: BTreeMap::new(),
            output: OutputMode::Spikes,
            coupling: Coupling::Literal,
        }
    }
}

impl SimulationConfig {
    /// Read a configuration from a JSON file. Missing fields take their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Check that the configuration describes a network that can be built.
    pub fn validate(&self) -> Result<(), SNNError> {
        if self.number == 0 {
            return Err(SNNError::InvalidParameter(
                "The number of neurons must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.inhib) {
            return Err(SNNError::InvalidParameter(
                "The inhibitory fraction must be in [0, 1]".to_string(),
            ));
        }
        if let Some((neuron_type, _)) = self
            .types
            .iter()
            .find(|(_, fraction)| !(0.0..=1.0).contains(*fraction))
        {
            return Err(SNNError::InvalidParameter(format!(
                "The fraction of {} neurons must be in [0, 1]",
                neuron_type
            )));
        }
        if self.types.values().sum::<f64>() > 1.0 + 1e-9 {
            return Err(SNNError::InvalidParameter(
                "The neuron type fractions must not sum above 1".to_string(),
            ));
        }
        if !(self.connectivity > 0.0 && self.connectivity.is_finite()) {
            return Err(SNNError::InvalidParameter(
                "The connectivity must be positive and finite".to_string(),
            ));
        }
        if !(self.strength > 0.0 && self.strength.is_finite()) {
            return Err(SNNError::InvalidParameter(
                "The link strength must be positive and finite".to_string(),
            ));
        }
        if !(self.thalamic >= 0.0 && self.thalamic.is_finite()) {
            return Err(SNNError::InvalidParameter(
                "The thalamic input deviation must be non-negative and finite".to_string(),
            ));
        }
        Ok(())
    }

    /// The column groups of the trajectory report: the configured types, or the fast spiking
    /// neurons created from `inhib` when no type is configured.
    pub fn report_groups(&self) -> Vec<(NeuronType, usize)> {
        if self.types.is_empty() {
            let num_inhibitory = (self.inhib * self.number as f64).round() as usize;
            vec![(NeuronType::FS, num_inhibitory)]
        } else {
            self.type_counts()
        }
    }

    /// The number of neurons of each configured type, rounded to the nearest integer.
    pub fn type_counts(&self) -> Vec<(NeuronType, usize)> {
        self.types
            .iter()
            .map(|(&neuron_type, &fraction)| {
                (neuron_type, (fraction * self.number as f64).round() as usize)
            })
            .collect()
    }
}

/// Parse a list of type fractions such as `FS:0.2,IB:0.1`.
pub fn parse_type_fractions(s: &str) -> Result<BTreeMap<NeuronType, f64>, SNNError> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (name, fraction) = item.split_once(':').ok_or_else(|| {
                SNNError::ParseError(format!("expected TYPE:FRACTION, found {}", item))
            })?;
            let neuron_type = NeuronType::from_str(name.trim())?;
            let fraction = fraction.trim().parse::<f64>().map_err(|e| {
                SNNError::ParseError(format!("invalid fraction for {}: {}", name, e))
            })?;
            Ok((neuron_type, fraction))
        })
        .collect()
}
