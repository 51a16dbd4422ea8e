//! Network (with neurons and links) structure and simulation step.
//!
//! Neurons are addressed by their index in the network. Links are directed, signed and weighted,
//! stored in a map ordered by `(source, target)` so the outgoing links of a neuron form one range.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::error::SNNError;
use crate::neuron::Neuron;

pub mod report;
pub mod topology;

/// Links whose strength is below this value are refused.
pub const MIN_LINK_STRENGTH: f64 = 1e-6;
/// Factor applied to the strength of a link whose target is inhibitory.
pub const INHIBITORY_TARGET_GAIN: f64 = -2.0;
/// Factor applied to the thalamic drive of inhibitory neurons.
pub const INHIBITORY_THALAMIC_SCALE: f64 = 0.4;
/// Factor applied to the accumulated excitatory synaptic input.
pub const EXCITATORY_SYNAPTIC_SCALE: f64 = 0.5;

/// How a neuron collects synaptic input from the neurons that fired during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coupling {
    /// Scan the outgoing links of the neuron and keep the `j`-th one when neuron `j` fired,
    /// where `j` is the position of the link in the outgoing list rather than its target id.
    /// Each kept weight goes to the inhibitory bucket if the link target is inhibitory.
    /// This is the default, so that earlier results of the model can be reproduced.
    #[default]
    Literal,
    /// Sum the links arriving at the neuron from neurons that fired. The sum is taken at full
    /// weight if the receiving neuron is inhibitory, halved otherwise.
    Presynaptic,
}

impl FromStr for Coupling {
    type Err = SNNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(Coupling::Literal),
            "presynaptic" => Ok(Coupling::Presynaptic),
            _ => Err(SNNError::ParseError(format!(
                "unknown coupling {}, expected literal or presynaptic",
                s
            ))),
        }
    }
}

/// A population of neurons and the directed links between them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network {
    neurons: Vec<Neuron>,
    links: BTreeMap<(usize, usize), f64>,
    coupling: Coupling,
}

impl Network {
    /// Create an empty network using the literal coupling rule.
    pub fn new() -> Self {
        Network::default()
    }

    /// Create an empty network using the given coupling rule.
    pub fn with_coupling(coupling: Coupling) -> Self {
        Network {
            coupling,
            ..Network::default()
        }
    }

    /// The number of neurons in the network.
    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    /// The number of links in the network.
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// The rule used to collect synaptic input during a step.
    pub fn coupling(&self) -> Coupling {
        self.coupling
    }

    /// Switch to another coupling rule, taking effect at the next step.
    pub fn set_coupling(&mut self, coupling: Coupling) {
        self.coupling = coupling;
    }

    /// All the neurons of the network, by index.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// A reference to a specific neuron in the network.
    /// Returns `None` if the neuron is not found.
    pub fn neuron(&self, id: usize) -> Option<&Neuron> {
        self.neurons.get(id)
    }

    /// A mutable reference to a specific neuron in the network.
    /// Returns `None` if the neuron is not found.
    pub fn neuron_mut(&mut self, id: usize) -> Option<&mut Neuron> {
        self.neurons.get_mut(id)
    }

    /// The stored strength of the link from `a` to `b`, if any.
    pub fn link(&self, a: usize, b: usize) -> Option<f64> {
        self.links.get(&(a, b)).copied()
    }

    /// Add a link from `a` to `b` and return whether it was added.
    ///
    /// The link is refused, leaving the network untouched, if it is a self-link, if either end is
    /// not in the network, if its strength is below [`MIN_LINK_STRENGTH`], or if the pair is
    /// already linked. A link towards an inhibitory neuron is stored with its strength multiplied
    /// by [`INHIBITORY_TARGET_GAIN`].
    pub fn add_link(&mut self, a: usize, b: usize, strength: f64) -> bool {
        if a == b || a >= self.size() || b >= self.size() || !(strength >= MIN_LINK_STRENGTH) {
            return false;
        }
        if self.links.contains_key(&(a, b)) {
            return false;
        }

        let strength = if self.neurons[b].is_inhibitory() {
            strength * INHIBITORY_TARGET_GAIN
        } else {
            strength
        };
        self.links.insert((a, b), strength);
        true
    }

    fn outgoing(&self, n: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.links
            .range((n, 0)..=(n, usize::MAX))
            .map(|(&(_, target), &strength)| (target, strength))
    }

    /// The `(target, strength)` pairs of all links leaving `n`, by increasing target.
    pub fn neighbors(&self, n: usize) -> Vec<(usize, f64)> {
        self.outgoing(n).collect()
    }

    /// The out-degree of `n` and the sum of its outgoing strengths (its valence).
    pub fn degree(&self, n: usize) -> (usize, f64) {
        self.outgoing(n)
            .fold((0, 0.0), |(count, total), (_, strength)| (count + 1, total + strength))
    }

    /// Snapshot of the membrane potentials, by neuron index.
    pub fn potentials(&self) -> Vec<f64> {
        self.neurons.iter().map(|neuron| neuron.potential()).collect()
    }

    /// Snapshot of the recovery variables, by neuron index.
    pub fn recoveries(&self) -> Vec<f64> {
        self.neurons.iter().map(|neuron| neuron.recovery()).collect()
    }

    /// Advance the network by one step and return the neurons that were firing when it started.
    ///
    /// Firing neurons are first collected and reset, so every neuron then reads the same frozen
    /// firing set while its input is computed. The input of neuron `i` is its thalamic drive
    /// (scaled by [`INHIBITORY_THALAMIC_SCALE`] for inhibitory neurons, zero if
    /// `thalamic_input` has no entry for `i`) plus its synaptic input under the network's
    /// [`Coupling`], excitatory contributions being scaled by [`EXCITATORY_SYNAPTIC_SCALE`].
    pub fn step(&mut self, thalamic_input: &[f64]) -> BTreeSet<usize> {
        let firing: BTreeSet<usize> = self
            .neurons
            .iter_mut()
            .enumerate()
            .filter_map(|(id, neuron)| {
                neuron.firing().then(|| {
                    neuron.reset();
                    id
                })
            })
            .collect();

        let synaptic = match self.coupling {
            Coupling::Literal => self.literal_synaptic_input(&firing),
            Coupling::Presynaptic => self.presynaptic_input(&firing),
        };

        for (id, (neuron, synaptic)) in self.neurons.iter_mut().zip(synaptic).enumerate() {
            let mut thalamic = thalamic_input.get(id).copied().unwrap_or(0.0);
            if neuron.is_inhibitory() {
                thalamic *= INHIBITORY_THALAMIC_SCALE;
            }
            neuron.input(thalamic + synaptic);
            neuron.step();
        }

        log::trace!("{} neurons fired", firing.len());
        firing
    }

    fn literal_synaptic_input(&self, firing: &BTreeSet<usize>) -> Vec<f64> {
        (0..self.size())
            .map(|id| {
                let (excitatory, inhibitory) = self
                    .outgoing(id)
                    .enumerate()
                    .filter(|(position, _)| firing.contains(position))
                    .fold((0.0, 0.0), |(exc, inh), (_, (target, strength))| {
                        if self.neurons[target].is_inhibitory() {
                            (exc, inh + strength)
                        } else {
                            (exc + strength, inh)
                        }
                    });
                EXCITATORY_SYNAPTIC_SCALE * excitatory + inhibitory
            })
            .collect()
    }

    fn presynaptic_input(&self, firing: &BTreeSet<usize>) -> Vec<f64> {
        let mut received = vec![0.0; self.size()];
        for &source in firing {
            for (target, strength) in self.outgoing(source) {
                received[target] += strength;
            }
        }

        received
            .into_iter()
            .zip(&self.neurons)
            .map(|(total, neuron)| {
                if neuron.is_inhibitory() {
                    total
                } else {
                    EXCITATORY_SYNAPTIC_SCALE * total
                }
            })
            .collect()
    }
}
