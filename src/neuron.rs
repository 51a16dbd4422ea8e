//! This module provides the Izhikevich `Neuron` which composes the `Network` structure.
//!
//! The membrane potential `v` and recovery variable `u` evolve as
//! ```text
//! dv/dt = 0.04 v² + 5 v + 140 - u + I
//! du/dt = a (b v - u)
//! if v > 30 mV: v <- c, u <- u + d
//! ```
//! with one call to [`Neuron::step`] advancing the state by one millisecond.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SNNError;

/// Membrane potential above which a neuron is firing (mV).
pub const FIRING_THRESHOLD: f64 = 30.0;
/// Membrane potential of a neuron at rest (mV).
pub const RESTING_POTENTIAL: f64 = -65.0;

/// Neuron types with a registered default parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NeuronType {
    /// Regular spiking, the default excitatory cortical neuron.
    RS,
    /// Intrinsically bursting.
    IB,
    /// Chattering.
    CH,
    /// Thalamo-cortical.
    TC,
    /// Resonator.
    RZ,
    /// Fast spiking inhibitory interneuron.
    FS,
    /// Low-threshold spiking inhibitory interneuron.
    LTS,
}

impl NeuronType {
    /// All registered types, excitatory ones first.
    pub const ALL: [NeuronType; 7] = [
        NeuronType::RS,
        NeuronType::IB,
        NeuronType::CH,
        NeuronType::TC,
        NeuronType::RZ,
        NeuronType::FS,
        NeuronType::LTS,
    ];

    /// The default parameter set of the type.
    pub fn params(self) -> NeuronParams {
        let (a, b, c, d, inhibitory) = match self {
            NeuronType::RS => (0.02, 0.2, -65.0, 8.0, false),
            NeuronType::IB => (0.02, 0.2, -55.0, 4.0, false),
            NeuronType::CH => (0.02, 0.2, -50.0, 2.0, false),
            NeuronType::TC => (0.02, 0.25, -65.0, 0.05, false),
            NeuronType::RZ => (0.1, 0.26, -65.0, 2.0, false),
            NeuronType::FS => (0.1, 0.2, -65.0, 2.0, true),
            NeuronType::LTS => (0.02, 0.25, -65.0, 2.0, true),
        };
        NeuronParams {
            a,
            b,
            c,
            d,
            inhibitory,
        }
    }

    /// Whether neurons of this type are inhibitory (FS and LTS).
    pub fn is_inhibitory(self) -> bool {
        self.params().inhibitory
    }

    /// The short name of the type, as used in reports and configuration.
    pub fn name(self) -> &'static str {
        match self {
            NeuronType::RS => "RS",
            NeuronType::IB => "IB",
            NeuronType::CH => "CH",
            NeuronType::TC => "TC",
            NeuronType::RZ => "RZ",
            NeuronType::FS => "FS",
            NeuronType::LTS => "LTS",
        }
    }
}

impl fmt::Display for NeuronType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NeuronType {
    type Err = SNNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NeuronType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| SNNError::UnknownNeuronType(s.to_string()))
    }
}

/// Izhikevich model constants of a neuron, plus its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronParams {
    /// Time scale of the recovery variable.
    pub a: f64,
    /// Sensitivity of the recovery variable to the membrane potential.
    pub b: f64,
    /// After-spike reset value of the membrane potential.
    pub c: f64,
    /// After-spike increment of the recovery variable.
    pub d: f64,
    /// Whether the neuron is inhibitory, which sets the sign of links towards it.
    pub inhibitory: bool,
}

impl Default for NeuronParams {
    fn default() -> Self {
        NeuronType::RS.params()
    }
}

/// Represents an Izhikevich spiking neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    neuron_type: NeuronType,
    params: NeuronParams,
    // membrane potential
    v: f64,
    // recovery variable
    u: f64,
    // input current applied at the next step
    current: f64,
}

impl Default for Neuron {
    fn default() -> Self {
        Neuron::new(NeuronType::RS)
    }
}

impl Neuron {
    /// Create a resting neuron with the unperturbed parameters of the given type.
    pub fn new(neuron_type: NeuronType) -> Self {
        let params = neuron_type.params();
        Neuron {
            neuron_type,
            params,
            v: RESTING_POTENTIAL,
            u: params.b * RESTING_POTENTIAL,
            current: 0.0,
        }
    }

    /// Set the type and its default parameters, perturbed by `noise` in `[0, 1)`, and put the
    /// neuron back at rest.
    /// Excitatory units get `c + 15 r²` and `d - 6 r²`, inhibitory ones `a + 0.08 r` and `b - 0.05 r`.
    pub fn set_default_params(&mut self, neuron_type: NeuronType, noise: f64) {
        let mut params = neuron_type.params();
        if params.inhibitory {
            params.a += 0.08 * noise;
            params.b -= 0.05 * noise;
        } else {
            params.c += 15.0 * noise * noise;
            params.d -= 6.0 * noise * noise;
        }

        self.neuron_type = neuron_type;
        self.params = params;
        self.v = RESTING_POTENTIAL;
        self.u = params.b * RESTING_POTENTIAL;
        self.current = 0.0;
    }

    /// Advance the dynamics by one millisecond, integrating `v` in two half steps.
    pub fn step(&mut self) {
        for _ in 0..2 {
            self.v += 0.5 * (0.04 * self.v * self.v + 5.0 * self.v + 140.0 - self.u + self.current);
        }
        self.u += self.params.a * (self.params.b * self.v - self.u);
    }

    /// Set the input current used by the next step.
    pub fn input(&mut self, current: f64) {
        self.current = current;
    }

    pub fn firing(&self) -> bool {
        self.v > FIRING_THRESHOLD
    }

    /// After-spike reset.
    pub fn reset(&mut self) {
        self.v = self.params.c;
        self.u += self.params.d;
    }

    pub fn potential(&self) -> f64 {
        self.v
    }

    pub fn set_potential(&mut self, v: f64) {
        self.v = v;
    }

    pub fn recovery(&self) -> f64 {
        self.u
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Whether the neuron is inhibitory.
    pub fn is_inhibitory(&self) -> bool {
        self.params.inhibitory
    }

    pub fn is_type(&self, neuron_type: NeuronType) -> bool {
        self.neuron_type == neuron_type
    }

    pub fn neuron_type(&self) -> NeuronType {
        self.neuron_type
    }

    pub fn set_type(&mut self, neuron_type: NeuronType) {
        self.neuron_type = neuron_type;
    }

    pub fn params(&self) -> &NeuronParams {
        &self.params
    }

    pub fn set_params(&mut self, params: NeuronParams) {
        self.params = params;
    }

    /// Tab-separated type, model constants and polarity (as 0/1).
    pub fn formatted_params(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.neuron_type,
            self.params.a,
            self.params.b,
            self.params.c,
            self.params.d,
            u8::from(self.params.inhibitory)
        )
    }

    /// Tab-separated potential, recovery and input current.
    pub fn formatted_values(&self) -> String {
        format!("{}\t{}\t{}", self.v, self.u, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_registry() {
        assert_eq!("FS".parse::<NeuronType>(), Ok(NeuronType::FS));
        assert_eq!("LTS".parse::<NeuronType>(), Ok(NeuronType::LTS));
        assert_eq!(
            "XX".parse::<NeuronType>(),
            Err(SNNError::UnknownNeuronType("XX".to_string()))
        );
        assert!(NeuronType::ALL
            .iter()
            .all(|t| t.name().parse::<NeuronType>() == Ok(*t)));

        let inhibitory: Vec<NeuronType> = NeuronType::ALL
            .into_iter()
            .filter(|t| t.is_inhibitory())
            .collect();
        assert_eq!(inhibitory, vec![NeuronType::FS, NeuronType::LTS]);
    }

    #[test]
    fn test_new_neuron_at_rest() {
        let neuron = Neuron::new(NeuronType::RS);
        assert_eq!(neuron.potential(), RESTING_POTENTIAL);
        assert_eq!(neuron.recovery(), 0.2 * RESTING_POTENTIAL);
        assert!(!neuron.firing());
        assert!(!neuron.is_inhibitory());
    }

    #[test]
    fn test_default_params_noise() {
        let mut neuron = Neuron::default();

        neuron.set_default_params(NeuronType::RS, 0.0);
        assert_eq!(*neuron.params(), NeuronType::RS.params());

        neuron.set_default_params(NeuronType::RS, 0.5);
        assert!((neuron.params().c - (-65.0 + 15.0 * 0.25)).abs() < 1e-12);
        assert!((neuron.params().d - (8.0 - 6.0 * 0.25)).abs() < 1e-12);

        neuron.set_default_params(NeuronType::FS, 0.5);
        assert!(neuron.is_type(NeuronType::FS));
        assert!(neuron.is_inhibitory());
        assert!((neuron.params().a - 0.14).abs() < 1e-12);
        assert!((neuron.params().b - 0.175).abs() < 1e-12);
        assert_eq!(neuron.params().c, -65.0);
    }

    #[test]
    fn test_fire_and_reset() {
        let mut neuron = Neuron::new(NeuronType::RS);
        neuron.set_potential(35.0);
        assert!(neuron.firing());

        let u = neuron.recovery();
        neuron.reset();
        assert!(!neuron.firing());
        assert_eq!(neuron.potential(), -65.0);
        assert_eq!(neuron.recovery(), u + 8.0);
    }

    #[test]
    fn test_sustained_input_makes_neuron_fire() {
        let mut neuron = Neuron::new(NeuronType::RS);
        neuron.input(10.0);
        let mut fired = false;
        for _ in 0..100 {
            if neuron.firing() {
                fired = true;
                neuron.reset();
            }
            neuron.step();
        }
        assert!(fired);
    }

    #[test]
    fn test_rest_is_stable_without_input() {
        let mut neuron = Neuron::new(NeuronType::RS);
        for _ in 0..1000 {
            neuron.step();
        }
        assert!(!neuron.firing());
        assert!(neuron.potential() < -60.0);
    }

    #[test]
    fn test_formatted_output() {
        let mut neuron = Neuron::new(NeuronType::FS);
        assert_eq!(neuron.formatted_params(), "FS\t0.1\t0.2\t-65\t2\t1");
        neuron.input(1.5);
        assert_eq!(neuron.formatted_values(), "-65\t-13\t1.5");
    }
}
