//! Growing the neuron population, assigning parameters and sampling random link sets.
use std::str::FromStr;

use super::{Network, MIN_LINK_STRENGTH};
use crate::neuron::{Neuron, NeuronParams, NeuronType};
use crate::random::RandomNumbers;

impl Network {
    /// Grow the network to `n` neurons. Does nothing if the network already has `n` neurons or more.
    ///
    /// Among the added neurons, `round(inhib * added)` become fast spiking (inhibitory) and
    /// the others regular spiking, each with its own noisy default parameters.
    pub fn resize(&mut self, n: usize, inhib: f64, rng: &mut RandomNumbers) {
        let old = self.size();
        if n <= old {
            return;
        }

        self.neurons.resize_with(n, Neuron::default);
        let num_inhibitory = (inhib * (n - old) as f64).round() as usize;
        self.set_default_params(&[(NeuronType::FS, num_inhibitory)], old, rng);
    }

    /// Assign default parameters to the neurons from `start` on: the first `count` neurons get
    /// the type of the first entry, the next ones the type of the second entry, and so on.
    /// Neurons left over once the entries are exhausted become regular spiking.
    /// Each neuron draws one uniform noise sample in `[0, 1)`.
    pub fn set_default_params(
        &mut self,
        types: &[(NeuronType, usize)],
        start: usize,
        rng: &mut RandomNumbers,
    ) {
        let mut noise = vec![0.0; self.size().saturating_sub(start)];
        rng.uniform_doubles(&mut noise, 0.0, 1.0);

        let assigned = types
            .iter()
            .flat_map(|&(neuron_type, count)| std::iter::repeat(neuron_type).take(count))
            .chain(std::iter::repeat(NeuronType::RS));

        for ((neuron, noise), neuron_type) in
            self.neurons.iter_mut().skip(start).zip(noise).zip(assigned)
        {
            neuron.set_default_params(neuron_type, noise);
        }
    }

    /// Same as [`Network::set_default_params`], with types given by name.
    ///
    /// Entries with an unknown name are skipped without taking any neuron: the neurons they
    /// would have covered go to the next entries, or default to regular spiking. Their count is
    /// therefore not consumed, unlike a reading where an unknown entry keeps its neurons unset.
    /// Returns the names that were skipped, each also logged as a warning.
    ///
    /// ```rust
    /// use izhinet::network::Network;
    /// use izhinet::neuron::NeuronType;
    /// use izhinet::random::RandomNumbers;
    ///
    /// let mut rng = RandomNumbers::new(42);
    /// let mut network = Network::new();
    /// network.resize(3, 0.0, &mut rng);
    ///
    /// let skipped = network.set_default_params_by_name(&[("XX", 1), ("IB", 1)], 0, &mut rng);
    /// assert_eq!(skipped, vec!["XX".to_string()]);
    /// assert!(network.neuron(0).unwrap().is_type(NeuronType::IB));
    /// assert!(network.neuron(1).unwrap().is_type(NeuronType::RS));
    /// ```
    pub fn set_default_params_by_name<S: AsRef<str>>(
        &mut self,
        types: &[(S, usize)],
        start: usize,
        rng: &mut RandomNumbers,
    ) -> Vec<String> {
        let mut known = Vec::with_capacity(types.len());
        let mut unknown = Vec::new();
        for (name, count) in types {
            match NeuronType::from_str(name.as_ref()) {
                Ok(neuron_type) => known.push((neuron_type, *count)),
                Err(e) => {
                    log::warn!("{}, skipping {} neurons of that type", e, count);
                    unknown.push(name.as_ref().to_string());
                }
            }
        }

        self.set_default_params(&known, start, rng);
        unknown
    }

    /// Set explicit types and parameters for the neurons from `start` on.
    /// `types` and `params` are expected to have the same length; extra entries are ignored.
    pub fn set_types_params(&mut self, types: &[NeuronType], params: &[NeuronParams], start: usize) {
        for (neuron, (neuron_type, params)) in self
            .neurons
            .iter_mut()
            .skip(start)
            .zip(types.iter().zip(params))
        {
            neuron.set_type(*neuron_type);
            neuron.set_params(*params);
        }
    }

    /// Set the membrane potentials of the neurons from `start` on.
    pub fn set_values(&mut self, potentials: &[f64], start: usize) {
        for (neuron, &v) in self.neurons.iter_mut().skip(start).zip(potentials) {
            neuron.set_potential(v);
        }
    }

    /// Replace all links by a random link set and return the number of links created.
    ///
    /// Each neuron draws a Poisson out-degree of mean `mean_degree`, capped at the number of other
    /// neurons. Then, neuron by neuron,
    /// the candidate targets are reshuffled, that many strengths are drawn uniformly in
    /// `[MIN_LINK_STRENGTH, 2 * mean_strength)`, and candidates are tried in order, a strength
    /// being used up only by a successful link, until the degree is reached or candidates run out.
    pub fn random_connect(
        &mut self,
        mean_degree: f64,
        mean_strength: f64,
        rng: &mut RandomNumbers,
    ) -> usize {
        self.links.clear();

        let mut degrees = vec![0; self.size()];
        rng.poissons(&mut degrees, mean_degree);

        let max_degree = self.size().saturating_sub(1);
        let mut candidates: Vec<usize> = (0..self.size()).collect();
        let mut num_links = 0;
        for (node, &degree) in degrees.iter().enumerate() {
            let degree = degree.min(max_degree);
            rng.shuffle(&mut candidates);
            let mut strengths = vec![0.0; degree];
            rng.uniform_doubles(&mut strengths, MIN_LINK_STRENGTH, 2.0 * mean_strength);

            let mut added = 0;
            for &candidate in candidates.iter() {
                if added == degree {
                    break;
                }
                if self.add_link(node, candidate, strengths[added]) {
                    added += 1;
                }
            }
            num_links += added;
        }

        log::debug!(
            "Random topology with {} links over {} neurons (mean degree {})",
            num_links,
            self.size(),
            mean_degree
        );
        num_links
    }
}
