//! Tab-separated reports of the network state.
use itertools::Itertools;
use std::io::{self, Write};

use super::Network;
use crate::neuron::{Neuron, NeuronType};

impl Network {
    /// Write one row per neuron with its type, model constants, polarity, degree and valence.
    pub fn print_params<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Type\ta\tb\tc\td\tInhibitory\tdegree\tvalence")?;
        for (id, neuron) in self.neurons.iter().enumerate() {
            let (degree, valence) = self.degree(id);
            writeln!(out, "{}\t{}\t{}", neuron.formatted_params(), degree, valence)?;
        }
        Ok(())
    }

    /// Write the header of the trajectory report: three columns (potential, recovery, input)
    /// for every group of `types` present in the network, then for regular spiking neurons if
    /// `types` does not account for the whole network.
    pub fn print_head<W: Write>(&self, types: &[(NeuronType, usize)], out: &mut W) -> io::Result<()> {
        let columns: String = self
            .representatives(types)
            .map(|neuron| format!("\t{0}.v\t{0}.u\t{0}.I", neuron.neuron_type()))
            .collect();
        writeln!(out, "{}", columns)
    }

    /// Write the trajectory row of step `time`, with the values of the first neuron of each
    /// group listed in [`Network::print_head`].
    pub fn print_traj<W: Write>(
        &self,
        time: usize,
        types: &[(NeuronType, usize)],
        out: &mut W,
    ) -> io::Result<()> {
        let values = std::iter::once(time.to_string())
            .chain(self.representatives(types).map(Neuron::formatted_values));
        writeln!(out, "{}", values.format("\t"))
    }

    fn representatives<'a>(
        &'a self,
        types: &'a [(NeuronType, usize)],
    ) -> impl Iterator<Item = &'a Neuron> + 'a {
        let total: usize = types.iter().map(|&(_, count)| count).sum();
        let groups = types.iter().map(|&(neuron_type, _)| neuron_type);
        let groups: Vec<NeuronType> = if total < self.size() {
            groups.chain(std::iter::once(NeuronType::RS)).collect()
        } else {
            groups.collect()
        };

        groups.into_iter().filter_map(move |neuron_type| {
            self.neurons.iter().find(|neuron| neuron.is_type(neuron_type))
        })
    }
}
