use std::collections::BTreeSet;
use std::io::{Read, Seek, SeekFrom};

use izhinet::config::{OutputMode, SimulationConfig};
use izhinet::network::{Coupling, Network, EXCITATORY_SYNAPTIC_SCALE, MIN_LINK_STRENGTH};
use izhinet::neuron::{NeuronType, FIRING_THRESHOLD};
use izhinet::random::RandomNumbers;
use izhinet::simulation::Simulation;

const SEED: u64 = 42;

fn random_network(num_neurons: usize, inhib: f64, coupling: Coupling) -> (Network, RandomNumbers) {
    let mut rng = RandomNumbers::new(SEED);
    let mut network = Network::with_coupling(coupling);
    network.resize(num_neurons, inhib, &mut rng);
    (network, rng)
}

#[test]
fn test_self_links_and_duplicates_never_stored() {
    let (mut network, mut rng) = random_network(30, 0.3, Coupling::Literal);
    network.random_connect(6.0, 2.0, &mut rng);
    let before = network.clone();

    for n in 0..30 {
        assert!(!network.add_link(n, n, 1.0));
        for (target, _) in before.neighbors(n) {
            assert!(!network.add_link(n, target, 1.0));
        }
    }
    assert_eq!(network, before);
}

#[test]
fn test_random_connect_degrees_and_order() {
    let (mut network, mut rng) = random_network(200, 0.2, Coupling::Literal);
    let mut degrees = vec![0; 200];
    rng.clone().poissons(&mut degrees, 8.0);

    let num_links = network.random_connect(8.0, 3.0, &mut rng);
    let mut total = 0;
    for n in 0..200 {
        let neighbors = network.neighbors(n);
        let (degree, valence) = network.degree(n);
        assert!(degree <= degrees[n]);
        assert_eq!(degree, neighbors.len());
        assert!((valence - neighbors.iter().map(|&(_, w)| w).sum::<f64>()).abs() < 1e-12);
        assert!(neighbors.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(neighbors.iter().all(|&(_, w)| w.abs() >= MIN_LINK_STRENGTH));
        total += degree;
    }
    assert_eq!(total, num_links);
}

#[test]
fn test_two_neuron_coupling_rules() {
    let strength = 3.0;

    for coupling in [Coupling::Literal, Coupling::Presynaptic] {
        let (mut network, _) = random_network(2, 0.0, coupling);
        assert!(network.add_link(0, 1, strength));
        network.set_values(&[FIRING_THRESHOLD + 10.0], 0);

        let firing = network.step(&[0.0, 0.0]);
        assert_eq!(firing, BTreeSet::from([0]));

        let input_0 = network.neuron(0).unwrap().current();
        let input_1 = network.neuron(1).unwrap().current();
        match coupling {
            // the link at position 0 of neuron 0 is kept because neuron 0 fired
            Coupling::Literal => {
                assert_eq!(input_0, EXCITATORY_SYNAPTIC_SCALE * strength);
                assert_eq!(input_1, 0.0);
            }
            Coupling::Presynaptic => {
                assert_eq!(input_0, 0.0);
                assert_eq!(input_1, EXCITATORY_SYNAPTIC_SCALE * strength);
            }
        }
    }
}

#[test]
fn test_firing_neurons_are_reset_by_step() {
    let (mut network, _) = random_network(5, 0.4, Coupling::Literal);
    let potentials = vec![FIRING_THRESHOLD + 1.0, -70.0, FIRING_THRESHOLD + 20.0, -65.0, 0.0];
    network.set_values(&potentials, 0);
    assert_eq!(network.potentials(), potentials);

    let firing = network.step(&[]);
    assert_eq!(firing, BTreeSet::from([0, 2]));
    assert!(firing
        .iter()
        .all(|&id| network.neuron(id).unwrap().potential() < FIRING_THRESHOLD));
}

#[test]
fn test_resize_counts() {
    let mut rng = RandomNumbers::new(SEED);
    let mut network = Network::new();
    network.resize(0, 0.5, &mut rng);
    assert_eq!(network.size(), 0);

    network.resize(10, 0.5, &mut rng);
    let inhibitory = network.neurons().iter().filter(|n| n.is_inhibitory()).count();
    assert_eq!(inhibitory, 5);
    assert!(network
        .neurons()
        .iter()
        .all(|n| NeuronType::ALL.contains(&n.neuron_type())));
}

#[test]
fn test_simulation_writes_outfile() {
    // 6 of the 30 neurons are fast spiking and get their own column group
    let config = SimulationConfig {
        number: 30,
        time: 20,
        seed: SEED,
        output: OutputMode::Summary,
        ..SimulationConfig::default()
    };
    let mut simulation = Simulation::new(config).unwrap();

    let mut file = tempfile::tempfile().unwrap();
    simulation.run(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    assert_eq!(text.lines().count(), 21);
    assert!(text.starts_with("\tFS.v\tFS.u\tFS.I\tRS.v\tRS.u\tRS.I\n0\t"));
}
