//! This crate simulates networks of Izhikevich spiking neurons connected by a sparse, signed and
//! weighted directed graph.
//!
//! # Creating Networks
//!
//! ## From Scratch
//!
//! ```rust
//! use izhinet::network::Network;
//! use izhinet::random::RandomNumbers;
//!
//! let mut rng = RandomNumbers::new(42);
//!
//! // Grow an empty network to 4 neurons, half of them inhibitory
//! let mut network = Network::new();
//! network.resize(4, 0.5, &mut rng);
//!
//! // Add links to the network, self-links and duplicates are refused
//! assert!(network.add_link(0, 2, 1.0));
//! assert!(network.add_link(2, 3, 0.5));
//! assert!(!network.add_link(2, 2, 0.5));
//! assert!(!network.add_link(0, 2, 3.0));
//!
//! // Links towards inhibitory neurons (the first two here) are stored negated and doubled
//! assert!(network.add_link(3, 1, 0.25));
//! assert_eq!(network.neighbors(0), vec![(2, 1.0)]);
//! assert_eq!(network.neighbors(3), vec![(1, -0.5)]);
//! assert_eq!(network.degree(2), (1, 0.5));
//! assert!(network.neighbors(1).is_empty());
//! ```
//!
//! ## At Random
//!
//! ```rust
//! use izhinet::network::Network;
//! use izhinet::random::RandomNumbers;
//!
//! let mut rng = RandomNumbers::new(42);
//! let mut network = Network::new();
//! network.resize(100, 0.2, &mut rng);
//!
//! // Each neuron draws a Poisson out-degree of mean 10
//! let num_links = network.random_connect(10.0, 4.0, &mut rng);
//! assert_eq!(network.num_links(), num_links);
//! ```
//!
//! # Simulating Networks
//!
//! ```rust
//! use izhinet::network::Network;
//! use izhinet::random::RandomNumbers;
//!
//! let mut rng = RandomNumbers::new(42);
//! let mut network = Network::new();
//! network.resize(100, 0.2, &mut rng);
//! network.random_connect(10.0, 4.0, &mut rng);
//!
//! // Drive the network with noisy thalamic input and count the spikes
//! let mut thalamic = vec![0.0; network.size()];
//! let mut num_spikes = 0;
//! for _ in 0..100 {
//!     rng.normals(&mut thalamic, 0.0, 5.0);
//!     let firing = network.step(&thalamic);
//!     assert!(firing.iter().all(|&id| id < network.size()));
//!     num_spikes += firing.len();
//! }
//! assert!(num_spikes <= 100 * network.size());
//! ```

pub mod config;
pub mod error;
pub mod network;
pub mod neuron;
pub mod random;
pub mod simulation;
