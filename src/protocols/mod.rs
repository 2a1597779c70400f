// src/protocols/mod.rs

//! Protocols built purely from session calls. They hold no state of their own.

pub mod teleportation;

pub use teleportation::{
    Basis, RandomMessageReport, measure_in_basis, prepare, teleport, teleport_classical_message,
    teleport_random_message,
};
