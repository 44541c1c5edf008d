//! Mass-spring cloth simulation.
//!
//! `drape` simulates a rectangular grid of point masses joined by damped
//! structural springs. Each tick runs several fixed sub-steps of force
//! accumulation, semi-implicit Euler integration and sphere collision
//! response, then exposes the completed state to a renderer.
//!
//! # Features
//!
//! - **Structural springs**: vertical and horizontal spring-dampers with paired forces
//! - **Environment**: gravity, wind, optional per-triangle aerodynamic drag
//! - **Pinning**: top corners or the whole top row, toggled at runtime
//! - **Collisions**: any number of moving spheres with configurable skin and bounce
//! - **Renderer data**: triangle/link topology, texture coordinates, vertex normals
//! - **Observable**: monitor ticks via the `StepObserver` trait
//! - **`parallel`**: rayon-backed force and integration passes, bit-identical to serial
//! - **`no_std` compatible**: disable the default `std` feature

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod node;
pub mod grid;
pub mod force;
pub mod integrator;
pub mod collision;
pub mod mesh;
pub mod energy;
pub mod command;
pub mod controller;
pub mod observer;
pub mod config;
pub mod error;
mod par;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use node::Node;
pub use grid::{NodeGrid, Orientation, Lattice};
pub use force::{ForceAccumulator, SpringLaw};
pub use integrator::semi_implicit_euler;
pub use collision::{Obstacle, CollisionResponse, CollisionReport};
pub use mesh::ClothTopology;
pub use energy::Energy;
pub use command::Command;
pub use controller::{ClothSimulation, SimState, FrameReport, RenderFrame};
pub use config::{ClothConfig, Anchors, RenderMode};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
