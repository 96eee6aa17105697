/*
 * Simulation Parameters Module
 *
 * This module defines the tunable configuration for the simulation: the
 * per-rule steering weights used by every boid's decide phase, and the
 * run-level parameters consumed by the driver binary. Both are plain
 * serde-friendly structs so runs can be configured from a JSON file.
 */

use serde::{Deserialize, Serialize};

/// Weights applied to each steering rule when composing a boid's
/// acceleration. All weights are configuration, not hardwired ratios.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringWeights {
    pub cohesion: f64,
    pub alignment: f64,
    pub separation: f64,
    pub goal: f64,
    pub obstacle: f64,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            cohesion: 1.0,
            alignment: 1.0,
            separation: 1.5,
            goal: 1.0,
            obstacle: 1.0,
        }
    }
}

/// Run-level parameters for the data-generation driver. The core never
/// reads these; it only sees fully constructed boids and environments.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Number of agents in the population.
    pub agents: usize,
    /// Number of update steps per simulation instance.
    pub steps: usize,
    /// Number of independent simulation instances to run.
    pub instances: usize,
    /// Time resolution of a single update step.
    pub dt: f64,
    /// Seed for the driver's random initial conditions.
    pub seed: u64,
    /// Rectangular arena (xmin, xmax, ymin, ymax); seeds four bounding walls.
    pub boundary: (f64, f64, f64, f64),
    /// Neighbor-sensing radius given to every boid.
    pub vision: f64,
    /// Separation radius given to every boid.
    pub comfort_zone: f64,
    /// Speed cap given to every boid.
    pub max_speed: f64,
    /// Acceleration cap given to every boid.
    pub max_acceleration: f64,
    pub weights: SteeringWeights,
    // Performance settings
    pub enable_parallel: bool,
    pub enable_spatial_grid: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            agents: 100,
            steps: 1000,
            instances: 1,
            dt: 0.1,
            seed: 0,
            boundary: (-100.0, 100.0, -100.0, 100.0),
            vision: 15.0,
            comfort_zone: 3.0,
            max_speed: 15.0,
            max_acceleration: 10.0,
            weights: SteeringWeights::default(),
            enable_parallel: true,
            enable_spatial_grid: true,
        }
    }
}
