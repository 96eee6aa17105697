/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the boid simulation core.
 * The core is a pure numeric state machine: it owns the population, goals
 * and obstacles, and advances them one time step at a time. Randomized
 * initial conditions, CLI parsing and trajectory output live in the
 * driver binary, not here.
 */

// Re-export key components for easier access
pub use boid::{Boid, Perception};
pub use debug::StepTimings;
pub use environment::{Environment, Environment2D, Environment3D};
pub use goal::Goal;
pub use obstacle::{Obstacle, Sphere, Wall};
pub use params::{SimulationParams, SteeringWeights};
pub use spatial_grid::SpatialGrid;
pub use vector::{normalize_or_zero, Vector};

// Define modules
pub mod boid;
pub mod debug;
pub mod environment;
pub mod goal;
pub mod obstacle;
pub mod params;
pub mod spatial_grid;
pub mod vector;

// Constants

/// Distance beyond which an obstacle contributes no repulsion, unless a
/// different influence distance is configured on the obstacle itself.
pub const DEFAULT_INFLUENCE_DISTANCE: f64 = 10.0;

/// Upper bound on the magnitude of a single obstacle's repulsion. The
/// magnitude grows as 1/distance, so this cap keeps contributions finite
/// when an agent touches or penetrates an obstacle surface.
pub const MAX_REPULSION: f64 = 100.0;
