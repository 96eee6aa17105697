/*
 * Environment Module
 *
 * This module defines the Environment struct that owns the population of
 * boids, the goals, and the obstacles, and advances the whole system one
 * time step at a time.
 *
 * An update runs three strict passes over the population: every boid
 * observes the pre-step state, then every boid decides its acceleration,
 * then every boid moves. No boid's decision can see a sibling's motion
 * from the same step, so the outcome does not depend on population order.
 * The observe and decide passes are pure reads of the frozen snapshot and
 * may run in parallel; the pass boundaries stay synchronized because each
 * pass materializes its results before the next begins.
 */

use std::time::Instant;

use rayon::prelude::*;

use crate::boid::{Boid, Perception};
use crate::debug::StepTimings;
use crate::goal::Goal;
use crate::obstacle::{Obstacle, Wall};
use crate::params::SteeringWeights;
use crate::spatial_grid::SpatialGrid;
use crate::vector::Vector;

pub struct Environment<const N: usize> {
    pub population: Vec<Boid<N>>,
    pub goals: Vec<Goal<N>>,
    pub obstacles: Vec<Obstacle<N>>,
    pub weights: SteeringWeights,
    // Performance settings
    pub enable_parallel: bool,
    pub enable_spatial_grid: bool,
}

pub type Environment2D = Environment<2>;
pub type Environment3D = Environment<3>;

impl<const N: usize> Default for Environment<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Environment<N> {
    /// An empty environment with default steering weights.
    pub fn new() -> Self {
        Self {
            population: Vec::new(),
            goals: Vec::new(),
            obstacles: Vec::new(),
            weights: SteeringWeights::default(),
            enable_parallel: true,
            enable_spatial_grid: true,
        }
    }

    pub fn add_agent(&mut self, boid: Boid<N>) {
        self.population.push(boid);
    }

    pub fn add_goal(&mut self, goal: Goal<N>) {
        self.goals.push(goal);
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle<N>) {
        self.obstacles.push(obstacle);
    }

    /// Advance the whole system by one time step of length `dt`.
    pub fn update(&mut self, dt: f64) -> StepTimings {
        let step_start = Instant::now();

        let grid = self.build_grid();
        let grid = grid.as_ref();
        let population = &self.population;
        let goals = &self.goals;
        let obstacles = &self.obstacles;

        // Phase 1: every boid observes the pre-step snapshot
        let observe_start = Instant::now();
        let perceptions: Vec<Perception<N>> = if self.enable_parallel {
            population
                .par_iter()
                .enumerate()
                .map(|(i, boid)| boid.observe(i, population, goals, obstacles, grid))
                .collect()
        } else {
            population
                .iter()
                .enumerate()
                .map(|(i, boid)| boid.observe(i, population, goals, obstacles, grid))
                .collect()
        };
        let observe_us = observe_start.elapsed().as_micros() as u64;

        // Phase 2: every boid decides its acceleration
        let decide_start = Instant::now();
        let weights = &self.weights;
        let accelerations: Vec<Vector<N>> = if self.enable_parallel {
            population
                .par_iter()
                .zip(perceptions.par_iter())
                .map(|(boid, perception)| boid.decide(perception, weights))
                .collect()
        } else {
            population
                .iter()
                .zip(perceptions.iter())
                .map(|(boid, perception)| boid.decide(perception, weights))
                .collect()
        };
        let decide_us = decide_start.elapsed().as_micros() as u64;

        // Phase 3: every boid moves
        let move_start = Instant::now();
        for (boid, acceleration) in self.population.iter_mut().zip(accelerations) {
            boid.advance(acceleration, dt);
        }
        let move_us = move_start.elapsed().as_micros() as u64;

        StepTimings {
            observe_us,
            decide_us,
            move_us,
            total_us: step_start.elapsed().as_micros() as u64,
        }
    }

    // Build a spatial grid sized by the largest vision radius. Skipped
    // when disabled or when no boid can see anything, in which case
    // observation falls back to a full population scan.
    fn build_grid(&self) -> Option<SpatialGrid<N>> {
        if !self.enable_spatial_grid {
            return None;
        }
        let max_vision = self
            .population
            .iter()
            .map(|boid| boid.vision)
            .fold(0.0, f64::max);
        if max_vision <= 0.0 {
            return None;
        }

        let mut grid = SpatialGrid::new(max_vision);
        for (i, boid) in self.population.iter().enumerate() {
            grid.insert(i, &boid.position);
        }
        Some(grid)
    }
}

impl Environment2D {
    /// A rectangular arena `(xmin, xmax, ymin, ymax)` fenced by four
    /// inward-facing walls.
    pub fn bounded(boundary: (f64, f64, f64, f64)) -> Self {
        let (xmin, xmax, ymin, ymax) = boundary;
        assert!(xmin < xmax, "boundary must satisfy xmin < xmax");
        assert!(ymin < ymax, "boundary must satisfy ymin < ymax");

        let mut environment = Self::new();
        environment.add_obstacle(Obstacle::Wall(Wall::new(
            Vector::<2>::new(xmin, 0.0),
            Vector::<2>::new(1.0, 0.0),
        )));
        environment.add_obstacle(Obstacle::Wall(Wall::new(
            Vector::<2>::new(xmax, 0.0),
            Vector::<2>::new(-1.0, 0.0),
        )));
        environment.add_obstacle(Obstacle::Wall(Wall::new(
            Vector::<2>::new(0.0, ymin),
            Vector::<2>::new(0.0, 1.0),
        )));
        environment.add_obstacle(Obstacle::Wall(Wall::new(
            Vector::<2>::new(0.0, ymax),
            Vector::<2>::new(0.0, -1.0),
        )));
        environment
    }
}
