/*
 * Obstacle Module
 *
 * This module defines the obstacle shapes boids steer away from:
 * - Wall: an infinite plane given by an anchor point and a unit normal.
 * - Sphere: a solid sphere (circle in 2D) given by a center and radius.
 *
 * Each obstacle contributes a repulsion force pointing away from its
 * surface. The magnitude is 1/distance, capped at MAX_REPULSION so an
 * agent touching the surface sees a large but finite push, and exactly
 * zero once the agent is farther away than the obstacle's influence
 * distance (a per-obstacle field, DEFAULT_INFLUENCE_DISTANCE unless
 * configured otherwise).
 */

use crate::vector::{normalize_or_zero, Vector};
use crate::{DEFAULT_INFLUENCE_DISTANCE, MAX_REPULSION};

/// An infinite planar boundary. The normal points into the allowed
/// half-space; repulsion is maximal for agents on or behind the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall<const N: usize> {
    pub anchor: Vector<N>,
    pub normal: Vector<N>,
    pub influence: f64,
}

impl<const N: usize> Wall<N> {
    pub fn new(anchor: Vector<N>, normal: Vector<N>) -> Self {
        assert!(
            normal.norm() > 0.0,
            "wall normal must have nonzero length"
        );
        Self {
            anchor,
            normal: normal.normalize(),
            influence: DEFAULT_INFLUENCE_DISTANCE,
        }
    }

    pub fn with_influence(mut self, influence: f64) -> Self {
        assert!(influence > 0.0, "influence distance must be positive");
        self.influence = influence;
        self
    }

    // Signed distance: positive in front of the plane, negative behind it.
    fn distance(&self, position: &Vector<N>) -> f64 {
        (position - self.anchor).dot(&self.normal)
    }
}

/// A solid spherical obstacle (a circle in 2D).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere<const N: usize> {
    pub center: Vector<N>,
    pub radius: f64,
    pub influence: f64,
}

impl<const N: usize> Sphere<N> {
    pub fn new(center: Vector<N>, radius: f64) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            center,
            radius,
            influence: DEFAULT_INFLUENCE_DISTANCE,
        }
    }

    pub fn with_influence(mut self, influence: f64) -> Self {
        assert!(influence > 0.0, "influence distance must be positive");
        self.influence = influence;
        self
    }

    // Distance from the sphere surface; negative inside the sphere.
    fn distance(&self, position: &Vector<N>) -> f64 {
        (position - self.center).norm() - self.radius
    }
}

/// The closed set of obstacle kinds. Obstacles are immutable for the run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Obstacle<const N: usize> {
    Wall(Wall<N>),
    Sphere(Sphere<N>),
}

impl<const N: usize> Obstacle<N> {
    /// Distance from the agent to the obstacle surface. Negative means
    /// the agent has penetrated the surface.
    pub fn distance(&self, position: &Vector<N>) -> f64 {
        match self {
            Obstacle::Wall(wall) => wall.distance(position),
            Obstacle::Sphere(sphere) => sphere.distance(position),
        }
    }

    /// Whether the agent is close enough for this obstacle to matter.
    pub fn within_influence(&self, position: &Vector<N>) -> bool {
        let influence = match self {
            Obstacle::Wall(wall) => wall.influence,
            Obstacle::Sphere(sphere) => sphere.influence,
        };
        self.distance(position) <= influence
    }

    /// Repulsion force on an agent at `position`: direction away from the
    /// obstacle, magnitude 1/distance capped at MAX_REPULSION, zero beyond
    /// the influence distance.
    pub fn repulsion(&self, position: &Vector<N>) -> Vector<N> {
        if !self.within_influence(position) {
            return Vector::zeros();
        }

        let distance = self.distance(position);
        let magnitude = if distance <= 1.0 / MAX_REPULSION {
            // On, behind, or nearly touching the surface
            MAX_REPULSION
        } else {
            1.0 / distance
        };

        let direction = match self {
            Obstacle::Wall(wall) => wall.normal,
            Obstacle::Sphere(sphere) => normalize_or_zero(position - sphere.center),
        };

        direction * magnitude
    }
}
