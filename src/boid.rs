/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows five steering rules:
 * 1. Separation: Avoid crowding neighbors inside the comfort zone
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * 4. Goal-seeking: Steer towards the nearest goal
 * 5. Obstacle avoidance: Steer away from nearby walls and spheres
 *
 * A boid advances through three phases each step: observe (gather a
 * snapshot of its surroundings), decide (compose the steering rules into
 * an acceleration), and advance (integrate motion). Only the last phase
 * mutates the boid, which lets the environment run all observations
 * against a consistent pre-step snapshot.
 */

use crate::goal::Goal;
use crate::obstacle::Obstacle;
use crate::params::SteeringWeights;
use crate::spatial_grid::SpatialGrid;
use crate::vector::{normalize_or_zero, Vector};

#[derive(Clone, Debug, PartialEq)]
pub struct Boid<const N: usize> {
    pub position: Vector<N>,
    pub velocity: Vector<N>,
    pub acceleration: Vector<N>,
    /// Neighbor-sensing radius.
    pub vision: f64,
    /// Radius inside which neighbors trigger separation.
    pub comfort_zone: f64,
    pub max_speed: f64,
    pub max_acceleration: f64,
}

/// Everything a boid saw during its observe phase. Short-lived: built
/// against the pre-step snapshot, consumed by decide, then discarded.
#[derive(Clone, Debug, Default)]
pub struct Perception<const N: usize> {
    /// Positions and velocities of flockmates within the vision radius.
    pub neighbors: Vec<(Vector<N>, Vector<N>)>,
    /// Positions of neighbors inside the comfort zone.
    pub close_neighbors: Vec<Vector<N>>,
    /// Position of the nearest goal, if any goal exists.
    pub goal: Option<Vector<N>>,
    /// Repulsion contributions from obstacles within influence distance.
    pub obstacle_repulsions: Vec<Vector<N>>,
}

impl<const N: usize> Boid<N> {
    pub fn new(
        position: Vector<N>,
        velocity: Vector<N>,
        vision: f64,
        comfort_zone: f64,
        max_speed: f64,
        max_acceleration: f64,
    ) -> Self {
        assert!(vision >= 0.0, "vision radius must be non-negative");
        assert!(comfort_zone >= 0.0, "comfort zone must be non-negative");
        assert!(max_speed >= 0.0, "max speed must be non-negative");
        assert!(
            max_acceleration >= 0.0,
            "max acceleration must be non-negative"
        );
        Self {
            position,
            velocity,
            acceleration: Vector::zeros(),
            vision,
            comfort_zone,
            max_speed,
            max_acceleration,
        }
    }

    /// Observe phase: gather visible neighbors, the nearest goal, and
    /// nearby obstacle repulsions from the pre-step state. `index` is this
    /// boid's position in `population`, used to skip itself. When a grid
    /// is supplied only candidate cells are scanned; otherwise the whole
    /// population is.
    pub fn observe(
        &self,
        index: usize,
        population: &[Boid<N>],
        goals: &[Goal<N>],
        obstacles: &[Obstacle<N>],
        grid: Option<&SpatialGrid<N>>,
    ) -> Perception<N> {
        let mut perception = Perception::default();

        {
            let mut consider = |i: usize| {
                if i == index {
                    return;
                }
                let other = &population[i];
                let d = (other.position - self.position).norm();
                if d > 0.0 && d < self.vision {
                    perception.neighbors.push((other.position, other.velocity));
                    if d < self.comfort_zone {
                        perception.close_neighbors.push(other.position);
                    }
                }
            };

            match grid {
                Some(grid) => {
                    for i in grid.nearby_indices(&self.position) {
                        consider(i);
                    }
                }
                None => {
                    for i in 0..population.len() {
                        consider(i);
                    }
                }
            }
        }

        perception.goal = goals
            .iter()
            .map(|goal| goal.position)
            .min_by(|a, b| {
                let da = (a - self.position).norm();
                let db = (b - self.position).norm();
                da.total_cmp(&db)
            });

        perception.obstacle_repulsions = obstacles
            .iter()
            .filter(|obstacle| obstacle.within_influence(&self.position))
            .map(|obstacle| obstacle.repulsion(&self.position))
            .collect();

        perception
    }

    /// Decide phase: compose the weighted steering rules into a new
    /// acceleration, clamped to `max_acceleration`. Pure with respect to
    /// the boid; the result is applied later by `advance`.
    pub fn decide(&self, perception: &Perception<N>, weights: &SteeringWeights) -> Vector<N> {
        let combined = self.cohesion(perception) * weights.cohesion
            + self.alignment(perception) * weights.alignment
            + self.separation(perception) * weights.separation
            + self.seek_goal(perception) * weights.goal
            + self.avoid_obstacles(perception) * weights.obstacle;

        combined.cap_magnitude(self.max_acceleration)
    }

    /// Move phase: explicit Euler integration of the decided acceleration.
    /// The only phase that mutates position and velocity; the speed cap
    /// holds afterwards.
    pub fn advance(&mut self, acceleration: Vector<N>, dt: f64) {
        self.acceleration = acceleration;
        self.velocity += self.acceleration * dt;
        self.velocity = self.velocity.cap_magnitude(self.max_speed);
        self.position += self.velocity * dt;
    }

    // Steer towards the centroid of neighbor positions
    fn cohesion(&self, perception: &Perception<N>) -> Vector<N> {
        if perception.neighbors.is_empty() {
            return Vector::zeros();
        }

        let mut centroid = Vector::zeros();
        for (position, _) in &perception.neighbors {
            centroid += position;
        }
        centroid /= perception.neighbors.len() as f64;

        self.steer_towards(centroid - self.position)
    }

    // Steer towards the average heading of neighbors
    fn alignment(&self, perception: &Perception<N>) -> Vector<N> {
        if perception.neighbors.is_empty() {
            return Vector::zeros();
        }

        let mut average_velocity = Vector::zeros();
        for (_, velocity) in &perception.neighbors {
            average_velocity += velocity;
        }
        average_velocity /= perception.neighbors.len() as f64;

        self.steer_towards(average_velocity)
    }

    // Steer away from neighbors inside the comfort zone, weighting each
    // contribution by 1/distance so closer neighbors push harder
    fn separation(&self, perception: &Perception<N>) -> Vector<N> {
        if perception.close_neighbors.is_empty() {
            return Vector::zeros();
        }

        let mut steering = Vector::zeros();
        for position in &perception.close_neighbors {
            let diff = self.position - position;
            let d = diff.norm();
            steering += normalize_or_zero(diff) / d;
        }
        steering /= perception.close_neighbors.len() as f64;

        self.steer_towards(steering)
    }

    // Steer towards the nearest goal, if one was observed
    fn seek_goal(&self, perception: &Perception<N>) -> Vector<N> {
        match perception.goal {
            Some(goal) => self.steer_towards(goal - self.position),
            None => Vector::zeros(),
        }
    }

    // Sum every nearby obstacle's repulsion. Contributions are summed,
    // not averaged: overlapping influence regions all push at once.
    fn avoid_obstacles(&self, perception: &Perception<N>) -> Vector<N> {
        let mut total = Vector::zeros();
        for repulsion in &perception.obstacle_repulsions {
            total += repulsion;
        }
        total
    }

    // Reynolds steering: desired velocity along `direction` at max speed,
    // minus the current velocity, limited to the acceleration cap. A zero
    // direction yields zero steering rather than NaN.
    fn steer_towards(&self, direction: Vector<N>) -> Vector<N> {
        let desired = normalize_or_zero(direction) * self.max_speed;
        if desired == Vector::<N>::zeros() {
            return Vector::zeros();
        }
        (desired - self.velocity).cap_magnitude(self.max_acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid_at(x: f64, y: f64) -> Boid<2> {
        Boid::new(
            Vector::<2>::new(x, y),
            Vector::<2>::zeros(),
            10.0,
            0.5,
            1.0,
            0.25,
        )
    }

    #[test]
    fn isolated_boid_decides_zero_acceleration() {
        let boid = boid_at(0.0, 0.0);
        let perception = boid.observe(0, &[boid.clone()], &[], &[], None);
        assert!(perception.neighbors.is_empty());
        assert!(perception.goal.is_none());
        let acceleration = boid.decide(&perception, &SteeringWeights::default());
        assert_eq!(acceleration, Vector::<2>::zeros());
    }

    #[test]
    fn isolated_boid_keeps_constant_velocity() {
        let mut boid = boid_at(0.0, 0.0);
        boid.velocity = Vector::<2>::new(0.5, -0.25);
        let weights = SteeringWeights::default();
        for _ in 0..100 {
            let population = [boid.clone()];
            let perception = boid.observe(0, &population, &[], &[], None);
            let acceleration = boid.decide(&perception, &weights);
            boid.advance(acceleration, 0.1);
        }
        assert_eq!(boid.velocity, Vector::<2>::new(0.5, -0.25));
        assert!((boid.position - Vector::<2>::new(5.0, -2.5)).norm() < 1e-9);
    }

    #[test]
    fn cohesion_accelerates_towards_neighbor() {
        let weights = SteeringWeights {
            cohesion: 1.0,
            alignment: 0.0,
            separation: 0.0,
            goal: 0.0,
            obstacle: 0.0,
        };
        let population = [boid_at(0.0, 0.0), boid_at(1.0, 0.0)];

        let perception = population[0].observe(0, &population, &[], &[], None);
        let acceleration = population[0].decide(&perception, &weights);
        assert!(acceleration[0] > 0.0);

        let perception = population[1].observe(1, &population, &[], &[], None);
        let acceleration = population[1].decide(&perception, &weights);
        assert!(acceleration[0] < 0.0);
    }

    #[test]
    fn separation_pushes_away_from_close_neighbor() {
        let mut boid = boid_at(0.0, 0.0);
        boid.comfort_zone = 2.0;
        let other = boid_at(0.5, 0.0);
        let weights = SteeringWeights {
            cohesion: 0.0,
            alignment: 0.0,
            separation: 1.0,
            goal: 0.0,
            obstacle: 0.0,
        };
        let population = [boid.clone(), other];
        let perception = boid.observe(0, &population, &[], &[], None);
        assert_eq!(perception.close_neighbors.len(), 1);
        let acceleration = boid.decide(&perception, &weights);
        assert!(acceleration[0] < 0.0);
    }

    #[test]
    fn alignment_matches_neighbor_heading() {
        let mut other = boid_at(1.0, 0.0);
        other.velocity = Vector::<2>::new(0.0, 1.0);
        let boid = boid_at(0.0, 0.0);
        let weights = SteeringWeights {
            cohesion: 0.0,
            alignment: 1.0,
            separation: 0.0,
            goal: 0.0,
            obstacle: 0.0,
        };
        let population = [boid.clone(), other];
        let perception = boid.observe(0, &population, &[], &[], None);
        let acceleration = boid.decide(&perception, &weights);
        assert!(acceleration[1] > 0.0);
        assert_eq!(acceleration[0], 0.0);
    }

    #[test]
    fn observes_nearest_of_several_goals() {
        let boid = boid_at(0.0, 0.0);
        let goals = [
            crate::Goal::new(Vector::<2>::new(50.0, 0.0)),
            crate::Goal::new(Vector::<2>::new(-3.0, 0.0)),
            crate::Goal::new(Vector::<2>::new(0.0, 20.0)),
        ];
        let perception = boid.observe(0, &[boid.clone()], &goals, &[], None);
        assert_eq!(perception.goal, Some(Vector::<2>::new(-3.0, 0.0)));
    }

    #[test]
    fn goal_seeking_accelerates_towards_goal() {
        let boid = boid_at(0.0, 0.0);
        let goals = [crate::Goal::new(Vector::<2>::new(0.0, -7.0))];
        let weights = SteeringWeights {
            cohesion: 0.0,
            alignment: 0.0,
            separation: 0.0,
            goal: 1.0,
            obstacle: 0.0,
        };
        let perception = boid.observe(0, &[boid.clone()], &goals, &[], None);
        let acceleration = boid.decide(&perception, &weights);
        assert!(acceleration[1] < 0.0);
    }

    #[test]
    fn neighbors_outside_vision_are_invisible() {
        let boid = boid_at(0.0, 0.0);
        let far = boid_at(100.0, 0.0);
        let perception = boid.observe(0, &[boid.clone(), far], &[], &[], None);
        assert!(perception.neighbors.is_empty());
    }

    #[test]
    fn advance_enforces_caps() {
        let mut boid = boid_at(0.0, 0.0);
        let huge = Vector::<2>::new(1e6, 1e6);
        let acceleration = huge.cap_magnitude(boid.max_acceleration);
        for _ in 0..50 {
            boid.advance(acceleration, 1.0);
            assert!(boid.velocity.norm() <= boid.max_speed + 1e-9);
            assert!(boid.acceleration.norm() <= boid.max_acceleration + 1e-9);
        }
    }

    #[test]
    #[should_panic(expected = "vision radius must be non-negative")]
    fn rejects_negative_vision() {
        Boid::new(
            Vector::<2>::zeros(),
            Vector::<2>::zeros(),
            -1.0,
            0.5,
            1.0,
            1.0,
        );
    }
}
