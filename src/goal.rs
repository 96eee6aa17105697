/*
 * Goal Module
 *
 * A goal is a static attraction point. Boids steer toward the nearest
 * goal during their decide phase; goals never move once placed.
 */

use crate::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Goal<const N: usize> {
    pub position: Vector<N>,
}

impl<const N: usize> Goal<N> {
    pub fn new(position: Vector<N>) -> Self {
        Self { position }
    }
}
