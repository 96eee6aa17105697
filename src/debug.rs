/*
 * Step Timings Module
 *
 * This module defines the StepTimings struct returned by every
 * environment update. It records how long each of the three phases took,
 * giving drivers wall-clock visibility into a step without pulling any
 * logging machinery into the core.
 */

#[derive(Clone, Copy, Debug, Default)]
pub struct StepTimings {
    pub observe_us: u64,
    pub decide_us: u64,
    pub move_us: u64,
    pub total_us: u64,
}
