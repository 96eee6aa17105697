/*
 * Boid Flocking Simulation - Data Generation Driver
 *
 * This binary seeds randomized initial conditions, runs the simulation
 * core for a configured number of steps and instances, and writes the
 * resulting trajectories to a JSON file. Everything random lives here:
 * the core only ever sees fully constructed boids, goals and obstacles.
 */

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::Serialize;

use boids::{Boid, Environment2D, Goal, Obstacle, SimulationParams, Sphere, Vector};

#[derive(Parser)]
#[command(name = "boids")]
#[command(about = "Generate boid flocking trajectory data")]
struct Cli {
    /// Number of agents
    #[arg(long)]
    agents: Option<usize>,

    /// Number of simulation steps
    #[arg(long)]
    steps: Option<usize>,

    /// Number of simulation instances
    #[arg(long)]
    instances: Option<usize>,

    /// Time resolution
    #[arg(long)]
    dt: Option<f64>,

    /// Seed for initial-condition sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Base name of the output file
    #[arg(long, default_value = "boids")]
    save_name: String,

    /// Path to a JSON file with simulation parameters (CLI flags override it)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Per-instance trajectories. Each step records every entity in a fixed
/// order: goals first, then obstacle centers, then boids. Goal and
/// obstacle velocities are reported as zero since they never move.
#[derive(Serialize)]
struct TrajectoryData {
    position: Vec<Vec<Vec<[f64; 2]>>>,
    velocity: Vec<Vec<Vec<[f64; 2]>>>,
}

fn load_params(cli: &Cli) -> Result<SimulationParams> {
    let mut params = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => SimulationParams::default(),
    };

    if let Some(agents) = cli.agents {
        params.agents = agents;
    }
    if let Some(steps) = cli.steps {
        params.steps = steps;
    }
    if let Some(instances) = cli.instances {
        params.instances = instances;
    }
    if let Some(dt) = cli.dt {
        params.dt = dt;
    }
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    Ok(params)
}

// Sample a boid with a random position inside the arena and a random
// velocity direction at a random sub-maximal speed
fn random_boid(rng: &mut ChaCha12Rng, params: &SimulationParams) -> Boid<2> {
    let (xmin, xmax, ymin, ymax) = params.boundary;
    let position = Vector::<2>::new(rng.gen_range(xmin..xmax), rng.gen_range(ymin..ymax));

    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let speed = rng.gen_range(0.0..params.max_speed);
    let velocity = Vector::<2>::new(angle.cos(), angle.sin()) * speed;

    Boid::new(
        position,
        velocity,
        params.vision,
        params.comfort_zone,
        params.max_speed,
        params.max_acceleration,
    )
}

// Build a fresh arena: walled boundary, randomly placed goal, and a
// sphere obstacle within +/- 40 of the goal's position
fn build_environment(rng: &mut ChaCha12Rng, params: &SimulationParams) -> Environment2D {
    let mut environment = Environment2D::bounded(params.boundary);
    environment.weights = params.weights;
    environment.enable_parallel = params.enable_parallel;
    environment.enable_spatial_grid = params.enable_spatial_grid;

    for _ in 0..params.agents {
        environment.add_agent(random_boid(rng, params));
    }

    let goal = Goal::new(Vector::<2>::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
    ));
    environment.add_goal(goal);
    environment.add_obstacle(Obstacle::Sphere(Sphere::new(
        goal.position + Vector::<2>::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0)),
        3.0,
    )));

    environment
}

fn as_array(v: &Vector<2>) -> [f64; 2] {
    [v[0], v[1]]
}

// Record every entity's position and velocity for the current step
fn record_step(environment: &Environment2D, data: &mut TrajectoryData) {
    let mut positions = Vec::new();
    let mut velocities = Vec::new();

    for goal in &environment.goals {
        positions.push(as_array(&goal.position));
        velocities.push([0.0, 0.0]);
    }
    for obstacle in &environment.obstacles {
        if let Obstacle::Sphere(sphere) = obstacle {
            positions.push(as_array(&sphere.center));
            velocities.push([0.0, 0.0]);
        }
    }
    for boid in &environment.population {
        positions.push(as_array(&boid.position));
        velocities.push(as_array(&boid.velocity));
    }

    data.position.last_mut().unwrap().push(positions);
    data.velocity.last_mut().unwrap().push(velocities);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let params = load_params(&cli)?;
    let mut rng = ChaCha12Rng::seed_from_u64(params.seed);

    let mut data = TrajectoryData {
        position: Vec::with_capacity(params.instances),
        velocity: Vec::with_capacity(params.instances),
    };

    let mut prev_time = Instant::now();
    for instance in 0..params.instances {
        if instance % 100 == 0 {
            println!(
                "Simulation {}/{}... {:.1}s",
                instance,
                params.instances,
                prev_time.elapsed().as_secs_f64()
            );
            prev_time = Instant::now();
        }

        let mut environment = build_environment(&mut rng, &params);
        data.position.push(Vec::with_capacity(params.steps));
        data.velocity.push(Vec::with_capacity(params.steps));

        for _ in 0..params.steps {
            environment.update(params.dt);
            record_step(&environment, &mut data);
        }
    }
    println!("Simulations {0}/{0} completed.", params.instances);

    let out_path = format!("{}_trajectories.json", cli.save_name);
    let out_file =
        File::create(&out_path).with_context(|| format!("failed to create {out_path}"))?;
    serde_json::to_writer(out_file, &data).context("failed to write trajectory data")?;
    println!("Wrote {out_path}");

    Ok(())
}
