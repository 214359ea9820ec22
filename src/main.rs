//! SimBot - headless household run
//!
//! Steps the simulation at a fixed frame rate for a number of sim-hours with
//! the reference task runner standing in for the movement layer, then prints
//! what each robot got done.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use simbot::core::config::SimulationConfig;
use simbot::core::error::{Result, SimError};
use simbot::core::types::AgentId;
use simbot::entity::agent::default_roster;
use simbot::entity::tasks::TaskSource;
use simbot::simulation::economy::BudgetSummary;
use simbot::simulation::runner::TaskRunner;
use simbot::simulation::tick::{run_simulation_tick, SimulationEvent};
use simbot::world::{FloorPlan, FurniturePlacement, World};

/// Headless SimBot run
#[derive(Parser, Debug)]
#[command(name = "simbot")]
#[command(about = "Run the household robots for a while and report what they did")]
struct Args {
    /// Random seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Sim-hours to run
    #[arg(long, default_value_t = 8.0)]
    hours: f64,

    /// Clock speed multiplier
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Frames per real second
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// TOML config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Furniture placement JSON replacing the default layout
    #[arg(long)]
    furniture: Option<PathBuf>,

    /// User command as `AGENT=TEXT`, e.g. `1=cook dinner`; may repeat
    #[arg(long = "command", short = 'c')]
    commands: Vec<String>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Also print every event as it happens
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct AgentReport {
    name: String,
    completed: u32,
    coins_earned: u32,
    battery: f32,
    mood: String,
    thought: String,
}

#[derive(Serialize)]
struct RoomReport {
    room: String,
    cleanliness: f32,
    tidiness: f32,
    routine: f32,
    condition: String,
}

#[derive(Serialize)]
struct RunReport {
    seed: u64,
    clock: String,
    day: u32,
    coins: i64,
    agents: Vec<AgentReport>,
    rooms: Vec<RoomReport>,
    budget: BudgetSummary,
}

fn parse_command(raw: &str) -> Result<(AgentId, String)> {
    let (agent, text) = raw
        .split_once('=')
        .ok_or_else(|| SimError::Config(format!("command '{}' is not AGENT=TEXT", raw)))?;
    let agent = agent
        .trim()
        .parse::<u32>()
        .map_err(|_| SimError::Config(format!("'{}' is not an agent index", agent)))?;
    Ok((AgentId(agent), text.trim().to_string()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("simbot=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let seed = config.seed;

    let furniture = match &args.furniture {
        Some(path) => FurniturePlacement::load(path)?,
        None => FurniturePlacement::household(),
    };
    let mut world = World::new(config, FloorPlan::household(), furniture, default_roster())?;
    world.clock.set_speed(args.speed);

    for raw in &args.commands {
        let (agent, text) = parse_command(raw)?;
        let task = world.submit_command(agent, &text, TaskSource::User)?;
        tracing::info!(agent = agent.0, %task, command = %text, "User command queued");
    }

    let mut runner = TaskRunner::new();
    let frame = 1.0 / args.fps.max(1) as f32;
    let end = world.now() + args.hours.max(0.0) * 60.0;

    let mut completed = vec![0u32; world.agents.len()];
    let mut earned = vec![0u32; world.agents.len()];

    if world.clock.is_paused() {
        tracing::warn!("Clock speed is zero, nothing will happen");
    } else {
        while world.now() < end {
            let before = world.now();
            let mut events = run_simulation_tick(&mut world, frame);
            let elapsed = world.now() - before;
            events.extend(runner.step(&mut world, elapsed));

            for event in &events {
                if let SimulationEvent::TaskCompleted { agent, reward, .. } = event {
                    let idx = agent.0 as usize;
                    completed[idx] += 1;
                    earned[idx] += reward;
                }
                if args.verbose {
                    println!("[{}] {:?}", world.clock.clock_text(), event);
                }
            }
        }
    }

    let report = RunReport {
        seed,
        clock: world.clock.clock_text(),
        day: world.clock.day(),
        coins: world.ledger.coins(),
        agents: world
            .agents
            .iter()
            .enumerate()
            .map(|(i, a)| AgentReport {
                name: a.name.clone(),
                completed: completed[i],
                coins_earned: earned[i],
                battery: a.battery,
                mood: format!("{:?}", a.mood),
                thought: a.thought.clone(),
            })
            .collect(),
        rooms: world
            .floor_plan
            .rooms()
            .iter()
            .filter_map(|room| {
                let state = world.room_needs.get(room.id)?;
                Some(RoomReport {
                    room: room.name.clone(),
                    cleanliness: state.cleanliness,
                    tidiness: state.tidiness,
                    routine: state.routine,
                    condition: state.condition().to_string(),
                })
            })
            .collect(),
        budget: world.ledger.summary(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== SIMBOT ===");
    println!("Seed {}  |  Day {} {}  |  {} coins", report.seed, report.day, report.clock, report.coins);
    println!();
    for agent in &report.agents {
        println!(
            "{:<8} {:>3} tasks  {:>4} coins  battery {:>5.1}%  {:<8} \"{}\"",
            agent.name, agent.completed, agent.coins_earned, agent.battery, agent.mood, agent.thought
        );
    }
    println!();
    for room in &report.rooms {
        println!(
            "{:<16} clean {:>5.1}  tidy {:>5.1}  routine {:>5.1}  {}",
            room.room, room.cleanliness, room.tidiness, room.routine, room.condition
        );
    }
    Ok(())
}
