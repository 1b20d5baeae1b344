#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vacuum_explorer::simulation::{
    params::DEFAULT_TICK_MS, Config, VacuumAgent, VacuumWorld,
};
use vacuum_explorer::ui::{
    field::{compute_map_grid, compute_world_grid},
    render::draw_ui,
    DashboardState,
};

#[derive(Parser, Debug)]
#[command(name = "vacuum_explorer")]
#[command(about = "Map-building vacuum agent on an unknown grid", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text layout for the world (`#` wall, `.` floor, `D` dirt)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// World width for random worlds
    #[arg(long)]
    width: Option<usize>,

    /// World height for random worlds
    #[arg(long)]
    height: Option<usize>,

    /// Seed for both world generation and the bootstrap walk
    #[arg(long)]
    seed: Option<u64>,

    /// Run without the terminal UI and print a summary
    #[arg(long)]
    headless: bool,

    /// Stop after this many actions even if the agent is not done
    #[arg(long, default_value_t = 20_000)]
    max_steps: u64,

    /// Milliseconds between simulation ticks in the terminal UI
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Log at debug level in headless mode
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(width) = cli.width {
        config.world.width = width;
    }
    if let Some(height) = cli.height {
        config.world.height = height;
    }
    if let Some(seed) = cli.seed {
        config.world.seed = Some(seed);
        config.agent.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

fn build_world(cli: &Cli, config: &Config) -> Result<VacuumWorld, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.layout {
        let text = std::fs::read_to_string(path)?;
        return Ok(VacuumWorld::from_layout(&text)?);
    }
    let mut rng = match config.world.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Ok(VacuumWorld::random(&config.world, &mut rng))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;
    let mut world = build_world(&cli, &config)?;

    // The agent's map must cover the world it is dropped into.
    config.agent.width = world.width;
    config.agent.height = world.height;

    if cli.headless {
        let level = if cli.verbose { "debug" } else { "info" };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| level.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();

        let mut agent = VacuumAgent::new(&config.agent)?;
        run_headless(&mut world, &mut agent, cli.max_steps);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let mut agent = VacuumAgent::new(&config.agent)?.with_log_sink(move |line| {
        // The receiver only goes away when the UI exits.
        let _ = tx.send(line.to_owned());
    });

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(cli.tick_ms);
    let res = run_app(&mut terminal, &mut world, &mut agent, &rx, tick_rate);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_headless(world: &mut VacuumWorld, agent: &mut VacuumAgent, max_steps: u64) {
    let stats = world.run(agent, max_steps);

    for line in compute_map_grid(agent.map(), agent.pose()) {
        println!("{line}");
    }
    println!();
    println!(
        "done: {} | steps: {} | cleaned: {} | bumps: {} | dirt left: {} | unknown tiles: {}",
        agent.is_done(),
        stats.steps,
        stats.cleaned,
        stats.bumps,
        world.dirt_remaining(),
        agent.map().unknown_count()
    );
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    world: &mut VacuumWorld,
    agent: &mut VacuumAgent,
    logs: &Receiver<String>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut dashboard = DashboardState::default();
    let mut last_tick = Instant::now();
    loop {
        // 1. Update
        if last_tick.elapsed() >= tick_rate {
            if !dashboard.paused && !agent.is_done() {
                world.step(agent);
            }
            for line in logs.try_iter() {
                dashboard.logs.push(line);
            }
            last_tick = Instant::now();
        }

        // 2. Render
        terminal.draw(|f| {
            let belief = compute_map_grid(agent.map(), agent.pose());
            let truth = compute_world_grid(world);
            let stats = world.stats();
            let pose = agent.pose();
            let hud = format!(
                "Pos: {} | Dir: {} | Mode: {:?} | Steps: {} | Cleaned: {} | Dirt left: {}{}",
                pose.position,
                pose.heading,
                agent.mode(),
                stats.steps,
                stats.cleaned,
                world.dirt_remaining(),
                if dashboard.paused { " | PAUSED" } else { "" }
            );
            draw_ui(f, belief, truth, &hud, &dashboard.logs);
        })?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('p') => dashboard.toggle_pause(),
                    _ => {}
                }
            }
        }
    }
}
