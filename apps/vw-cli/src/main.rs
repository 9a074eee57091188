use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use vw_app::{
    AppResult, ConfiguredSource, DashboardSession, DashboardView, ExportKind, SimProgressEvent,
    TaskRunOptions, config_service, export_service, query, task_service,
};
use vw_tasks::{MAX_TIME_SCALE, TaskProgressEvent, TaskStage};

#[derive(Parser)]
#[command(name = "vw-cli")]
#[command(about = "VoltWatch CLI - Battery cell telemetry dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate config file syntax and bounds
    Validate {
        /// Path to the dashboard config (YAML or JSON)
        config_path: PathBuf,
    },
    /// Write a default config file
    Init {
        /// Where to write the config
        path: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Run a simulation and summarize or export the history
    Simulate {
        /// Path to the dashboard config
        config_path: PathBuf,
        /// Number of ticks (defaults to the config's simulation.ticks)
        #[arg(long)]
        ticks: Option<usize>,
        /// RNG seed (defaults to the config's simulation.seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// One CSV row per cell instead of per-tick means
        #[arg(long)]
        per_cell: bool,
    },
    /// Refresh the dashboard tick by tick, printing averages and alerts
    Monitor {
        /// Path to the dashboard config
        config_path: PathBuf,
        /// Stop after this many refreshes
        #[arg(long, default_value_t = 10)]
        ticks: usize,
        /// Refresh on the configured interval instead of on Enter
        #[arg(long)]
        auto_refresh: bool,
    },
    /// Run the configured task sequence
    Tasks {
        /// Path to the dashboard config
        config_path: PathBuf,
        /// Wait out each task's duration
        #[arg(long)]
        realtime: bool,
        /// Compress real-time waits (1.0 = real time, capped at 100)
        #[arg(long, default_value_t = 1.0)]
        time_scale: f64,
        /// Output CSV file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate and print one cell's metric over time
    Series {
        /// Path to the dashboard config
        config_path: PathBuf,
        /// 1-based cell number
        #[arg(long)]
        cell: u32,
        /// voltage, current, temperature or capacity
        #[arg(long)]
        metric: String,
        /// Number of ticks (defaults to the config's simulation.ticks)
        #[arg(long)]
        ticks: Option<usize>,
        /// RNG seed (defaults to the config's simulation.seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Simulate {
            config_path,
            ticks,
            seed,
            output,
            per_cell,
        } => cmd_simulate(&config_path, ticks, seed, output.as_deref(), per_cell),
        Commands::Monitor {
            config_path,
            ticks,
            auto_refresh,
        } => cmd_monitor(&config_path, ticks, auto_refresh),
        Commands::Tasks {
            config_path,
            realtime,
            time_scale,
            output,
        } => cmd_tasks(&config_path, realtime, time_scale, output.as_deref()),
        Commands::Series {
            config_path,
            cell,
            metric,
            ticks,
            seed,
            output,
        } => cmd_series(&config_path, cell, &metric, ticks, seed, output.as_deref()),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = config_service::load_config(config_path)?;
    config_service::validate_config(&config)?;
    let summary = config_service::summarize_config(&config);
    println!("✓ Config is valid");
    println!(
        "  {} (v{}): {} cells ({} manual), {} tasks, history {}",
        summary.name,
        summary.version,
        summary.cell_count,
        summary.manual_cells,
        summary.task_count,
        summary.max_history
    );
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> AppResult<()> {
    config_service::init_config(path, force)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_simulate(
    config_path: &Path,
    ticks: Option<usize>,
    seed: Option<u64>,
    output: Option<&Path>,
    per_cell: bool,
) -> AppResult<()> {
    let config = config_service::load_config(config_path)?;
    let mut session = DashboardSession::new(config)?;

    let mut last_emit = Instant::now();
    let produced = session.simulate(
        ticks,
        seed,
        Some(&mut |event: SimProgressEvent| {
            if last_emit.elapsed() >= Duration::from_millis(100) || event.tick == event.total {
                render_sim_progress(&event);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    println!("✓ Simulation completed: {} ticks", produced);
    let view = session.view();
    print_view(&view);

    if let Ok(summary) = query::get_history_summary(view.history) {
        println!(
            "  History: {} of {} samples, {} - {}",
            summary.sample_count,
            summary.max_history,
            summary.time_range.0.format("%H:%M:%S"),
            summary.time_range.1.format("%H:%M:%S")
        );
    }

    if let Some(path) = output {
        let kind = if per_cell {
            ExportKind::PerCell
        } else {
            ExportKind::Means
        };
        export_service::export_history(path, session.history(), kind)?;
        println!("✓ Exported history to {}", path.display());
    }
    Ok(())
}

fn cmd_monitor(config_path: &Path, ticks: usize, auto_refresh: bool) -> AppResult<()> {
    let config = config_service::load_config(config_path)?;
    let seed = config.simulation.seed;
    let auto_refresh = auto_refresh || config.refresh.auto_refresh;
    let mut source = ConfiguredSource::from_config(&config, seed);
    let mut session = DashboardSession::new(config)?;

    if auto_refresh {
        let started = Instant::now();
        session.set_auto_refresh(true, 0.0);
        let mut refreshed = 0;
        while refreshed < ticks {
            let now_s = started.elapsed().as_secs_f64();
            if session.poll_refresh(now_s, &mut source)? {
                refreshed += 1;
                println!("--- refresh {} ---", refreshed);
                print_view(&session.view());
            } else if let Some(wait_s) = session.time_until_refresh(now_s) {
                std::thread::sleep(Duration::from_secs_f64(wait_s));
            }
        }
    } else {
        println!("Press Enter to refresh, q to quit");
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        for refreshed in 1..=ticks {
            match lines.next() {
                Some(Ok(line)) if line.trim().eq_ignore_ascii_case("q") => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
            session.update_from(&mut source)?;
            println!("--- refresh {} ---", refreshed);
            print_view(&session.view());
        }
    }
    Ok(())
}

fn cmd_tasks(
    config_path: &Path,
    realtime: bool,
    time_scale: f64,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = config_service::load_config(config_path)?;
    if realtime && time_scale > MAX_TIME_SCALE {
        tracing::warn!(time_scale, max = MAX_TIME_SCALE, "time scale capped");
    }
    let options = TaskRunOptions {
        realtime,
        time_scale,
    };

    println!("Running {} tasks", config.tasks.len());
    let log = task_service::run_tasks(
        &config,
        options,
        Some(&mut |event: TaskProgressEvent| render_task_progress(&event)),
    )?;
    clear_progress_line();

    println!("✓ Task sequence complete");
    for entry in &log {
        println!(
            "  {} {:<6} {} -> {}",
            entry.label(),
            entry.kind.label(),
            entry.start.format("%H:%M:%S"),
            entry.end.format("%H:%M:%S")
        );
    }

    if let Some(path) = output {
        export_service::export_task_log(path, &log)?;
        println!("✓ Exported task log to {}", path.display());
    }
    Ok(())
}

fn cmd_series(
    config_path: &Path,
    cell: u32,
    metric: &str,
    ticks: Option<usize>,
    seed: Option<u64>,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = config_service::load_config(config_path)?;
    let mut session = DashboardSession::new(config)?;
    session.simulate(ticks, seed, None)?;

    let series = query::extract_cell_series(session.history(), cell, metric)?;

    if let Some(path) = output {
        export_service::export_series(path, &series)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", export_service::series_csv(&series)?);
    }

    Ok(())
}

fn print_view(view: &DashboardView<'_>) {
    if let Some(agg) = view.aggregate {
        println!(
            "  Avg voltage: {:.2} V  Avg temperature: {:.1} °C  Avg capacity: {:.1} %",
            agg.avg_voltage, agg.avg_temperature, agg.avg_capacity
        );
    }
    for card in &view.cells {
        let charge = card
            .charge_percent
            .map(|p| format!("  charge {:.0}%", p))
            .unwrap_or_default();
        println!(
            "  {}: {:.2} V  {:.2} A  {:.1} °C  {:.0} %  {}{}",
            card.id,
            card.reading.voltage,
            card.reading.current,
            card.reading.temperature,
            card.reading.capacity,
            card.reading.mode,
            charge
        );
    }
    if view.all_normal() {
        println!("  ✓ All cells normal");
    } else {
        for alert in view.alerts {
            println!("  ! {}", alert);
        }
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_sim_progress(event: &SimProgressEvent) {
    let width = 28usize;
    let fraction = event.fraction_complete();
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  tick={}/{}  alerts={}  elapsed={:.1}s",
        bar,
        fraction * 100.0,
        event.tick,
        event.total,
        event.alert_count,
        event.elapsed_wall_s
    );
    let _ = io::stdout().flush();
}

fn render_task_progress(event: &TaskProgressEvent) {
    match event.stage {
        TaskStage::Finished => {}
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = event.completed % spinner.len();
            let task = event
                .task_number
                .map(|n| format!("Task {}", n))
                .unwrap_or_default();
            let kind = event.kind.map(|k| k.label()).unwrap_or_default();
            print!(
                "\r{} {} {} {}  {}/{}  at {}",
                spinner[spin_idx],
                task,
                kind,
                event.stage.label(),
                event.completed,
                event.total,
                event.at.format("%H:%M:%S")
            );
            let _ = io::stdout().flush();
        }
    }
}
