//! `agenda` CLI: book, list and move appointments from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Book an appointment (refused if it overlaps another one)
//! agenda add --label Dentist --category santé --date 15/03/2012 --start 9h00 --end 9h30
//!
//! # Book it anyway
//! agenda add --label Call --category travail --date 15/03/2012 --start 9h15 --end 10h00 --force
//!
//! # List everything, or one day, optionally as JSON
//! agenda list
//! agenda list --date 15/03/2012 --json
//!
//! # Who overlaps a candidate slot?
//! agenda conflicts --date 15/03/2012 --start 9h00 --end 12h00
//!
//! # Free time on a day
//! agenda free --date 15/03/2012 --from 8h00 --to 18h00 --min 30
//!
//! # Calendar facts about a date
//! agenda day --date "jeudi semaine 11 2012"
//!
//! # Configuration
//! agenda config show
//! agenda config set date_format 2
//! ```
//!
//! Logging goes to stderr. Use `-v`/`-vv` or `RUST_LOG` to see more.

use std::path::{Path, PathBuf};

use agenda_core::calendar::{self, day_name};
use agenda_core::config::DEFAULT_CONFIG_FILE;
use agenda_core::freebusy::find_free_slots_of_at_least;
use agenda_core::{
    AgendaConfig, AgendaRepository, Appointment, CalendarDate, ClockTime, ConflictPolicy,
    HasInterval, Interval, TemporalValue,
};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agenda", version, about = "Personal appointment book")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Agenda(AgendaCommand),
    /// Show day of year, weekday and week number of a date
    Day {
        #[arg(long)]
        date: String,
    },
    /// Show or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands that read or change the stored appointments.
#[derive(Subcommand)]
enum AgendaCommand {
    /// Book a new appointment
    Add {
        /// Short label: 1 to 8 characters, no spaces
        #[arg(long)]
        label: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Date in the configured notation
        #[arg(long)]
        date: String,
        /// Start time, e.g. 14h25
        #[arg(long)]
        start: String,
        /// End time, e.g. 15h00
        #[arg(long)]
        end: String,
        /// Store it even if it overlaps other appointments
        #[arg(long)]
        force: bool,
    },
    /// List appointments in chronological order
    List {
        /// Only show appointments on this date
        #[arg(long)]
        date: Option<String>,
        /// Print a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove appointment number N (as shown by `list`)
    Remove { number: usize },
    /// Move appointment number N to a new time range
    Reschedule {
        number: usize,
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Move it even if it overlaps other appointments
        #[arg(long)]
        force: bool,
    },
    /// Show stored appointments that overlap a time range
    Conflicts {
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Show free time on a date
    Free {
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "08h00")]
        from: String,
        #[arg(long, default_value = "20h00")]
        to: String,
        /// Only show slots of at least this many minutes
        #[arg(long, default_value_t = 1)]
        min: i64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Change one key and save the configuration file
    Set { key: String, value: String },
}

/// JSON shape of one listed appointment.
#[derive(Serialize)]
struct AppointmentView<'a> {
    number: usize,
    date: String,
    start: String,
    end: String,
    label: &'a str,
    category: &'a str,
    description: &'a str,
}

impl<'a> AppointmentView<'a> {
    fn new(number: usize, appointment: &'a Appointment) -> Self {
        Self {
            number,
            date: appointment.start().to_date_string(),
            start: appointment.start().to_time_string(),
            end: appointment.end().to_time_string(),
            label: appointment.label(),
            category: appointment.category(),
            description: appointment.description(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = AgendaConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    debug!(path = %cli.config.display(), ?config, "configuration loaded");

    match cli.command {
        Commands::Day { date } => show_day(&config, &date),
        Commands::Config { action } => run_config(config, &cli.config, action),
        Commands::Agenda(command) => {
            let config = resolve_data_file(config, &cli.config);
            let (mut repository, report) = AgendaRepository::open(&config).with_context(|| {
                format!("Failed to open agenda {}", config.data_file.display())
            })?;
            info!(
                loaded = report.loaded,
                skipped = report.skipped,
                "agenda loaded"
            );

            let outcome = run_agenda(&config, &mut repository, command);
            if repository.flush()? {
                info!(path = %repository.path().display(), "agenda saved");
            }
            outcome
        }
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!("agenda={level},agenda_core={level}")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

/// Relative record file paths are taken from the configuration file's directory.
fn resolve_data_file(mut config: AgendaConfig, config_path: &Path) -> AgendaConfig {
    if config.data_file.is_relative() {
        if let Some(base) = config_path.parent() {
            config.data_file = base.join(&config.data_file);
        }
    }
    config
}

fn run_agenda(
    config: &AgendaConfig,
    repository: &mut AgendaRepository,
    command: AgendaCommand,
) -> Result<()> {
    let options = config.parse_options();

    match command {
        AgendaCommand::Add {
            label,
            category,
            description,
            date,
            start,
            end,
            force,
        } => {
            let appointment =
                Appointment::parse(label, description, category, &date, &start, &end, &options)?;
            report_conflicts(repository, &appointment.interval(), force);
            let index = repository.add(appointment, policy(force))?;
            println!("Added appointment #{}", index + 1);
        }
        AgendaCommand::List { date, json } => {
            let date = date
                .map(|text| CalendarDate::parse(&text, &options))
                .transpose()?;
            let rows: Vec<AppointmentView<'_>> = repository
                .agenda()
                .iter()
                .enumerate()
                .filter(|(_, a)| date.is_none_or(|d| a.date() == d))
                .map(|(i, a)| AppointmentView::new(i + 1, a))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No appointments");
            } else {
                for row in &rows {
                    println!(
                        "{:>3}. {} {}-{}  {:<8} [{}] {}",
                        row.number,
                        row.date,
                        row.start,
                        row.end,
                        row.label,
                        row.category,
                        row.description
                    );
                }
            }
        }
        AgendaCommand::Remove { number } => {
            let index = list_index(repository, number)?;
            let removed = repository.remove(index)?;
            println!("Removed {}", removed);
        }
        AgendaCommand::Reschedule {
            number,
            date,
            start,
            end,
            force,
        } => {
            let index = list_index(repository, number)?;
            let interval = parse_interval(&date, &start, &end, config)?;
            let current = repository.agenda().get(index);
            for conflict in repository.agenda().conflicts(&interval) {
                if Some(conflict.item) != current {
                    eprintln!("overlaps: {} ({})", conflict.item, conflict.outcome);
                }
            }
            let new_index =
                repository.reschedule(index, interval.start, interval.end, policy(force))?;
            println!("Moved to #{}", new_index + 1);
        }
        AgendaCommand::Conflicts { date, start, end } => {
            let interval = parse_interval(&date, &start, &end, config)?;
            let conflicts = repository.agenda().conflicts(&interval);
            if conflicts.is_empty() {
                println!("No conflicts");
            }
            for conflict in conflicts {
                println!(
                    "{} {} ({} min)",
                    conflict.item, conflict.outcome, conflict.overlap_minutes
                );
            }
        }
        AgendaCommand::Free {
            date,
            from,
            to,
            min,
        } => {
            let window = parse_interval(&date, &from, &to, config)?;
            let slots =
                find_free_slots_of_at_least(repository.agenda().as_slice(), &window, min);
            if slots.is_empty() {
                println!("No free time");
            }
            for slot in slots {
                println!(
                    "{}-{} ({} min)",
                    slot.start.to_time_string(),
                    slot.end.to_time_string(),
                    slot.duration_minutes
                );
            }
        }
    }
    Ok(())
}

fn show_day(config: &AgendaConfig, text: &str) -> Result<()> {
    let date = CalendarDate::parse(text, &config.parse_options())?;
    println!("Date:         {}", date);
    println!("Day of year:  {}", date.day_of_year());
    println!("Weekday:      {}", day_name(date.weekday() as i32));
    println!("Week:         {}", date.week_number());
    println!(
        "Leap year:    {}",
        if calendar::is_leap_year(date.year()) { "yes" } else { "no" }
    );
    Ok(())
}

fn run_config(mut config: AgendaConfig, path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => print!("{}", config.to_toml()?),
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config
                .save(path)
                .with_context(|| format!("Failed to save configuration {}", path.display()))?;
            info!(key = %key, value = %value, "configuration updated");
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

/// Turn a 1-based list number into a list index.
fn list_index(repository: &AgendaRepository, number: usize) -> Result<usize> {
    let len = repository.agenda().len();
    if number == 0 || number > len {
        bail!("No appointment #{} (the agenda holds {})", number, len);
    }
    Ok(number - 1)
}

/// A same-day `[start, end)` range; the end must come after the start.
fn parse_interval(date: &str, start: &str, end: &str, config: &AgendaConfig) -> Result<Interval> {
    let date = CalendarDate::parse(date, &config.parse_options())?;
    let start = TemporalValue::new(date, ClockTime::parse(start)?);
    let end = TemporalValue::new(date, ClockTime::parse(end)?);
    if start >= end {
        bail!("{} must come before {}", start, end);
    }
    Ok(Interval::new(start, end))
}

fn report_conflicts(repository: &AgendaRepository, interval: &Interval, force: bool) {
    for conflict in repository.agenda().conflicts(interval) {
        let verb = if force { "overlaps" } else { "conflicts with" };
        eprintln!("{}: {} ({})", verb, conflict.item, conflict.outcome);
    }
}

fn policy(force: bool) -> ConflictPolicy {
    if force {
        ConflictPolicy::Allow
    } else {
        ConflictPolicy::Reject
    }
}
