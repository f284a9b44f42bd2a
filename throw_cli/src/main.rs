use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use throw_core::export::{export_csv, export_json};
use throw_core::store::{clear_sessions, delete_session, find_session, read_sessions};
use throw_core::*;
use uuid::Uuid;

const SESSIONS_FILE: &str = "sessions.jsonl";
const STREAK_FILE: &str = "streak.json";
const BAR_WIDTH: usize = 24;

#[derive(Parser)]
#[command(name = "throwlog")]
#[command(about = "Training log and load tracker for throwers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate weeks and streaks as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a training session
    Log(LogArgs),

    /// List sessions, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one session in detail
    Show {
        id: Uuid,
    },

    /// Delete a session
    Delete {
        id: Uuid,
    },

    /// Training load, risk and statistics
    Stats {
        /// Number of weeks in the load chart
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SERIES_WEEKS))
        )]
        weeks: Option<u32>,
    },

    /// Current logging streak
    Streak,

    /// Export sessions
    #[command(subcommand)]
    Export(ExportCommand),

    /// Delete all sessions and the streak cache
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct LogArgs {
    /// shot-put, discus, hammer or javelin
    #[arg(long)]
    event: Event,

    /// technique, power, competition or recovery
    #[arg(long = "type", value_name = "TYPE")]
    session_type: SessionType,

    /// indoor or outdoor
    #[arg(long, default_value = "indoor")]
    season: Season,

    #[arg(long, default_value_t = 20)]
    throws: u32,

    /// Rate of Perceived Exertion, 1-10
    #[arg(long, default_value_t = 5)]
    rpe: u8,

    /// Implement weight (defaults to the event's first preset)
    #[arg(long)]
    weight: Option<f64>,

    /// kg or g
    #[arg(long)]
    weight_unit: Option<WeightUnit>,

    /// Mark as a personal record day
    #[arg(long)]
    pr: bool,

    #[arg(long, requires = "pr")]
    pr_distance: Option<f64>,

    /// m or ft
    #[arg(long, requires = "pr")]
    distance_unit: Option<DistanceUnit>,

    #[arg(long, default_value = "")]
    notes: String,

    #[arg(long, default_value = "")]
    coach_notes: String,

    /// Session date (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args, Default)]
struct FilterArgs {
    #[arg(long)]
    event: Option<Event>,

    #[arg(long)]
    season: Option<Season>,

    #[arg(long = "type", value_name = "TYPE")]
    session_type: Option<SessionType>,

    /// Only PR days
    #[arg(long)]
    pr_only: bool,
}

impl From<&FilterArgs> for SessionFilter {
    fn from(args: &FilterArgs) -> Self {
        SessionFilter {
            event: args.event,
            season: args.season,
            session_type: args.session_type,
            pr_only: args.pr_only,
        }
    }
}

#[derive(Subcommand)]
enum ExportCommand {
    /// Export (filtered) sessions as CSV
    Csv {
        #[arg(long, default_value = "throwing_sessions.csv")]
        output: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export a full JSON backup
    Json {
        #[arg(long, default_value = "throwing_tracker_backup.json")]
        output: PathBuf,
    },
}

/// Resolved file locations and evaluation day
struct Context {
    sessions_path: PathBuf,
    streak_path: PathBuf,
    today: NaiveDate,
    config: Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        throw_core::logging::init_with_level("debug");
    } else {
        throw_core::logging::init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    tracing::debug!("Data dir {:?}, evaluating as of {}", data_dir, today);

    let ctx = Context {
        sessions_path: data_dir.join(SESSIONS_FILE),
        streak_path: data_dir.join(STREAK_FILE),
        today,
        config,
    };

    match cli.command {
        Commands::Log(args) => cmd_log(&ctx, args),
        Commands::List { filter } => cmd_list(&ctx, &filter),
        Commands::Show { id } => cmd_show(&ctx, id),
        Commands::Delete { id } => cmd_delete(&ctx, id),
        Commands::Stats { weeks } => cmd_stats(&ctx, weeks),
        Commands::Streak => cmd_streak(&ctx),
        Commands::Export(ExportCommand::Csv { output, filter }) => {
            cmd_export_csv(&ctx, &output, &filter)
        }
        Commands::Export(ExportCommand::Json { output }) => cmd_export_json(&ctx, &output),
        Commands::Clear { yes } => cmd_clear(&ctx, yes),
    }
}

fn cmd_log(ctx: &Context, args: LogArgs) -> Result<()> {
    // Without an explicit weight, fall back to the event's standard implement
    let (implement_weight, weight_unit) = match args.weight {
        Some(weight) => (
            weight,
            args.weight_unit.unwrap_or(ctx.config.units.weight_unit),
        ),
        None => match weight_presets(args.event).first() {
            Some(preset) => (preset.value, preset.unit),
            None => (0.0, ctx.config.units.weight_unit),
        },
    };

    let distance_unit = if args.pr && args.pr_distance.is_some() {
        Some(args.distance_unit.unwrap_or(ctx.config.units.distance_unit))
    } else {
        None
    };

    let input = NewThrowSession {
        date: args.date.unwrap_or(ctx.today),
        event: args.event,
        session_type: args.session_type,
        season: args.season,
        throw_count: args.throws,
        implement_weight,
        weight_unit,
        rpe: args.rpe,
        pr_day: args.pr,
        pr_distance: args.pr_distance,
        distance_unit,
        notes: args.notes,
        coach_notes: args.coach_notes,
    };
    input.validate()?;

    let session = input.into_session(Utc::now());
    let mut sink = JsonlSink::new(&ctx.sessions_path);
    sink.append(&session)?;

    let sessions = read_sessions(&ctx.sessions_path)?;
    let streak = StreakRecord::update(&ctx.streak_path, &sessions, ctx.today)?;

    println!("\n✓ Session saved!");
    println!("  ID:    {}", session.id);
    println!("  Load:  {}", compute_load(&session));
    println!("  Streak: {} day(s)", streak.current);

    let weekly = assess_weekly_risk(&sessions, ctx.today);
    if weekly.risk.risky {
        print_risk_advisory();
    }

    Ok(())
}

fn cmd_list(ctx: &Context, filter: &FilterArgs) -> Result<()> {
    let sessions = read_sessions(&ctx.sessions_path)?;
    let filtered = filter_sessions(&sessions, &SessionFilter::from(filter));

    if filtered.is_empty() {
        println!("No sessions found");
        println!("  Try adjusting your filters or log a new session");
        return Ok(());
    }

    for session in filtered {
        println!(
            "{}  {} {:<9} {:>3} throws  {:<11} {:<7} {} RPE {:>2}{}  {}",
            session.date,
            session.event.icon(),
            session.event.display_name(),
            session.throw_count,
            session.session_type,
            session.season,
            RpeBand::from_rpe(session.rpe).icon(),
            session.rpe,
            if session.pr_day { "  PR" } else { "" },
            session.id
        );
    }

    Ok(())
}

fn cmd_show(ctx: &Context, id: Uuid) -> Result<()> {
    let session = find_session(&ctx.sessions_path, id)?;

    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  {} {}",
        session.event.icon(),
        session.event.display_name()
    );
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Date:             {}", session.date.format("%a, %b %-d %Y"));
    println!(
        "  Session Type:     {} {}",
        session.session_type.icon(),
        session.session_type
    );
    println!(
        "  Season:           {} {}",
        session.season.icon(),
        session.season.display_name()
    );
    println!("  Throws:           {}", session.throw_count);
    println!(
        "  Implement Weight: {} {}",
        session.implement_weight, session.weight_unit
    );
    println!(
        "  RPE:              {} {}/10 ({})",
        RpeBand::from_rpe(session.rpe).icon(),
        session.rpe,
        rpe_descriptor(session.rpe)
    );
    println!("  Session Load:     {}", compute_load(&session));

    if session.pr_day {
        match (session.pr_distance, session.distance_unit) {
            (Some(distance), Some(unit)) => println!("  🏅 PR Day!        {} {}", distance, unit),
            (Some(distance), None) => println!("  🏅 PR Day!        {}", distance),
            _ => println!("  🏅 PR Day!        Yes"),
        }
    }

    if !session.notes.is_empty() {
        println!("\n  Notes:\n    {}", session.notes);
    }
    if !session.coach_notes.is_empty() {
        println!("\n  Coach Notes:\n    {}", session.coach_notes);
    }

    println!();
    Ok(())
}

fn cmd_delete(ctx: &Context, id: Uuid) -> Result<()> {
    let removed = delete_session(&ctx.sessions_path, id)?;

    let sessions = read_sessions(&ctx.sessions_path)?;
    StreakRecord::update(&ctx.streak_path, &sessions, ctx.today)?;

    println!(
        "✓ Session deleted ({} {} on {})",
        removed.event.display_name(),
        removed.session_type,
        removed.date
    );
    Ok(())
}

fn cmd_stats(ctx: &Context, weeks: Option<u32>) -> Result<()> {
    let week_count = weeks.unwrap_or(ctx.config.analytics.series_weeks);

    let sessions = read_sessions(&ctx.sessions_path)?;
    let weekly = assess_weekly_risk(&sessions, ctx.today);

    if !ctx.config.athlete.name.is_empty() {
        println!("\n{}", ctx.config.athlete.name);
    }

    println!("\nTRAINING LOAD");
    println!("  This week: {}", weekly.this_week_load);
    println!("  Last week: {}", weekly.last_week_load);
    let sign = if weekly.risk.percentage >= 0 { "+" } else { "" };
    println!("  Change:    {}{}%", sign, weekly.risk.percentage);
    println!(
        "  {} {}",
        weekly.risk.level.icon(),
        weekly.risk.level.message()
    );
    if weekly.risk.risky {
        print_risk_advisory();
    }

    println!("\nOVERALL");
    print_summary(&summary_stats(&sessions));

    for season in Season::ALL {
        println!("\n{}", season.display_name().to_uppercase());
        print_summary(&season_stats(&sessions, season));
    }

    let breakdown = event_breakdown(&sessions);
    let max_count = breakdown.max_count();
    println!("\nEVENTS");
    for (event, count) in breakdown.iter() {
        println!(
            "  {} {:<9} {:<width$} {}",
            event.icon(),
            event.display_name(),
            bar(count as u64, max_count as u64),
            count,
            width = BAR_WIDTH
        );
    }

    let series = weekly_series(&sessions, week_count, ctx.today);
    let max_load = series.iter().map(|w| w.load).max().unwrap_or(0).max(1);
    println!("\nWEEKLY LOAD");
    for week in &series {
        println!(
            "  {:<12} {:<width$} {}",
            week.label,
            bar(week.load, max_load),
            week.load,
            width = BAR_WIDTH
        );
    }

    println!();
    Ok(())
}

fn cmd_streak(ctx: &Context) -> Result<()> {
    let sessions = read_sessions(&ctx.sessions_path)?;
    let cached = StreakRecord::load(&ctx.streak_path)?;
    let record = StreakRecord::refresh(&sessions, ctx.today);

    if cached != record {
        tracing::debug!("Streak cache stale ({:?}), refreshing", cached);
        record.save(&ctx.streak_path)?;
    }

    println!("🔥 Streak: {} day(s)", record.current);
    if let Some(last) = record.last_log_date {
        println!("  Last session: {}", last);
    }
    Ok(())
}

fn cmd_export_csv(ctx: &Context, output: &Path, filter: &FilterArgs) -> Result<()> {
    let sessions = read_sessions(&ctx.sessions_path)?;
    let filtered = filter_sessions(&sessions, &SessionFilter::from(filter));

    let count = export_csv(&filtered, output)?;
    println!("✓ Exported {} sessions", count);
    println!("  CSV: {}", output.display());
    Ok(())
}

fn cmd_export_json(ctx: &Context, output: &Path) -> Result<()> {
    let sessions = read_sessions(&ctx.sessions_path)?;
    let streak = StreakRecord::refresh(&sessions, ctx.today);
    let backup = Backup::new(sessions, ctx.config.clone(), streak, Utc::now());

    export_json(&backup, output)?;
    println!("✓ Exported backup of {} sessions", backup.sessions.len());
    println!("  JSON: {}", output.display());
    Ok(())
}

fn cmd_clear(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        return Err(Error::Other(
            "refusing to delete all sessions without --yes".into(),
        ));
    }

    clear_sessions(&ctx.sessions_path)?;
    StreakRecord::clear(&ctx.streak_path)?;

    println!("✓ All data cleared");
    Ok(())
}

fn print_summary(stats: &SummaryStats) {
    println!("  Sessions: {}", stats.total_sessions);
    println!("  Throws:   {}", stats.total_throws);
    println!("  Avg RPE:  {:.1}", stats.avg_rpe);
    println!("  PRs:      {}", stats.pr_count);
}

fn print_risk_advisory() {
    println!();
    println!("⚠️  Weekly load increased by more than 20%.");
    println!("   Consider reducing intensity to prevent injury.");
}

fn bar(value: u64, max: u64) -> String {
    let len = (value * BAR_WIDTH as u64 / max.max(1)) as usize;
    "█".repeat(len)
}
