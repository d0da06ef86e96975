#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use roulement::{
    display, io,
    scenario::{self, ScenarioConfig},
    scheduler::{FillOptions, Scheduler, StrategyKind, ViolationKind},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de remplissage de quarts (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un scénario aléatoire (employés + calendrier)
    Generate {
        #[arg(long, default_value_t = 1)]
        weeks: u16,
        #[arg(long, default_value_t = 7)]
        days_per_week: u8,
        /// liste "A,B,C,..." (prioritaire sur --employees)
        #[arg(long)]
        names: Option<String>,
        #[arg(long, default_value_t = 8)]
        employees: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Date du jour 1 (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Importer des employés depuis un CSV (remplace la liste courante)
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Importer un calendrier depuis un CSV (remplace le calendrier courant)
    ImportCalendar {
        #[arg(long)]
        csv: String,
        #[arg(long, default_value_t = 7)]
        days_per_week: u8,
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Remplir le calendrier avec une stratégie
    Fill {
        /// greedy | round-robin | deadline
        #[arg(long, default_value = "greedy")]
        strategy: StrategyKind,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        no_shuffle: bool,
        #[arg(long, default_value_t = 0)]
        rotation_start: usize,
    },

    /// Comparer les trois stratégies sur des copies du roster
    Compare {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        no_shuffle: bool,
        /// Affiche aussi chaque calendrier rempli
        #[arg(long)]
        calendars: bool,
    },

    /// Afficher et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les invariants du calendrier rempli
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;

    let code = match cli.cmd {
        Commands::Generate {
            weeks,
            days_per_week,
            names,
            employees,
            seed,
            start,
        } => {
            let names: Vec<String> = match names {
                Some(list) => split_list(&list),
                None => scenario::default_names(employees),
            };
            if names.is_empty() {
                bail!("aucun employé à générer");
            }
            let seed = resolve_seed(seed);
            let config = ScenarioConfig {
                weeks,
                days_per_week,
                start,
                ..ScenarioConfig::default()
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let roster = scenario::generate_roster(&names, &config, &mut rng)?;
            roster.validate()?;
            storage.save(&roster)?;
            println!(
                "Generated {} employee(s), {} shift(s) (seed {seed})",
                roster.employees.len(),
                roster.calendar.shift_count()
            );
            0
        }
        Commands::ImportEmployees { csv } => {
            let mut roster = storage.load_or_default()?;
            roster.employees = io::import_employees_csv(&csv)
                .with_context(|| format!("importing employees from {csv}"))?;
            roster.validate()?;
            storage.save(&roster)?;
            0
        }
        Commands::ImportCalendar {
            csv,
            days_per_week,
            start,
        } => {
            let mut roster = storage.load_or_default()?;
            roster.calendar = io::import_calendar_csv(&csv, days_per_week, start)
                .with_context(|| format!("importing calendar from {csv}"))?;
            roster.validate()?;
            storage.save(&roster)?;
            0
        }
        Commands::Fill {
            strategy,
            seed,
            no_shuffle,
            rotation_start,
        } => {
            let opts = FillOptions {
                shuffle: !no_shuffle,
                rotation_start,
            };
            let seed = resolve_seed(seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut scheduler = Scheduler::new(storage.load()?);
            let report = scheduler.fill(strategy, &mut rng, opts)?;
            storage.save(scheduler.roster())?;
            println!(
                "{}: {} shift(s), {} urgent, {} missing (seed {seed})",
                report.strategy, report.shifts, report.urgent_shifts, report.missing_headcount
            );
            0
        }
        Commands::Compare {
            seed,
            no_shuffle,
            calendars,
        } => {
            let opts = FillOptions {
                shuffle: !no_shuffle,
                ..FillOptions::default()
            };
            let seed = resolve_seed(seed);
            let roster = storage.load()?;
            let comparison = scenario::compare(&roster, seed, opts)?;
            if calendars {
                for run in &comparison.runs {
                    println!("Filled calendar ({}):", run.kind);
                    print!("{}", display::render_calendar(&run.roster.calendar));
                }
            }
            println!("seed {seed}");
            print!("{}", display::render_comparison(&comparison));
            0
        }
        Commands::List { out_json, out_csv } => {
            let roster = storage.load()?;
            if let Some(path) = out_json {
                io::export_roster_json(path, &roster)?;
            }
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, &roster.calendar)?;
            }
            print!("{}", display::render_calendar(&roster.calendar));
            print!("{}", display::render_employees(&roster.employees));
            0
        }
        Commands::Check => {
            let scheduler = Scheduler::new(storage.load()?);
            let violations = scheduler.detect_violations();
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    let kind = match v.kind {
                        ViolationKind::DoubleBooking => "double-booking",
                        ViolationKind::OverStaffed => "over-staffed",
                        ViolationKind::UrgencyMismatch => "urgency-mismatch",
                        ViolationKind::UnknownEmployee => "unknown-employee",
                        ViolationKind::CounterMismatch => "counter-mismatch",
                    };
                    let shift = v.shift.map(|s| s.to_string()).unwrap_or_default();
                    eprintln!("{kind}\t{shift}\t{}", v.employee.as_deref().unwrap_or("-"));
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
