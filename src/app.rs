use log::{debug, info, warn};

use lucky_draw::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;

use serde::Serialize;
use serde_json::json;
use serde_json::Value as JSValue;

use crate::app::config_reader::*;
use crate::args::{Args, Command};

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_export;
pub mod session;

#[derive(Debug, Snafu)]
pub enum AppError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Unexpected cell content at row {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error serializing JSON"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing CSV file"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error writing output"))]
    WritingOutput { source: std::io::Error },
    #[snafu(display("Error reading input"))]
    ReadingInput { source: std::io::Error },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("{source}"))]
    Core { source: DrawError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// The randomness used by the command line: seeded when `--seed` is given.
#[derive(Clone, Debug)]
pub enum AppRng {
    System(SystemRng),
    Seeded(SeededRng),
}

impl AppRng {
    pub fn new(seed: Option<u64>) -> AppRng {
        match seed {
            Some(s) => AppRng::Seeded(SeededRng::from_seed(s)),
            None => AppRng::System(SystemRng),
        }
    }
}

impl RandomSource for AppRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            AppRng::System(r) => r.shuffle(slice),
            AppRng::Seeded(r) => r.shuffle(slice),
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match self {
            AppRng::System(r) => r.pick_index(len),
            AppRng::Seeded(r) => r.pick_index(len),
        }
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> AppResult<JSValue> {
    serde_json::to_value(value).context(SerializingJsonSnafu {})
}

fn roster_summary_js(roster: &Roster) -> AppResult<JSValue> {
    let report = roster.duplicates();
    let duplicates: Vec<JSValue> = report
        .name_counts
        .iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, count)| json!({"name": name, "count": count}))
        .collect();
    Ok(json!({
        "size": roster.len(),
        "hasDuplicates": report.has_duplicates,
        "duplicates": duplicates,
        "participants": to_js(roster.participants())?,
    }))
}

/// Loads one input into the roster. Returns the number of participants added.
fn read_input(roster: &mut Roster, source: &InputSource, root: Option<&Path>) -> AppResult<usize> {
    match source.provider.as_str() {
        "text" => {
            let names = source.names.clone().unwrap_or_default();
            Ok(roster.ingest_text(&names))
        }
        "csv" | "xlsx" => {
            let lpath = source
                .file_path
                .clone()
                .whatever_context("missing filePath for a file input")?;
            let path = io_common::resolve_path(root, &lpath);
            info!("Attempting to read roster file {:?}", path);
            if source.provider == "csv" {
                io_csv::read_csv_roster(&path, roster)
            } else {
                io_excel::read_excel_roster(&path, source.excel_worksheet_name.as_deref(), roster)
            }
        }
        x => whatever!("Provider not implemented {:?}", x),
    }
}

/// All the inputs, in order: the configuration file first, then the command line.
/// The flag tells whether the input comes from the configuration file.
fn collect_inputs(args: &Args, config: Option<&AppConfig>) -> Vec<(InputSource, bool)> {
    let mut inputs: Vec<(InputSource, bool)> = config
        .map(|c| c.inputs.iter().map(|i| (i.clone(), true)).collect())
        .unwrap_or_default();
    let provider = args.input_type.clone().unwrap_or_else(|| "csv".to_string());
    for path in args.input.iter() {
        let source = InputSource {
            provider: provider.clone(),
            file_path: Some(path.clone()),
            names: None,
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        };
        inputs.push((source, false));
    }
    if let Some(names) = args.names.as_deref() {
        inputs.push((InputSource::text(names), false));
    }
    inputs
}

/// Builds the roster described by the configuration file and the command line.
pub fn build_roster(args: &Args, config: Option<&AppConfig>, root: Option<&Path>) -> AppResult<Roster> {
    let mut roster = Roster::new();
    for (source, from_config) in collect_inputs(args, config) {
        // Inputs given on the command line are relative to the working directory.
        let source_root = if from_config { root } else { None };
        let added = read_input(&mut roster, &source, source_root)?;
        debug!("build_roster: {:?} added {}", source.provider, added);
    }
    if args.demo {
        roster.load_demo();
    }
    let report = roster.duplicates();
    if report.has_duplicates {
        if args.dedup || config.and_then(|c| c.remove_duplicates).unwrap_or(false) {
            let removed = roster.remove_duplicates();
            info!("Removed {} participants with a duplicated name", removed);
        } else {
            warn!(
                "Some names appear more than once: {:?}",
                report.duplicated_names()
            );
        }
    }
    Ok(roster)
}

fn run_draws(
    roster: &Roster,
    settings: LotterySettings,
    count: u32,
    rng: &mut AppRng,
) -> AppResult<JSValue> {
    let mut lottery = Lottery::new(settings);
    let mut draws: Vec<JSValue> = Vec::new();
    let mut exhausted = false;
    for draw_id in 1..=count {
        let res = lottery.draw(roster.participants(), rng, |p| {
            eprint!("\r{:<30}", p.name);
            thread::sleep(settings.frame_interval);
        });
        if settings.animation_frames > 0 {
            eprintln!();
        }
        match res {
            Ok(winner) => {
                info!("Draw {}: {}", draw_id, winner.name);
                draws.push(json!({"draw": draw_id, "winner": to_js(&winner)?}));
            }
            Err(DrawError::PoolExhausted) => {
                warn!("Everybody has been drawn after {} draws", draw_id - 1);
                exhausted = true;
                break;
            }
            Err(e) => return Err(e).context(CoreSnafu {}),
        }
    }
    Ok(json!({
        "allowRepeats": settings.allow_repeats,
        "rosterSize": roster.len(),
        "draws": draws,
        "remaining": lottery.remaining_pool(roster.participants()).len(),
        "exhausted": exhausted,
    }))
}

fn write_output(out: Option<&str>, js: &JSValue) -> AppResult<()> {
    let pretty = serde_json::to_string_pretty(js).context(SerializingJsonSnafu {})?;
    match out {
        None | Some("stdout") | Some("") => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", pretty).context(WritingOutputSnafu {})?;
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty).context(OpeningFileSnafu { path })?;
        }
    }
    Ok(())
}

pub fn run(args: &Args) -> AppResult<()> {
    let (config, root): (Option<AppConfig>, Option<PathBuf>) = match args.config.as_deref() {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (Some(config), Some(root))
        }
        None => (None, None),
    };
    let roster = build_roster(args, config.as_ref(), root.as_deref())?;
    let mut rng = AppRng::new(args.seed);
    let lottery_config = config.as_ref().map(|c| c.lottery.clone()).unwrap_or_default();
    let grouping_config = config.as_ref().map(|c| c.grouping.clone()).unwrap_or_default();

    let summary = match &args.command {
        Command::Roster => roster_summary_js(&roster)?,
        Command::Draw {
            count,
            allow_repeats,
            no_animation,
        } => {
            let mut settings = lottery_config.settings();
            if *allow_repeats {
                settings.allow_repeats = true;
            }
            if *no_animation {
                settings.animation_frames = 0;
            }
            let count = count.or(lottery_config.draws).unwrap_or(1);
            run_draws(&roster, settings, count, &mut rng)?
        }
        Command::Group { size, export } => {
            let requested = match size {
                Some(s) => parse_group_size(s).context(CoreSnafu {})?,
                None => grouping_config.group_size()?,
            };
            let group_size = clamp_group_size(requested, roster.len());
            if group_size != requested {
                warn!(
                    "Group size {} is larger than the roster, using {}",
                    requested, group_size
                );
            }
            let groups =
                generate_groups(roster.participants(), group_size, &mut rng).context(CoreSnafu {})?;
            if let Some(path) = export {
                io_export::export_groups(path, &groups)?;
            }
            json!({"groupSize": group_size, "groups": to_js(&groups)?})
        }
        Command::Session => {
            let mut s = session::Session::new(
                roster,
                lottery_config.settings(),
                grouping_config.group_size()?,
                rng,
            );
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            s.run(stdin.lock(), &mut stdout)?;
            return Ok(());
        }
    };
    write_output(args.out.as_deref(), &summary)
}
