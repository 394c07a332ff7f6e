use anyhow::Result;
use clap::Parser;
use jsift::index::{most_common, KeyFilter, HISTOGRAM_ENTRIES};
use jsift::output::{self, TreeNode};
use jsift::session::{SearchMode, Session};
use jsift::utils::{AppConfig, SessionLog};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use termcolor::Color;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "jsift", version)]
#[command(about = "Fuzzy search for keys/columns and values in JSON or CSV files")]
struct Cli {
    /// The .json or .csv file to inspect
    file: PathBuf,

    /// Display a tree chart of the file structure and exit
    #[arg(long)]
    chart: bool,

    /// Display histograms of key and value counts and exit
    #[arg(long)]
    histogram: bool,

    /// Render histograms with the external termgraph program
    #[arg(long, requires = "histogram")]
    termgraph: bool,

    /// Print the log file content when the program ends
    #[arg(long)]
    verbose: bool,

    /// Run one search, print the results and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Search values instead of keys
    #[arg(long)]
    values: bool,

    /// Only search keys containing one of these comma-separated patterns
    #[arg(long, value_name = "PATTERNS")]
    only: Option<String>,

    /// Print --query results as JSON
    #[arg(long, requires = "query")]
    json: bool,

    /// Use the line-based prompt instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Minimum score (0-100) for a match
    #[arg(long)]
    min_score: Option<f64>,

    /// Maximum number of results per search
    #[arg(long)]
    limit: Option<usize>,
}

impl Cli {
    fn one_shot(&self) -> bool {
        self.chart || self.histogram || self.query.is_some()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let _log = SessionLog::init(cli.verbose, cli.one_shot())?;

    let mut config = AppConfig::load()?;
    if let Some(min_score) = cli.min_score {
        config.min_score = min_score;
    }
    if let Some(limit) = cli.limit {
        config.search_limit = limit;
    }

    let mut session = Session::new(config.session_options());
    if cli.values {
        session.set_mode(SearchMode::Values);
    }
    if let Some(patterns) = &cli.only {
        session.set_filter(KeyFilter::parse(patterns));
    }
    let loaded = session.open(&cli.file);

    if cli.one_shot() {
        // The failure is already on stderr through the log
        if loaded.is_err() {
            return Ok(ExitCode::FAILURE);
        }
        if cli.chart {
            print_chart(&session, &cli, &config)?;
        } else if cli.histogram {
            print_histograms(&session, cli.termgraph)?;
        } else if let Some(query) = &cli.query {
            let hits = session.search(query);
            if cli.json {
                output::print_hits_json(&mut io::stdout().lock(), &hits)?;
            } else {
                output::print_hits(&mut output::stdout(true), &hits, config.tree_item_limit)?;
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    info!("Press Ctrl+T to toggle completion, Ctrl+V to switch between keys and values, Ctrl+C to exit.");

    #[cfg(feature = "interactive")]
    {
        if !cli.plain {
            let mut app = jsift::tui::App::new(session, &config);
            if let Err(e) = loaded {
                app.status_message = e.to_string();
            }
            jsift::tui::run(app)?;
            return Ok(ExitCode::SUCCESS);
        }
    }

    let mut out = output::stdout(true);
    if let Err(e) = loaded {
        writeln!(out, "{}", e)?;
    }
    jsift::repl::run(&mut session, io::stdin().lock(), &mut out, config.tree_item_limit)?;
    Ok(ExitCode::SUCCESS)
}

fn print_chart(session: &Session, cli: &Cli, config: &AppConfig) -> Result<()> {
    let Some(document) = session.document() else {
        return Ok(());
    };
    let tree = TreeNode::from_value(
        cli.file.display().to_string(),
        document.root(),
        config.tree_item_limit,
    );
    output::print_tree(&mut output::stdout(true), &tree)?;
    Ok(())
}

fn print_histograms(session: &Session, termgraph: bool) -> Result<()> {
    let Some(corpus) = session.corpus() else {
        return Ok(());
    };
    let charts = [
        ("Key", "keys", most_common(&corpus.all_keys, HISTOGRAM_ENTRIES), "blue", Color::Blue),
        ("Value", "values", most_common(&corpus.all_values, HISTOGRAM_ENTRIES), "green", Color::Green),
    ];

    let mut out = output::stdout(true);
    for (title, plural, entries, color_name, color) in charts {
        writeln!(out, "\n{} Histogram:", title)?;
        if entries.is_empty() {
            writeln!(out, "No {} found for histogram.", plural)?;
            continue;
        }
        if termgraph {
            out.flush()?;
            match output::run_termgraph(&entries, color_name) {
                Ok(()) => continue,
                Err(e) => warn!("Error generating {} histogram: {:#}", plural, e),
            }
        }
        output::print_histogram(&mut out, &entries, color)?;
    }
    Ok(())
}
