use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};

use peacecloud::config::Config;
use peacecloud::pipeline::cloud::CloudJob;
use peacecloud::pipeline::frequencies::FrequencyFileJob;
use peacecloud::pipeline::topics::{TopicsJob, DEFAULT_REPORT};
use peacecloud::pipeline::RunOutcome;
use peacecloud::render::wordcloud::{parse_color, WordCloud};
use peacecloud::text::filters::FilterMode;
use peacecloud::text::stopwords::StopList;
use peacecloud::topics::lda::LdaModel;

/// Rows shown in the terminal frequency summary.
const SUMMARY_ROWS: usize = 20;

/// Exit status when neither a PDF nor a saved text file is given.
const EXIT_NO_INPUT: u8 = 3;

/// peacecloud: word clouds and topic models from PDF documents.
///
/// Extracts text, strips punctuation and stopwords, merges multi-word
/// phrases, counts what is left and draws it inside a mask image.
#[derive(Parser)]
#[command(name = "peacecloud", version, about)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a word cloud from a PDF (or a saved text file)
    Cloud {
        /// PDF to read
        #[arg(short, long)]
        pdf: Option<PathBuf>,

        /// Mask image; white pixels stay empty
        #[arg(short, long)]
        base: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Filter file, one entry per line
        #[arg(short, long)]
        filters: Option<PathBuf>,

        /// How filter lines are matched
        #[arg(long, value_enum, default_value_t = FilterMode::Exact)]
        filter_mode: FilterMode,

        /// Groups file, one multi-word phrase per line
        #[arg(short, long)]
        groups: Option<PathBuf>,

        /// Also write token frequencies as CSV
        #[arg(short, long)]
        csv: Option<PathBuf>,

        /// Maximum number of words in the cloud (default: 2000)
        #[arg(short, long)]
        max: Option<String>,

        /// Save the extracted words for later runs
        #[arg(short, long)]
        save_file: Option<PathBuf>,

        /// Read words saved by --save-file instead of a PDF
        #[arg(short, long)]
        load_file: Option<PathBuf>,

        /// Keep digits and other non-letter characters
        #[arg(long)]
        keep_non_letters: bool,
    },

    /// Draw a word cloud from a tab-separated frequency file
    Render {
        /// token<TAB>count file, ISO-8859-1
        #[arg(short = 'r', long)]
        frequencies: PathBuf,

        /// Mask image; white pixels stay empty
        #[arg(short, long)]
        base: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Maximum number of words in the cloud (default: 2000)
        #[arg(short, long)]
        max: Option<String>,
    },

    /// Fit a topic model over every document in a directory
    Topics {
        /// Directory of .pdf and .txt files
        #[arg(short, long)]
        directory: PathBuf,

        /// Filter file, one entry per line
        #[arg(short, long)]
        filters: Option<PathBuf>,

        /// How filter lines are matched
        #[arg(long, value_enum, default_value_t = FilterMode::Exact)]
        filter_mode: FilterMode,

        /// Groups file, one multi-word phrase per line
        #[arg(short, long)]
        groups: Option<PathBuf>,

        /// Text report path
        #[arg(short, long, default_value = DEFAULT_REPORT)]
        output: PathBuf,

        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Number of topics (default: 10)
        #[arg(long, default_value = "10")]
        topics: usize,

        /// Gibbs sampling sweeps (default: 1500)
        #[arg(long, default_value = "1500")]
        iterations: usize,

        /// Words listed per topic (default: 8)
        #[arg(long, default_value = "8")]
        top_words: usize,
    },
}

fn main() -> ExitCode {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "peacecloud=debug"
    } else {
        "peacecloud=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            println!("{}", "FAILURE!".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;
    let stoplist = StopList::for_language(&config.language)?;
    debug!(
        language = stoplist.language(),
        stopwords = stoplist.len(),
        "Stopwords loaded"
    );

    let outcome = match cli.command {
        Commands::Cloud {
            pdf,
            base,
            output,
            filters,
            filter_mode,
            groups,
            csv,
            max,
            save_file,
            load_file,
            keep_non_letters,
        } => {
            if let Some(code) = missing_input(pdf.as_deref(), load_file.as_deref()) {
                eprintln!("Either -p/--pdf or -l/--load-file is required.\n");
                let mut cmd = Cli::command();
                if let Some(sub) = cmd.find_subcommand_mut("cloud") {
                    sub.print_help()?;
                }
                return Ok(ExitCode::from(code));
            }

            let cloud = word_cloud(&config, max.as_deref())?;
            let job = CloudJob {
                pdf,
                load_file,
                save_file,
                base_image: base,
                output,
                csv,
                filters,
                filter_mode,
                groups,
                letters_only: !keep_non_letters,
                show_progress: true,
                summary_rows: SUMMARY_ROWS,
            };
            info!(max_words = cloud.layout.max_words, "Starting word cloud run");
            job.run(&stoplist, &cloud)?
        }

        Commands::Render {
            frequencies,
            base,
            output,
            max,
        } => {
            let cloud = word_cloud(&config, max.as_deref())?;
            let job = FrequencyFileJob {
                frequencies,
                base_image: base,
                output,
                summary_rows: SUMMARY_ROWS,
            };
            job.run(&stoplist, &cloud)?
        }

        Commands::Topics {
            directory,
            filters,
            filter_mode,
            groups,
            output,
            json,
            topics,
            iterations,
            top_words,
        } => {
            let model = LdaModel {
                n_topics: topics,
                iterations,
                top_words,
                seed: config.seed,
                show_progress: true,
                ..LdaModel::default()
            };
            let job = TopicsJob {
                directory,
                filters,
                filter_mode,
                groups,
                output,
                json,
                letters_only: true,
                show_progress: false,
            };
            job.run(&stoplist, &model)?
        }
    };

    Ok(finish(outcome))
}

/// Exit status for a `cloud` run with nothing to read, if that is the case.
fn missing_input(pdf: Option<&Path>, load_file: Option<&Path>) -> Option<u8> {
    if pdf.is_none() && load_file.is_none() {
        Some(EXIT_NO_INPUT)
    } else {
        None
    }
}

/// Build the renderer from the environment defaults and the --max flag.
fn word_cloud(config: &Config, max: Option<&str>) -> Result<WordCloud> {
    let mut cloud = WordCloud {
        background: parse_color(&config.background)?,
        font_family: config.font_family.clone(),
        ..WordCloud::default()
    };
    cloud.layout.max_words = config.max_words_from(max);
    cloud.layout.seed = config.seed;
    Ok(cloud)
}

fn finish(outcome: RunOutcome) -> ExitCode {
    if outcome.is_success() {
        println!("{}", "SUCCESS!".green().bold());
    } else {
        println!("{}", "FAILURE!".red().bold());
    }
    ExitCode::from(outcome.exit_code())
}
