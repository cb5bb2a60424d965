use betabin::prob::Beta;
use betabin::fit::{self, Summary, Trials};
use betabin::model::Model;
use betabin::plot::{self, Series, TextChart};
use anyhow::{anyhow, Context};
use structopt::StructOpt;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
enum Format {
    Text,
    Csv,
    Json
}

impl FromStr for Format {

    type Err = anyhow::Error;

    fn from_str(s : &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(anyhow!("Unknown output format: {}", other))
        }
    }

}

/// Explore the Beta-Binomial conjugate model from the command line
#[derive(StructOpt, Debug)]
#[structopt(name = "betabin")]
struct Opt {

    /// Log debug messages to stderr (RUST_LOG takes precedence)
    #[structopt(short, long, global = true)]
    verbose : bool,

    #[structopt(subcommand)]
    cmd : Command

}

#[derive(StructOpt, Debug)]
enum Command {

    /// Probability mass function of k successes out of n trials with success probability p
    Pmf {

        #[structopt(short)]
        n : u64,

        #[structopt(short)]
        p : f64,

        #[structopt(long, default_value = "text", possible_values = &["text", "csv", "json"])]
        format : Format,

        #[structopt(short, long, parse(from_os_str))]
        output : Option<PathBuf>
    },

    /// Density of the Beta(alpha, beta) distribution over [0, 1]
    Pdf {

        #[structopt(short)]
        alpha : f64,

        #[structopt(short)]
        beta : f64,

        /// Number of intervals of the evaluation grid
        #[structopt(long, default_value = "100")]
        resolution : usize,

        #[structopt(long, default_value = "text", possible_values = &["text", "csv", "json"])]
        format : Format,

        #[structopt(short, long, parse(from_os_str))]
        output : Option<PathBuf>
    },

    /// Maximum likelihood estimate k / n of the success probability
    Mle {

        #[structopt(short)]
        k : u64,

        #[structopt(short)]
        n : u64
    },

    /// Conjugate update of a Beta(alpha, beta) prior after k successes out of n trials
    Update {

        #[structopt(short)]
        alpha : f64,

        #[structopt(short)]
        beta : f64,

        #[structopt(short)]
        k : u64,

        #[structopt(short)]
        n : u64,

        /// Probability mass of the credible intervals
        #[structopt(long, default_value = "0.95")]
        level : f64,

        #[structopt(long, default_value = "text", possible_values = &["text", "json"])]
        format : Format
    },

    /// Distribution of successes in m future trials under a Beta(alpha, beta) belief
    Predict {

        #[structopt(short)]
        alpha : f64,

        #[structopt(short)]
        beta : f64,

        #[structopt(short)]
        m : u64,

        #[structopt(long, default_value = "text", possible_values = &["text", "csv", "json"])]
        format : Format,

        #[structopt(short, long, parse(from_os_str))]
        output : Option<PathBuf>
    },

    /// Summarizes the posterior of a JSON model file
    Fit {

        #[structopt(parse(from_os_str))]
        model : PathBuf,

        /// Saves the summary as JSON instead of printing it
        #[structopt(short, long, parse(from_os_str))]
        output : Option<PathBuf>
    },

    /// Prior, normalized likelihood and posterior curves over the same grid
    Plot {

        #[structopt(short)]
        alpha : f64,

        #[structopt(short)]
        beta : f64,

        #[structopt(short)]
        k : u64,

        #[structopt(short)]
        n : u64,

        #[structopt(long, default_value = "50")]
        resolution : usize,

        #[structopt(long, default_value = "text", possible_values = &["text", "csv", "json"])]
        format : Format,

        #[structopt(short, long, parse(from_os_str))]
        output : Option<PathBuf>
    }

}

fn init_tracing(verbose : bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn open_output(output : &Option<PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("Could not create output file {}", path.display()))?;
            info!("Writing to {}", path.display());
            Ok(Box::new(f))
        },
        None => Ok(Box::new(io::stdout()))
    }
}

fn emit(series : &[Series], format : Format, output : &Option<PathBuf>) -> anyhow::Result<()> {
    let mut writer = open_output(output)?;
    match format {
        Format::Text => {
            for s in series.iter() {
                writeln!(writer, "{}", TextChart::new(s))?;
            }
            Ok(())
        },
        Format::Csv => plot::write_csv(series, writer),
        Format::Json => plot::write_json(series, writer)
    }
}

fn print_summary(summary : &Summary, format : Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        _ => println!("{}", summary)
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    init_tracing(opt.verbose);
    debug!("{:?}", opt.cmd);
    match opt.cmd {
        Command::Pmf { n, p, format, output } => {
            emit(&[plot::binomial_pmf(n, p)?], format, &output)
        },
        Command::Pdf { alpha, beta, resolution, format, output } => {
            emit(&[plot::beta_pdf(alpha, beta, resolution)?], format, &output)
        },
        Command::Mle { k, n } => {
            let mle = fit::mle(&Trials::new(k, n)?)?;
            println!("{}", mle);
            Ok(())
        },
        Command::Update { alpha, beta, k, n, level, format } => {
            let prior = Beta::new(alpha, beta)?;
            let summary = Summary::new(&prior, Trials::new(k, n)?, level)?;
            print_summary(&summary, format)
        },
        Command::Predict { alpha, beta, m, format, output } => {
            let belief = Beta::new(alpha, beta)?;
            emit(&[plot::predictive(&belief, m)?], format, &output)
        },
        Command::Fit { model, output } => {
            let summary = Model::load_from_path(&model)?.summary()?;
            match output {
                Some(path) => {
                    let f = File::create(&path)
                        .with_context(|| format!("Could not create summary file {}", path.display()))?;
                    serde_json::to_writer_pretty(f, &summary)?;
                    info!("Summary saved to {}", path.display());
                    Ok(())
                },
                None => print_summary(&summary, Format::Text)
            }
        },
        Command::Plot { alpha, beta, k, n, resolution, format, output } => {
            let prior = Beta::new(alpha, beta)?;
            let curves = plot::conjugate(&prior, &Trials::new(k, n)?, resolution)?;
            emit(&curves, format, &output)
        }
    }
}
