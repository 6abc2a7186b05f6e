#[macro_use]
extern crate log;

use std::{io, path::PathBuf};

use anyhow::anyhow;
use chrono::{Local, NaiveDate, TimeDelta};
use clap::{CommandFactory, Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use uuid::Uuid;
use vitalseg::{SegmentTable, load_samples, load_segment, load_thresholds};
use vitalseg_algos::{DailySummaryBuilder, Segmenter, summary_window};
use vitalseg_types::MetricKind;

#[derive(Parser)]
#[command(name = "vitalseg", version, about)]
pub struct VitalsegCli {
    /// JSON threshold configuration, built-in thresholds when omitted
    #[arg(env = "VITALSEG_THRESHOLDS", long)]
    pub thresholds: Option<PathBuf>,
    #[clap(subcommand)]
    pub subcommand: VitalsegCommand,
}

#[derive(Subcommand)]
pub enum VitalsegCommand {
    ///
    /// Group samples into segments and classify them
    ///
    Segment {
        /// JSON array of samples, `-` for stdin
        #[arg(long)]
        input: PathBuf,
        /// Only segment this metric (heart_rate, spo2, blood_pressure, sleep)
        #[arg(long)]
        metric: Option<MetricKind>,
        /// Override the configured maximum gap between samples
        #[arg(long)]
        gap_minutes: Option<i64>,
        #[arg(long, env = "VITALSEG_USER")]
        user: Option<Uuid>,
        /// Most recently stored segment, segmentation resumes after it
        #[arg(long, requires = "metric")]
        recent: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
        /// Print a plain-text table instead of JSON
        #[arg(long, conflicts_with = "pretty")]
        table: bool,
    },
    ///
    /// Load and validate the threshold configuration
    ///
    ValidateConfig,
    ///
    /// Daily summaries over the last 30 days
    ///
    Summary {
        #[arg(long)]
        input: PathBuf,
        /// Summaries end the day before this date, defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long)]
        pretty: bool,
    },
    ///
    /// Generate shell completions
    ///
    Completions { shell: clap_complete::Shell },
}

fn main() -> anyhow::Result<()> {
    let dotenv_result = dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = dotenv_result {
        debug!("No .env loaded: {}", error);
    }

    let cli = VitalsegCli::parse();

    match cli.subcommand {
        VitalsegCommand::Segment {
            input,
            metric,
            gap_minutes,
            user,
            recent,
            pretty,
            table,
        } => {
            let mut thresholds = load_thresholds(cli.thresholds.as_deref())?;
            if let Some(minutes) = gap_minutes {
                thresholds = thresholds.with_max_gap(gap_override(minutes)?);
            }

            let samples = load_samples(&input)?;
            let user_id = user.unwrap_or_else(Uuid::nil);
            let segmenter = Segmenter::new(&thresholds);

            match metric {
                Some(kind) => {
                    let recent = recent.as_deref().map(load_segment).transpose()?;
                    let segments = segmenter.resume(user_id, kind, &samples, recent.as_ref());
                    info!("{} {} segments", segments.len(), kind);

                    if table {
                        print!("{}", SegmentTable(&segments));
                    } else {
                        print_json(&segments, pretty)?;
                    }
                }
                None => {
                    let segments = segmenter.segment_all(user_id, &samples);
                    for (kind, segments) in &segments {
                        info!("{} {} segments", segments.len(), kind);
                    }

                    if table {
                        for segments in segments.values() {
                            print!("{}", SegmentTable(segments));
                        }
                    } else {
                        print_json(&segments, pretty)?;
                    }
                }
            }

            Ok(())
        }
        VitalsegCommand::ValidateConfig => {
            let thresholds = load_thresholds(cli.thresholds.as_deref())?;
            for kind in [
                MetricKind::HeartRate,
                MetricKind::SpO2,
                MetricKind::BloodPressure,
                MetricKind::Sleep,
            ] {
                info!("{}: max gap {}", kind, thresholds.rules(kind).max_gap);
            }
            println!("Thresholds are valid");
            Ok(())
        }
        VitalsegCommand::Summary {
            input,
            today,
            pretty,
        } => {
            let samples = load_samples(&input)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            let Some(earliest) = samples.iter().map(|s| s.time.date()).min() else {
                info!("No samples, nothing to summarize");
                return print_json(&Vec::<()>::new(), pretty);
            };

            let (from, to) = summary_window(earliest, today);
            let summaries = DailySummaryBuilder::build(&samples, from, to);
            info!("{} daily summaries from {} to {}", summaries.len(), from, to);
            print_json(&summaries, pretty)
        }
        VitalsegCommand::Completions { shell } => {
            let mut command = VitalsegCli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn gap_override(minutes: i64) -> anyhow::Result<TimeDelta> {
    if minutes <= 0 {
        return Err(anyhow!("--gap-minutes must be positive, got {}", minutes));
    }
    TimeDelta::try_minutes(minutes)
        .ok_or_else(|| anyhow!("--gap-minutes is out of range, got {}", minutes))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
