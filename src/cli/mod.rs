//! Command-line front end: loads a report fixture, runs it through the
//! in-memory source and prints the payload.

pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use tracing::debug;

use crate::config::ConfigLoader;
use crate::core::services::{ReportService, ReportSink};
use crate::errors::ReportResult;
use crate::report::ReportPayload;
use crate::source::MemorySource;
use crate::time::FixedClock;
use crate::utils::build_info;

#[derive(Debug, Parser)]
#[command(name = "budget_report_cli", about = "Run a custom budget report")]
pub struct Args {
    /// Fixture path, or a report name stored under the reports directory.
    #[arg(required_unless_present = "build_info")]
    pub fixture: Option<String>,

    /// Print the payload as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Base directory holding `reports/`; defaults to the app data directory.
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Print build metadata and exit.
    #[arg(long)]
    pub build_info: bool,
}

/// Collects the payload for printing once the run completes.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    payload: Option<ReportPayload>,
    ready: bool,
}

impl ReportSink for ConsoleSink {
    fn set_data(&mut self, payload: ReportPayload) {
        self.payload = Some(payload);
    }

    fn set_data_check(&mut self, ready: bool) {
        self.ready = ready;
    }
}

pub fn run_cli() -> ReportResult<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> ReportResult<()> {
    if args.build_info {
        println!("{}", build_info::current().summary());
        return Ok(());
    }
    let Some(name) = args.fixture.as_deref() else {
        return Ok(());
    };

    let loader = match args.home {
        Some(base) => ConfigLoader::with_base_dir(base),
        None => ConfigLoader::new(),
    };
    let path = loader.resolve(name);
    debug!(path = %path.display(), "resolving report fixture");
    let fixture = loader.load_fixture(&path)?;

    let mut service = ReportService::new(Arc::new(MemorySource::from_fixture(&fixture)));
    if let Some(today) = args.today {
        service = service.with_clock(Arc::new(FixedClock::new(today)));
    }

    let mut sink = ConsoleSink::default();
    futures::executor::block_on(service.run(&fixture.report, &mut sink))?;

    match sink.payload {
        Some(payload) if sink.ready => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", output::render_report(&payload, fixture.report.balance_type));
            }
        }
        _ => println!("{}", output::empty_notice()),
    }
    Ok(())
}
