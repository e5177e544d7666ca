//! CLI definition and dispatch.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::signal_factory::build_strategy;
use crate::domain::config_validation::validate_rule_config;
use crate::domain::error::{EvalError, SigchainError};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::parser::parse;
use crate::domain::strategy::{Decision, Strategy};
use crate::domain::tokenizer::tokenize;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "sigchain", about = "Signal chain rule engine")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a boolean expression such as "true and !(false or true)"
    Eval { expression: String },
    /// Validate a rule configuration and print the chains it builds
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Replay CSV bars through the entry and exit rules
    Replay {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: PathBuf,
        #[arg(long)]
        code: String,
        #[arg(long)]
        exchange: String,
        /// First day to replay (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day to replay (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Eval { expression } => run_eval(&expression),
        Command::Check { config } => run_check(&config),
        Command::Replay {
            config,
            data_dir,
            code,
            exchange,
            start,
            end,
        } => run_replay(&config, data_dir, &code, &exchange, start, end),
    }
}

fn fail(err: SigchainError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(fail)
}

/// Lex and parse a hand-written expression.
pub fn evaluate_expression(input: &str) -> Result<bool, EvalError> {
    let tokens = tokenize(input)?;
    Ok(parse(&tokens)?)
}

fn run_eval(expression: &str) -> ExitCode {
    let tokens = match tokenize(expression) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {}", e.display_with_context(expression));
            return (&SigchainError::from(EvalError::from(e))).into();
        }
    };
    match parse(&tokens) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e.display_with_context(&tokens));
            (&SigchainError::from(EvalError::from(e))).into()
        }
    }
}

fn run_check(config_path: &PathBuf) -> ExitCode {
    tracing::info!(config = %config_path.display(), "checking configuration");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_rule_config(&adapter) {
        return fail(e);
    }

    let strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    println!("strategy: {}", strategy.name);
    println!("entry: {}", strategy.entry);
    println!("exit:  {}", strategy.exit);
    eprintln!("Rule configuration is valid.");
    ExitCode::SUCCESS
}

/// One entry or exit decided during a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayEvent {
    pub time: NaiveDateTime,
    pub close: f64,
    pub decision: Decision,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub bars: usize,
    /// Bars seen before the entry rule became ready.
    pub warmup_bars: usize,
    /// Bars dropped because their time did not advance.
    pub skipped_bars: usize,
    pub events: Vec<ReplayEvent>,
    pub holding: bool,
}

impl ReplaySummary {
    pub fn entries(&self) -> usize {
        self.count(Decision::Enter)
    }

    pub fn exits(&self) -> usize {
        self.count(Decision::Exit)
    }

    fn count(&self, decision: Decision) -> usize {
        self.events.iter().filter(|e| e.decision == decision).count()
    }
}

/// Drive `strategy` over `bars`, tracking a single flat/holding position.
pub fn replay(strategy: &mut Strategy, bars: &[OhlcvBar]) -> Result<ReplaySummary, EvalError> {
    let mut summary = ReplaySummary::default();
    let mut last_time: Option<NaiveDateTime> = None;

    for bar in bars {
        if last_time.is_some_and(|t| bar.time <= t) {
            tracing::warn!(time = %bar.time, code = %bar.code, "skipping bar that does not advance time");
            summary.skipped_bars += 1;
            continue;
        }
        last_time = Some(bar.time);
        summary.bars += 1;
        let decision = strategy.decide(bar, summary.holding)?;
        match decision {
            Decision::Wait => summary.warmup_bars += 1,
            Decision::Hold => {}
            Decision::Enter | Decision::Exit => {
                summary.holding = decision == Decision::Enter;
                summary.events.push(ReplayEvent {
                    time: bar.time,
                    close: bar.close,
                    decision,
                });
            }
        }
    }

    Ok(summary)
}

fn run_replay(
    config_path: &PathBuf,
    data_dir: PathBuf,
    code: &str,
    exchange: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ExitCode {
    // Stage 1: configuration
    tracing::info!(config = %config_path.display(), "loading configuration");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_rule_config(&adapter) {
        return fail(e);
    }
    let mut strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    tracing::info!(strategy = %strategy.name, entry = %strategy.entry, exit = %strategy.exit, "built rules");

    // Stage 2: data
    let data = CsvAdapter::new(data_dir);
    let bars = match data.fetch_ohlcv(code, exchange, start, end) {
        Ok(b) => b,
        Err(e) => return fail(e),
    };
    if bars.is_empty() {
        return fail(SigchainError::NoData {
            code: code.to_string(),
            exchange: exchange.to_string(),
        });
    }

    // Stage 3: replay
    let summary = match replay(&mut strategy, &bars) {
        Ok(s) => s,
        Err(e) => return fail(e.into()),
    };

    for event in &summary.events {
        let label = match event.decision {
            Decision::Enter => "ENTRY",
            _ => "EXIT",
        };
        println!("{label} {} {:.4}", event.time, event.close);
    }
    println!(
        "{} bars, {} warmup, {} skipped, {} entries, {} exits, {}",
        summary.bars,
        summary.warmup_bars,
        summary.skipped_bars,
        summary.entries(),
        summary.exits(),
        if summary.holding { "holding" } else { "flat" }
    );
    ExitCode::SUCCESS
}
