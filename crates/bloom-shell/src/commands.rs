//! Command parsing and execution for the shell.
//!
//! One command per line:
//!
//! ```text
//! insert <value>
//! query <value>      (alias: lookup)
//! dump
//! stats
//! help
//! quit               (alias: exit)
//! ```

use std::sync::Arc;

use bloom_membership::{
    ErrorResponse, FilterError, FilterStats, MembershipFilter, MembershipHandler, Metrics,
    MetricsSnapshot,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub const HELP: &str = "\
commands:
  insert <value>   add a value to the filter
  query <value>    test a value (alias: lookup)
  dump             print the bit array, bit 0 first
  stats            print load figures and operation counters
  help             show this message
  quit             leave the shell (alias: exit)";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(String),
    Query(String),
    Dump,
    Stats,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),
}

impl Command {
    /// Parse one input line
    ///
    /// The value keeps its inner whitespace; trimming and emptiness checks
    /// are left to the request handler.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "insert" | "add" => Ok(Command::Insert(rest.to_string())),
            "query" | "lookup" => Ok(Command::Query(rest.to_string())),
            "dump" => Ok(Command::Dump),
            "stats" => Ok(Command::Stats),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the shell should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

/// Reply to `stats`: filter load plus the session's operation counters
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub filter: FilterStats,
    pub metrics: MetricsSnapshot,
    /// Positive answers over all queries; true positives included
    pub observed_positive_rate: f64,
}

/// One shell session around a single long-lived filter
pub struct Session {
    filter: Arc<MembershipFilter>,
    metrics: Arc<Metrics>,
    handler: MembershipHandler<MembershipFilter>,
    json_output: bool,
}

impl Session {
    /// `metrics` should be the recorder `filter` was built with
    pub fn new(filter: Arc<MembershipFilter>, metrics: Arc<Metrics>, json_output: bool) -> Self {
        let handler = MembershipHandler::new(Arc::clone(&filter));
        Self {
            filter,
            metrics,
            handler,
            json_output,
        }
    }

    /// Filter load and counters, taken together
    pub fn stats_report(&self) -> StatsReport {
        StatsReport {
            filter: self.filter.stats(),
            metrics: self.metrics.snapshot(),
            observed_positive_rate: self.metrics.observed_positive_rate(),
        }
    }

    /// Parse and run one input line
    pub fn execute_line(&self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(err) => {
                warn!(error = %err, "Rejected command");
                Outcome::Reply(err.to_string())
            }
        }
    }

    pub fn execute(&self, command: Command) -> Outcome {
        let reply = match command {
            Command::Insert(value) => match self.handler.handle_insert(&value) {
                Ok(response) => self.render(&response, &response.message),
                Err(err) => self.render_error(&err),
            },
            Command::Query(value) => match self.handler.handle_lookup(&value) {
                Ok(response) => self.render(&response, &response.message),
                Err(err) => self.render_error(&err),
            },
            Command::Dump => {
                let response = self.handler.handle_dump();
                self.render(&response, &response.bits)
            }
            Command::Stats => {
                let report = self.stats_report();
                let stats = &report.filter;
                let counters = &report.metrics;
                let plain = format!(
                    "m={} k={} bits_set={} inserts={} fill={:.4} est_fpr={:.4} theory_fpr={:.4}\n\
                     queries={} positive={} positive_rate={:.4} dumps={} \
                     avg_insert_ns={} avg_query_ns={}",
                    stats.size_bits,
                    stats.hash_count,
                    stats.bits_set,
                    stats.inserts,
                    stats.fill_ratio,
                    stats.estimated_fpr,
                    stats.theoretical_fpr,
                    counters.queries,
                    counters.queries_positive,
                    report.observed_positive_rate,
                    counters.dumps,
                    counters.avg_insert_ns,
                    counters.avg_query_ns
                );
                self.render(&report, &plain)
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Reply(reply)
    }

    fn render<T: Serialize>(&self, response: &T, plain: &str) -> String {
        if !self.json_output {
            return plain.to_string();
        }
        serde_json::to_string(response).unwrap_or_else(|err| {
            warn!(error = %err, "Failed to encode response");
            plain.to_string()
        })
    }

    fn render_error(&self, err: &FilterError) -> String {
        let response = ErrorResponse::from(err);
        self.render(&response, &response.message)
    }
}
