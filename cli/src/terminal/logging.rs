use std::fmt;

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use airfresh_common::macros::{TARGET_ERROR, TARGET_INFO, TARGET_PRINT, TARGET_SUCCESS, TARGET_WARN};

pub struct AirfreshFormatter;

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" && self.0.is_none() {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

type Paint = fn(ColoredString) -> ColoredString;

fn prefix(target: &str, level: &Level) -> (&'static str, Paint) {
    match target {
        TARGET_SUCCESS => ("[+]", |s| s.green().bold()),
        TARGET_INFO => ("[*]", |s| s.cyan().bold()),
        TARGET_WARN => ("[!]", |s| s.yellow().bold()),
        TARGET_ERROR => ("[-]", |s| s.red().bold()),
        _ => match *level {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[*]", |s| s.cyan()),
            Level::WARN => ("[!]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        },
    }
}

impl<S, N> FormatEvent<S, N> for AirfreshFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == TARGET_PRINT {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0.unwrap_or_default());
        }

        let (symbol, paint) = prefix(meta.target(), meta.level());
        write!(writer, "{} ", paint(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Builds the filter from the `-v`/`-q` counts. `RUST_LOG` wins when set.
fn filter(verbose: u8, quiet: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let crates: &str = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let status: &str = if quiet > 1 { "warn" } else { "info" };

    let directives: String = format!(
        "{crates},airfresh::print=info,airfresh::success={status},airfresh::info={status},airfresh::warn=warn,airfresh::error=error"
    );
    EnvFilter::new(directives)
}

pub fn init(verbose: u8, quiet: u8) {
    tracing_subscriber::fmt()
        .event_format(AirfreshFormatter)
        .with_env_filter(filter(verbose, quiet))
        .with_writer(std::io::stdout)
        .init();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
