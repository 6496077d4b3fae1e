//! mm-radio-qth binary entry point.
//!
//! MeshMonitor runs this once per matching message with the message and
//! sender details in the environment, and reads one JSON line from stdout.
//! Every value can also be passed as a flag for manual testing:
//!
//! ```text
//! mm-radio-qth --message '!qth' --from-id '!a1b2' --from-lat 40 --from-lon -105
//! ```

use clap::error::ErrorKind;
use clap::Parser;
use identity_store::JsonFileStore;
use qth_responder::context::RawInvocation;
use qth_responder::{
    respond, InvocationContext, Reply, ResponderConfig, ResponderResult, DEFAULT_MAX_REPLY_LEN,
    SERVICE_NAME,
};
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// Radio identity + QTH responder for MeshMonitor.
#[derive(Parser, Debug)]
#[command(name = "mm-radio-qth", version)]
#[command(about = "Reply to !id and !qth commands with radio identity labels and grid locators")]
struct Args {
    /// Inbound message text.
    #[arg(long, env = "MESSAGE")]
    message: Option<String>,

    /// Sender node id.
    #[arg(long, env = "FROM_ID")]
    from_id: Option<String>,

    /// Sender node id, used when FROM_ID is empty.
    #[arg(long, env = "FROM_NODE_ID")]
    from_node_id: Option<String>,

    /// Sender short display name.
    #[arg(long, env = "FROM_SHORT_NAME")]
    short_name: Option<String>,

    /// Sender long display name.
    #[arg(long, env = "FROM_LONG_NAME")]
    long_name: Option<String>,

    /// Sender latitude in decimal degrees.
    #[arg(long, env = "FROM_LAT", allow_hyphen_values = true)]
    from_lat: Option<String>,

    /// Sender longitude in decimal degrees.
    #[arg(long, env = "FROM_LON", allow_hyphen_values = true)]
    from_lon: Option<String>,

    /// Station latitude in decimal degrees.
    #[arg(long, env = "MM_LAT", allow_hyphen_values = true)]
    station_lat: Option<String>,

    /// Station longitude in decimal degrees.
    #[arg(long, env = "MM_LON", allow_hyphen_values = true)]
    station_lon: Option<String>,

    /// Identity store file.
    #[arg(long, env = "MM_RADIO_ID_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Maximum reply length in characters.
    #[arg(long, env = "MM_RADIO_ID_MAXLEN")]
    max_len: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MM_RADIO_ID_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Append JSONL logs to this file instead of stderr.
    #[arg(long, env = "MM_RADIO_ID_LOG_PATH")]
    log_path: Option<PathBuf>,
}

impl Args {
    fn raw_invocation(&self) -> RawInvocation {
        RawInvocation {
            message: self.message.clone(),
            from_id: self.from_id.clone(),
            from_node_id: self.from_node_id.clone(),
            short_name: self.short_name.clone(),
            long_name: self.long_name.clone(),
            sender_lat: self.from_lat.clone(),
            sender_lon: self.from_lon.clone(),
            station_lat: self.station_lat.clone(),
            station_lon: self.station_lon.clone(),
        }
    }
}

fn init_logging(level: &str, log_path: Option<PathBuf>) {
    observability::init_with_config(observability::LogConfig {
        service_name: SERVICE_NAME.into(),
        default_level: level.into(),
        log_path,
        ..Default::default()
    });
}

/// Print the reply envelope as the only line on stdout.
fn emit(reply: &Reply, max_reply_len: usize) -> ResponderResult<()> {
    let line = reply.envelope(max_reply_len).to_json_line()?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ResponderResult<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // The caller still expects exactly one reply.
            init_logging("warn", None);
            warn!(error = %e, "Unusable arguments, replying with usage");
            return emit(&Reply::usage(), DEFAULT_MAX_REPLY_LEN);
        }
    };

    init_logging(&args.log_level, args.log_path.clone());

    let config = ResponderConfig::new(args.db_path.clone(), args.max_len.as_deref());
    let ctx = InvocationContext::from_raw(&args.raw_invocation());
    debug!(
        store = %config.store_path.display(),
        max_reply_len = config.max_reply_len,
        sender_id = %ctx.sender_id,
        "Invocation context loaded"
    );

    let store = JsonFileStore::new(&config.store_path);
    let reply = panic::catch_unwind(AssertUnwindSafe(|| respond(&ctx, &store))).unwrap_or_else(
        |_| {
            error!("Responder panicked, replying with usage");
            Reply::usage()
        },
    );

    emit(&reply, config.max_reply_len)
}
