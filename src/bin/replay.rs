use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use chat_session::logging;
use chat_session::session_timeline::{AuthorRef, Timeline, TimelineSession};
use chat_session::EnvConfig;
use serde::Serialize;
use tracing::{info, warn};

const USAGE: &str = "usage: chat-session-replay [EVENTS.jsonl | -]";

#[derive(Serialize)]
struct ReplayReport<'a> {
    session_author: Option<&'a AuthorRef>,
    ingested: usize,
    skipped: usize,
    timeline: &'a Timeline,
}

fn main() -> io::Result<()> {
    let config = EnvConfig::from_env();
    logging::init(config.debug);

    let mut args = std::env::args().skip(1);
    let source = args.next();
    if matches!(source.as_deref(), Some("-h" | "--help")) {
        println!("{USAGE}");
        return Ok(());
    }
    if args.next().is_some() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, USAGE));
    }

    let reader: Box<dyn BufRead> = match source.as_deref() {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
    };

    let mut session = TimelineSession::new();
    let mut ingested = 0;
    let mut skipped = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match session.ingest_json(&line) {
            Ok(_) => ingested += 1,
            Err(error) => {
                skipped += 1;
                warn!(line = index + 1, %error, "skipping malformed event");
            }
        }
    }
    info!(ingested, skipped, entries = session.timeline().len(), "replay finished");

    let report = ReplayReport {
        session_author: session.session_author(),
        ingested,
        skipped,
        timeline: session.timeline(),
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).map_err(io::Error::other)?;
    writeln!(stdout)
}
