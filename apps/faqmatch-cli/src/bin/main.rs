use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use faqmatch_core::catalog::FaqCatalog;
use faqmatch_core::config::Config;
use faqmatch_hybrid::FaqService;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <seed.json> [query ...]", args[0]);
        eprintln!("Example: {} faqs.json '¿cuál es el horario?'", args[0]);
        eprintln!("Without queries, one query is read per stdin line.");
        std::process::exit(1);
    }
    let seed_path = PathBuf::from(&args[1]);

    let config = Config::load()?;
    let matching = config.matching()?;
    info!(
        alpha = matching.base_alpha,
        understood = matching.understood_threshold,
        ambiguous = matching.ambiguous_threshold,
        top_k = matching.top_k,
        "matching config"
    );

    let catalog = FaqCatalog::load_json(&seed_path)?;
    let service = FaqService::new(catalog, matching);
    service.reindex()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.len() > 2 {
        for query in &args[2..] {
            answer(&service, query, &mut out)?;
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        answer(&service, &line, &mut out)?;
    }
    Ok(())
}

fn answer(
    service: &FaqService<FaqCatalog>,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let reply = service.ask(query)?;
    serde_json::to_writer(&mut *out, &reply)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
