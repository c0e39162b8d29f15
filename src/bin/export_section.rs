//! CLI that exports one saved section page to an offline directory.
//!
//! Works on a static snapshot, so pages carrying tab widgets are rejected;
//! those need a live panel driver.

use std::process;

use offline_academy::{extract_section, save_section, DirectorySink};

fn usage() -> ! {
    eprintln!("usage: export-section <page.html> <base-uri> <out-dir>");
    process::exit(2);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(page), Some(base_uri), Some(out_dir)) = (args.next(), args.next(), args.next())
    else {
        usage()
    };
    if args.next().is_some() {
        usage()
    }

    let html = match std::fs::read_to_string(&page) {
        Ok(html) => html,
        Err(err) => {
            eprintln!("failed to read {page}: {err}");
            process::exit(1);
        }
    };

    let result = match extract_section(&html, &base_uri).await {
        Ok(result) => result,
        Err(err) => {
            eprintln!("extraction failed: {err}");
            process::exit(1);
        }
    };

    let sink = DirectorySink::new(&out_dir);
    match save_section(result, &sink).await {
        Ok(report) => {
            println!(
                "exported to {out_dir} ({} assets written, {} failed)",
                report.assets_written, report.assets_failed
            );
            if report.assets_failed > 0 {
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("save failed: {err}");
            process::exit(1);
        }
    }
}
