use std::{
    io::{self, Write},
    process,
};

use anyhow::{Context, Result};
use httpget::{
    args::USAGE, fetch_observed, logger::init_logger, Args, Exchange, FetchConfig, Response,
};
use log::{debug, LevelFilter};

/// httpget - A minimal HTTP GET client
fn main() {
    // Parse command line arguments
    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!("{}", USAGE);
            eprintln!("Try 'httpget --help' for more information.");
            process::exit(1);
        }
    };

    if args.help {
        Args::print_help();
        process::exit(0);
    }

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(err) = init_logger(level) {
        eprintln!("Failed to initialize logger: {}", err);
    }
    debug!("Arguments: {:?}", args);

    let config = FetchConfig {
        max_redirects: args.max_redirects,
        ..FetchConfig::default()
    };

    let save_final = args.output.is_some();
    let mut print_error: Option<io::Error> = None;
    let result = fetch_observed(&args.url, args.parameters.as_deref(), &config, |exchange| {
        let print_response = exchange.redirect.is_some() || !save_final;
        if let Err(err) = print_exchange(exchange, print_response) {
            if print_error.is_none() {
                print_error = Some(err);
            }
        }
    });

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };
    debug!(
        "Final response from {} after {} redirect(s)",
        response.url(),
        response.redirects()
    );

    if let Some(err) = print_error {
        eprintln!("Error: Failed to write response: {}", err);
        process::exit(1);
    }

    if let Some(path) = args.output.as_deref() {
        if let Err(err) = save_response(&response, path) {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

/// Print the request of one cycle and, if asked, the response it got.
fn print_exchange(exchange: &Exchange<'_>, print_response: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "HTTP request =\n{}\nLEN = {}",
        String::from_utf8_lossy(exchange.request),
        exchange.request.len()
    )?;
    if print_response {
        stdout.write_all(exchange.response)?;
        writeln!(
            stdout,
            "\n  Total received response bytes: {}",
            exchange.response.len()
        )?;
    }
    stdout.flush()
}

fn save_response(response: &Response, path: &str) -> Result<()> {
    response
        .save(path)
        .with_context(|| format!("Failed to write response to '{}'", path))?;
    println!("Response ({} bytes) saved to '{}'", response.len(), path);
    Ok(())
}
