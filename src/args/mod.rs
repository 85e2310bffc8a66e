use std::env;

use thiserror::Error;

use crate::{config::DEFAULT_MAX_REDIRECTS, utils::HTTP_SCHEME};

pub const USAGE: &str = "Usage: httpget [OPTIONS] [-r n <pr1=value1 pr2=value2 ...>] <URL>";

/// Reasons the command line could not be turned into `Args`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("Missing URL")]
    MissingUrl,
    #[error("More than one URL given")]
    DuplicateUrl,
    #[error("URL must start with http://")]
    UnsupportedScheme,
    #[error("-r must be followed by a parameter count")]
    MissingParameterCount,
    #[error("Expected {expected} name=value parameters, found {found}")]
    MissingParameter { expected: usize, found: usize },
    #[error("Parameter '{0}' is not of the form name=value")]
    InvalidParameter(String),
    #[error("The URL must be the last argument when -r is used")]
    MisplacedUrl,
    #[error("Missing value for {0}")]
    MissingValue(&'static str),
    #[error("Invalid value for {option}: {value}")]
    InvalidValue { option: &'static str, value: String },
    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

/// Represents command line arguments for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub url: String,
    /// `name=value` pairs from `-r`, joined with `&`.
    pub parameters: Option<String>,
    pub output: Option<String>,
    pub max_redirects: usize,
    pub help: bool,
    pub verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            url: String::new(),
            parameters: None,
            output: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            help: false,
            verbose: false,
        }
    }
}

impl Args {
    /// Parse the process's command line arguments.
    pub fn parse() -> Result<Self, UsageError> {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse command line arguments, excluding the program name.
    ///
    /// `-r n` consumes the next `n` arguments as `name=value` pairs. Once
    /// `-r` has been seen the URL is only accepted as the final argument.
    ///
    /// # Returns
    ///
    /// * `Result<Self, UsageError>` - An `Args` struct if successful, or the first usage problem found.
    pub fn parse_from<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut parsed = Args::default();
        let mut url: Option<String> = None;
        let mut found_r = false;
        let mut i = 0;

        while i < args.len() {
            let arg = args[i].as_str();
            let is_last = i + 1 == args.len();

            match arg {
                "-h" | "--help" => {
                    parsed.help = true;
                    return Ok(parsed);
                }
                "-v" | "--verbose" => parsed.verbose = true,
                "-o" | "--output" => {
                    i += 1;
                    let file = args.get(i).ok_or(UsageError::MissingValue("--output"))?;
                    parsed.output = Some(file.clone());
                }
                "--max-redirects" => {
                    i += 1;
                    let value = args
                        .get(i)
                        .ok_or(UsageError::MissingValue("--max-redirects"))?;
                    parsed.max_redirects =
                        value.parse().map_err(|_| UsageError::InvalidValue {
                            option: "--max-redirects",
                            value: value.clone(),
                        })?;
                }
                "-r" => {
                    found_r = true;
                    i += 1;
                    let count = args
                        .get(i)
                        .filter(|value| value.starts_with(|c: char| c.is_ascii_digit()))
                        .ok_or(UsageError::MissingParameterCount)?;
                    let count: usize = count.parse().map_err(|_| UsageError::InvalidValue {
                        option: "-r",
                        value: count.clone(),
                    })?;

                    let mut pairs = Vec::new();
                    for found in 0..count {
                        i += 1;
                        let pair = args.get(i).ok_or(UsageError::MissingParameter {
                            expected: count,
                            found,
                        })?;
                        if !pair.contains('=') {
                            return Err(UsageError::InvalidParameter(pair.clone()));
                        }
                        pairs.push(pair.as_str());
                    }
                    parsed.parameters = Some(pairs.join("&"));
                }
                _ if arg.starts_with('-') => {
                    return Err(UsageError::UnknownOption(arg.to_string()));
                }
                _ if !found_r || is_last => {
                    if url.is_some() {
                        return Err(UsageError::DuplicateUrl);
                    }
                    url = Some(arg.to_string());
                }
                _ => return Err(UsageError::MisplacedUrl),
            }

            i += 1;
        }

        let url = url.ok_or(UsageError::MissingUrl)?;
        if !url.starts_with(HTTP_SCHEME) {
            return Err(UsageError::UnsupportedScheme);
        }
        parsed.url = url;

        Ok(parsed)
    }

    /// Print usage information
    pub fn print_help() {
        println!("httpget - A minimal HTTP GET client that follows redirects");
        println!();
        println!("{}", USAGE);
        println!();
        println!("Options:");
        println!("    -r <n> <name=value>...    Send n query parameters, joined with '&'");
        println!("    -o, --output <FILE>       Save the raw response to a file");
        println!(
            "    --max-redirects <N>       Redirects to follow before giving up (default: {})",
            DEFAULT_MAX_REDIRECTS
        );
        println!("    -v, --verbose             Enable debug logging on stderr");
        println!("    -h, --help                Display this help message");
        println!();
        println!("Examples:");
        println!("    httpget http://example.com");
        println!("    httpget -r 2 q=rust page=2 http://example.com/search");
        println!("    httpget -o response.txt http://example.com:8080/index.html");
    }
}
