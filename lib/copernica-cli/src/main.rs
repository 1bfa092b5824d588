#![allow(missing_docs, clippy::print_stdout)]
use std::ffi::OsString;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use copernica_core::{ApiCall, ApiClient, CallResult, EndpointArg};
use serde_json::Value;
use tracing::{Level, debug, warn};

const TOKEN_ENV: &str = "COPERNICA_ACCESS_TOKEN";

const USAGE: &str = "\
Usage: copernica [OPTIONS] <get|post|put|delete> <ENDPOINT> [ARG]

Options:
  --token <TOKEN>      Access token (defaults to $COPERNICA_ACCESS_TOKEN)
  --debug              Log requests and connection activity
  --extra <SEGMENT>    Extra path segment, e.g. `profiles`
  --start <N>          Offset of the first item
  --limit <N>          Maximum number of items
  --total <BOOL>       Ask for the total item count
  --param <NAME=VALUE> Free-form query parameter (repeatable)
  --field <CONDITION>  Field filter, e.g. `email==john@example.com` (repeatable)
  --data <JSON>        Request body of post/put (defaults to `{}`)
  -h, --help           Print this help
";

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = AppArgs::parse().context("parsing arguments")? else {
        print!("{USAGE}");
        return Ok(());
    };

    let level = if args.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    if !args.remaining.is_empty() {
        warn!(remaining = ?args.remaining, "Warning: unused arguments left");
    }

    let result = run(args).await?;
    let output = serde_json::to_string_pretty(&result.into_value()).context("rendering result")?;
    println!("{output}");

    Ok(())
}

async fn run(args: AppArgs) -> Result<CallResult> {
    let token = args
        .token
        .clone()
        .with_context(|| format!("no access token, use --token or set {TOKEN_ENV}"))?;
    let client = ApiClient::new(token, args.debug).context("creating Copernica client")?;

    let call = args.call(&client)?;
    debug!(?call, verb = ?args.verb, "calling Copernica");

    let body = args.data.unwrap_or_else(|| Value::Object(Default::default()));
    let result = match args.verb {
        Verb::Get => call.get().await,
        Verb::Post => call.post(&body).await,
        Verb::Put => call.put(&body).await,
        Verb::Delete => call.delete().await,
    };
    let result = result.with_context(|| format!("{} {}", args.verb, args.endpoint))?;
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for Verb {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let verb = match value.to_ascii_lowercase().as_str() {
            "get" => Self::Get,
            "post" => Self::Post,
            "put" => Self::Put,
            "delete" => Self::Delete,
            _ => bail!("unknown method '{value}', expected get, post, put or delete"),
        };
        Ok(verb)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct AppArgs {
    token: Option<String>,
    debug: bool,
    verb: Verb,
    endpoint: String,
    arg: Option<EndpointArg>,
    extra: Option<String>,
    start: Option<u64>,
    limit: Option<u64>,
    total: Option<bool>,
    params: Vec<(String, String)>,
    fields: Vec<String>,
    data: Option<Value>,
    remaining: Vec<OsString>,
}

impl AppArgs {
    /// Returns `None` when help was requested.
    fn parse() -> Result<Option<Self>> {
        let pargs = pico_args::Arguments::from_env();
        Self::parse_from(pargs, std::env::var(TOKEN_ENV).ok())
    }

    fn parse_from(
        mut pargs: pico_args::Arguments,
        env_token: Option<String>,
    ) -> Result<Option<Self>> {
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let token = pargs
            .opt_value_from_str::<_, String>("--token")
            .context("parsing token argument")?
            .or(env_token);
        let debug = pargs.contains("--debug");
        let extra = pargs
            .opt_value_from_str("--extra")
            .context("parsing extra argument")?;
        let start = pargs
            .opt_value_from_str("--start")
            .context("parsing start argument")?;
        let limit = pargs
            .opt_value_from_str("--limit")
            .context("parsing limit argument")?;
        let total = pargs
            .opt_value_from_str("--total")
            .context("parsing total argument")?;
        let params = pargs
            .values_from_fn("--param", parse_param)
            .context("parsing param argument")?;
        let fields = pargs
            .values_from_str("--field")
            .context("parsing field argument")?;
        let data = pargs
            .opt_value_from_fn("--data", |data| serde_json::from_str::<Value>(data))
            .context("parsing data argument")?;

        let verb = pargs.free_from_str().context("parsing method")?;
        let endpoint = pargs.free_from_str().context("parsing endpoint")?;
        let arg = pargs
            .opt_free_from_str::<String>()
            .context("parsing endpoint argument")?
            .map(|arg| match arg.parse::<u64>() {
                Ok(id) => EndpointArg::Id(id),
                Err(_) => EndpointArg::Name(arg),
            });

        // reported once logging is set up
        let remaining = pargs.finish();

        Ok(Some(Self {
            token,
            debug,
            verb,
            endpoint,
            arg,
            extra,
            start,
            limit,
            total,
            params,
            fields,
            data,
            remaining,
        }))
    }

    fn call(&self, client: &ApiClient) -> Result<ApiCall> {
        let mut call = client.endpoint(&self.endpoint, self.arg.clone())?;

        if let Some(extra) = &self.extra {
            call = call.with_extra(extra.as_str());
        }
        if let Some(start) = self.start {
            call = call.with_start(start);
        }
        if let Some(limit) = self.limit {
            call = call.with_limit(limit);
        }
        if let Some(total) = self.total {
            call = call.with_total(total);
        }
        for (name, value) in &self.params {
            call = call.with_param(name.as_str(), value.as_str());
        }
        for condition in &self.fields {
            call = call.with_field(condition.as_str());
        }

        Ok(call)
    }
}

fn parse_param(value: &str) -> Result<(String, String)> {
    let Some((name, value)) = value.split_once('=') else {
        bail!("expected NAME=VALUE, got '{value}'");
    };
    Ok((name.to_string(), value.to_string()))
}
