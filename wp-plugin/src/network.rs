//! # Network
//!
//! A shared [`reqwest::Client`] configured from the transport flags. SOCKS
//! proxying is driven by the `SOCKS_PROXY` variable some runners inject, the
//! usual `HTTP(S)_PROXY` variables are honoured as well.

use std::time::Duration;

use clap::Args;
use clap::builder::FalseyValueParser;
use reqwest::{Client, Proxy};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};

use crate::error::PluginError;
use crate::headings;

pub const NET_DIALER_TIMEOUT: Duration = Duration::from_secs(30);
pub const HTTP_TRANSPORT_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
pub const HTTP_TRANSPORT_MAX_IDLE_CONNS: usize = 100;

#[derive(Debug, Clone, Default, Args)]
#[command(next_help_heading = headings::PLUGIN)]
pub struct NetworkArgs {
  /// skip SSL verification
  #[arg(
    id = "transport.insecure-skip-verify",
    long = "transport.insecure-skip-verify",
    env = "PLUGIN_INSECURE_SKIP_VERIFY",
    action = clap::ArgAction::SetTrue,
    value_parser = FalseyValueParser::new()
  )]
  pub insecure_skip_verify: bool,

  /// socks proxy address
  #[arg(
    id = "transport.socks-proxy",
    long = "transport.socks-proxy",
    env = "SOCKS_PROXY",
    default_value = "",
    hide = true
  )]
  pub socks_proxy: String,

  /// socks proxy ignored
  #[arg(
    id = "transport.socks-proxy-off",
    long = "transport.socks-proxy-off",
    env = "SOCKS_PROXY_OFF",
    action = clap::ArgAction::SetTrue,
    value_parser = FalseyValueParser::new(),
    hide = true
  )]
  pub socks_proxy_off: bool,
}

/// Options for connecting to the network.
#[derive(Debug, Clone)]
pub struct Network {
  /// Whether TLS certificate verification is skipped
  pub insecure_skip_verify: bool,
  pub client: Client,
}

impl Network {
  /// Build the HTTP client. At trace level every connection's traffic is
  /// logged.
  pub fn from_args(args: &NetworkArgs, level: LevelFilter) -> Result<Self, PluginError> {
    let mut builder = Client::builder()
      .connect_timeout(NET_DIALER_TIMEOUT)
      .tcp_keepalive(NET_DIALER_TIMEOUT)
      .pool_idle_timeout(HTTP_TRANSPORT_IDLE_TIMEOUT)
      .pool_max_idle_per_host(HTTP_TRANSPORT_MAX_IDLE_CONNS)
      .danger_accept_invalid_certs(args.insecure_skip_verify)
      .connection_verbose(level >= LevelFilter::TRACE);

    if let Some(proxy) = socks_proxy(args) {
      builder = builder.proxy(proxy);
    }

    let client = builder.build().map_err(PluginError::HttpClient)?;

    Ok(Self {
      insecure_skip_verify: args.insecure_skip_verify,
      client,
    })
  }
}

fn socks_proxy(args: &NetworkArgs) -> Option<Proxy> {
  if args.socks_proxy.is_empty() || args.socks_proxy_off {
    return None;
  }

  let address = format!("socks5://{}", args.socks_proxy);
  match Proxy::all(&address) {
    Ok(proxy) => {
      debug!(proxy = %address, "Routing traffic through SOCKS proxy");
      Some(proxy)
    }
    Err(err) => {
      error!(error = %err, proxy = %address, "failed to create socks proxy");
      None
    }
  }
}
