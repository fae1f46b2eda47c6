use std::env;

use log::*;
use stk_tools::StkConfig;
use tkg_common::parse_boolean_flag;

const DEFAULT_TKG_HOST: &str = "127.0.0.1";
const DEFAULT_TKG_PORT: u16 = 4700;
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The payment provider account used for STK pushes.
    pub stk: StkConfig,
    /// Where paid orders get POSTed so tickets can be generated and emailed.
    pub ticket_dispatch_url: Option<String>,
    /// Buffer size for the ticket-dispatch event channel.
    pub event_buffer_size: usize,
    /// When true, pending schema migrations run at startup.
    pub auto_migrate: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_TKG_HOST.to_string(),
            port: DEFAULT_TKG_PORT,
            database_url: String::default(),
            stk: StkConfig::default(),
            ticket_dispatch_url: None,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            auto_migrate: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("TKG_HOST").ok().unwrap_or_else(|| {
            warn!("🪛️ TKG_HOST is not set. Using the default {DEFAULT_TKG_HOST}");
            DEFAULT_TKG_HOST.into()
        });
        let port = env::var("TKG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for TKG_PORT. {e} Using the default {DEFAULT_TKG_PORT}.");
                    DEFAULT_TKG_PORT
                })
            })
            .unwrap_or_else(|_| {
                warn!("🪛️ TKG_PORT is not set. Using the default {DEFAULT_TKG_PORT}");
                DEFAULT_TKG_PORT
            });
        let database_url = env::var("TKG_DATABASE_URL").unwrap_or_else(|_| {
            warn!("🪛️ TKG_DATABASE_URL is not set. Using the default sqlite database");
            "sqlite://data/tikiti_store.db".into()
        });
        let ticket_dispatch_url = env::var("TKG_TICKET_DISPATCH_URL").ok();
        if ticket_dispatch_url.is_none() {
            warn!("🪛️ TKG_TICKET_DISPATCH_URL is not set. Paid orders will not trigger ticket dispatch");
        }
        let event_buffer_size = env::var("TKG_EVENT_BUFFER_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        let auto_migrate = parse_boolean_flag(env::var("TKG_AUTO_MIGRATE").ok(), true);
        let stk = StkConfig::new_from_env_or_default();
        Self { host, port, database_url, stk, ticket_dispatch_url, event_buffer_size, auto_migrate }
    }
}
