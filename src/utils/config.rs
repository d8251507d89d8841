#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use serde::Deserialize;
use std::{env, fs, path::Path};
use lazy_static::lazy_static;
use structopt::StructOpt;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::utils::{album_utils, errors::Errors};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations.  All files and directories are relative to
// the root directory.
const ENV_ALBUM_ROOT_DIR   : &str = "ALBUM_SERVER_ROOT_DIR";
const DEFAULT_ROOT_DIR     : &str = "~/.album_server";
const CONFIG_DIR           : &str = "/config";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml";       // relative to config dir
const ALBUM_CONFIG_FILE    : &str = "/album_server.toml"; // relative to config dir

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "127.0.0.1";
const DEFAULT_HTTP_PORT    : u16  = 8080;

// Used when no log4rs configuration file is installed.
const CONSOLE_LOG_PATTERN  : &str = "{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE the runtime context is built in main.
lazy_static! {
    pub static ref ALBUM_ARGS: AlbumArgs = init_album_args();
}

// Calculate the data directories BEFORE the runtime context is built in main.
lazy_static! {
    pub static ref ALBUM_DIRS: AlbumDirs = init_album_dirs();
}

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// AlbumDirs:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct AlbumDirs {
    pub root_dir: String,
    pub config_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// AlbumArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, Default, StructOpt)]
#[structopt(name = "album_server", about = "Command line arguments for the Album Server.")]
pub struct AlbumArgs {
    /// Specify the server's root data directory.
    ///
    /// The configuration files are read from the config subdirectory.  The
    /// root directory is calculated using the following priority order:
    ///
    ///   1. If set, the value of the ALBUM_SERVER_ROOT_DIR environment variable,
    ///
    ///   2. Otherwise, if set, the value of the --root-dir command line argument,
    ///
    ///   3. Otherwise, ~/.album_server
    ///
    #[structopt(short, long)]
    pub root_dir: Option<String>,

    /// Listen address, overrides http_addr in the configuration file.
    #[structopt(short = "a", long)]
    pub http_addr: Option<String>,

    /// Listen port, overrides http_port in the configuration file.
    #[structopt(short = "p", long)]
    pub http_port: Option<u16>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub album_args: &'static AlbumArgs,
    pub album_dirs: &'static AlbumDirs,
}

impl RuntimeCtx {
    /// The host:port the server listens on.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.parms.config.http_addr, self.parms.config.http_port)
    }
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// Command line values take precedence over the configuration file.
    fn apply_args(mut self, args: &AlbumArgs) -> Self {
        if let Some(addr) = &args.http_addr {
            self.http_addr = addr.clone();
        }
        if let Some(port) = args.http_port {
            self.http_port = port;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Album Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_album_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_album_args() -> AlbumArgs {
    AlbumArgs::from_args()
}

// ---------------------------------------------------------------------------
// init_album_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories.  The directories are not created;
 * a missing config directory just means defaults are used.
 */
fn init_album_dirs() -> AlbumDirs {
    let root_dir = get_root_dir(env::var(ENV_ALBUM_ROOT_DIR).ok(), &ALBUM_ARGS);
    let config_dir = root_dir.clone() + CONFIG_DIR;
    AlbumDirs {root_dir, config_dir}
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir(env_root: Option<String>, args: &AlbumArgs) -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env_root.unwrap_or_else(
        || {
            match args.root_dir.clone() {
                Some(r) => r,
                None => DEFAULT_ROOT_DIR.to_string(),
            }
        });

    album_utils::get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the config directory's log4rs.yml.  When that file
 * doesn't exist, log INFO and above to the console.
 */
pub fn init_log() -> Result<()> {
    let logconfig = init_log_config();
    if Path::new(&logconfig).exists() {
        if let Err(e) = log4rs::init_file(&logconfig, Default::default()) {
            let msg = format!("{}\n   {}", Errors::Log4rsInitialization(logconfig), e);
            return Result::Err(anyhow!(msg));
        }
        info!("Log4rs initialized using: {}", logconfig);
    } else {
        init_console_log()?;
        info!("Log4rs configuration file {} not found, logging to console.", logconfig);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// init_console_log:
// ---------------------------------------------------------------------------
fn init_console_log() -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_LOG_PATTERN)))
        .build();
    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// init_log_config:
// ---------------------------------------------------------------------------
fn init_log_config() -> String {
    ALBUM_DIRS.config_dir.clone() + LOG4RS_CONFIG_FILE
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * config directory.  If the file can't be read the default values are used;
 * if it can be read but not parsed, startup fails.  Command line overrides
 * are applied last.
 */
fn get_parms() -> Result<Parms> {
    let config_file = ALBUM_DIRS.config_dir.clone() + ALBUM_CONFIG_FILE;

    // Read the configuration file.
    let config_file_abs = album_utils::get_absolute_path(&config_file);
    info!("{}", Errors::ReadingConfigFile(config_file_abs.clone()));
    let contents = match fs::read_to_string(&config_file_abs) {
        Ok(c) => c,
        Err(_) => {
            info!("Unable to read configuration at {}. Using default values.", config_file_abs);
            return Ok(Parms { config_file: Default::default(), config: Config::new().apply_args(&ALBUM_ARGS) });
        }
    };

    let config = parse_config(&contents, &config_file_abs)?.apply_args(&ALBUM_ARGS);
    Ok(Parms { config_file: config_file_abs, config })
}

// ---------------------------------------------------------------------------
// parse_config:
// ---------------------------------------------------------------------------
fn parse_config(contents: &str, config_file: &str) -> Result<Config> {
    match toml::from_str(contents) {
        Ok(c)  => Ok(c),
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file.to_string()), e);
            error!("{}", msg);
            Result::Err(anyhow!(msg))
        }
    }
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> Result<RuntimeCtx> {
    let parms = get_parms()?;
    Ok(RuntimeCtx {parms, album_args: &ALBUM_ARGS, album_dirs: &ALBUM_DIRS})
}
