use super::*;
use std::path::{Path, PathBuf};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub struct Settings {
    pub future: eventual_future::Config,
    pub operands: Vec<i64>,
    pub threshold: i64,
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optflag("h", "help", "print this help menu")
        .optflag("v", "version", "print the version information")
        .optopt("c", "config", "use a custom configuration file", "FILE");
    opts
}

pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", PKG_NAME).map_or_else(
        || {
            cfg_if::cfg_if! {
                if #[cfg(unix)] {
                    Path::new("/etc").join(PKG_NAME)
                } else {
                    std::env::temp_dir().join(PKG_NAME)
                }
            }
        },
        |proj_dirs| proj_dirs.config_local_dir().to_path_buf(),
    )
}

fn init_logger(config: &config::Config) {
    let log_level = get(config, "log_level")
        .trace_expect("Invalid 'log_level' value in configuration")
        .unwrap_or("info".to_string())
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .expect("Invalid log level");

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(
            log_level > tracing_subscriber::filter::LevelFilter::from_level(tracing::Level::INFO),
        )
        .init();
}

pub fn init() -> Option<Settings> {
    // Parse cmdline
    let opts = options();
    let args: Vec<String> = std::env::args().collect();
    let program = args[0].clone();
    let flags = opts
        .parse(&args[1..])
        .expect("Failed to parse command line args");
    if flags.opt_present("h") {
        let brief = format!(
            "{PKG_NAME} {PKG_VERSION} - {PKG_DESCRIPTION}\n\nUsage: {program} [options]"
        );
        print!("{}", opts.usage(&brief));
        return None;
    }
    if flags.opt_present("v") {
        println!("{PKG_VERSION}");
        return None;
    }

    let mut b = config::Config::builder();

    // Add config file
    let config_source: String;
    if let Some(source) = flags.opt_str("config") {
        config_source =
            format!("Using base configuration file '{source}' specified on command line");
        b = b.add_source(config::File::with_name(&source).format(config::FileFormat::Toml))
    } else if let Ok(source) = std::env::var("EVENTUAL_DEMO_CONFIG_FILE") {
        config_source = format!(
            "Using base configuration file '{source}' specified by EVENTUAL_DEMO_CONFIG_FILE environment variable"
        );
        b = b.add_source(config::File::with_name(&source).format(config::FileFormat::Toml))
    } else {
        let path = config_dir().join(format!("{PKG_NAME}.config"));
        config_source = format!(
            "Using optional base configuration file '{}'",
            path.display()
        );
        b = b.add_source(
            config::File::from(path)
                .required(false)
                .format(config::FileFormat::Toml),
        )
    }

    // Pull in environment vars
    b = b.add_source(
        config::Environment::with_prefix("EVENTUAL_DEMO")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("operands"),
    );

    // And parse...
    let config = b.build().expect("Failed to load configuration");

    init_logger(&config);
    info!("{PKG_NAME} version {PKG_VERSION} starting...");
    info!("{config_source}");

    Some(load_settings(&config))
}

pub fn get<'de, T: serde::Deserialize<'de>>(
    config: &config::Config,
    key: &str,
) -> Result<Option<T>, config::ConfigError> {
    match config.get::<T>(key) {
        Ok(v) => Ok(Some(v)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn load_settings(config: &config::Config) -> Settings {
    let default_config = eventual_future::Config::default();
    let settings = Settings {
        future: eventual_future::Config {
            result_timeout: get(config, "result_timeout_ms")
                .trace_expect("Invalid 'result_timeout_ms' value in configuration")
                .map(|v: u64| eventual_async::time::from_std(std::time::Duration::from_millis(v)))
                .unwrap_or(default_config.result_timeout),
        },
        operands: get(config, "operands")
            .trace_expect("Invalid 'operands' value in configuration")
            .unwrap_or_else(|| vec![5, 3]),
        threshold: get(config, "threshold")
            .trace_expect("Invalid 'threshold' value in configuration")
            .unwrap_or(0),
    };

    if settings.operands.is_empty() {
        warn!("No 'operands' values in configuration, the product is 1");
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(s: &str) -> config::Config {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = load_settings(&from_toml(""));
        assert_eq!(settings.operands, vec![5, 3]);
        assert_eq!(settings.threshold, 0);
        assert_eq!(
            settings.future.result_timeout,
            eventual_future::Config::default().result_timeout
        );
    }

    #[test]
    fn test_overrides() {
        let settings = load_settings(&from_toml(
            r#"
            result_timeout_ms = 250
            operands = [2, 3, 7]
            threshold = 40
            "#,
        ));
        assert_eq!(settings.operands, vec![2, 3, 7]);
        assert_eq!(settings.threshold, 40);
        assert_eq!(
            settings.future.result_timeout,
            time::Duration::milliseconds(250)
        );
    }

    #[test]
    #[should_panic(expected = "Invalid 'threshold'")]
    fn test_invalid_value() {
        load_settings(&from_toml(r#"threshold = "lots""#));
    }
}
