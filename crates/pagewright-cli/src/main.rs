use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pagewright_config::Config;
use pagewright_engine::{
    ComponentSpec, Dialect, EditorSession, equivalent, io, strip_preamble, to_source, to_visual,
};
use relative_path::RelativePathBuf;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod browse;

#[derive(Parser)]
#[command(name = "pagewright")]
#[command(about = "Convert page markup to editable HTML and back")]
struct Cli {
    /// Config file to use instead of ~/.config/pagewright/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the editable HTML for a page
    Visual { file: PathBuf },
    /// Convert edited HTML back into page markup
    Source {
        /// Edited HTML
        file: PathBuf,
        /// The page markup the HTML was produced from
        #[arg(long)]
        original: PathBuf,
    },
    /// Print a page with leaked preamble text removed
    Strip { file: PathBuf },
    /// Check that pages survive a round trip unchanged
    Check {
        /// Pages to check; defaults to the configured page set
        files: Vec<PathBuf>,
    },
    /// Print the JSON save payload for an edited page
    Payload {
        /// The page as stored
        file: PathBuf,
        /// Edited HTML for the page
        #[arg(long)]
        edited: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "Update page content")]
        message: String,
    },
    /// Browse and edit pages in the terminal
    Browse { site_root: Option<PathBuf> },
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let dialect = dialect_from(config.as_ref());

    match cli.command {
        Command::Visual { file } => {
            let source = read(&file)?;
            println!("{}", to_visual(&strip_preamble(&source, &dialect), &dialect));
        }
        Command::Source { file, original } => {
            let outcome = to_source(&read(&file)?, &read(&original)?, &dialect);
            for name in &outcome.dropped {
                eprintln!("warning: component <{name} /> could not be restored");
            }
            println!("{}", outcome.source);
        }
        Command::Strip { file } => {
            println!("{}", strip_preamble(&read(&file)?, &dialect));
        }
        Command::Check { files } => {
            let files = if files.is_empty() {
                match &config {
                    Some(config) => config.page_files()?,
                    None => bail!(
                        "No pages given and no config file found at {}",
                        Config::config_path().display()
                    ),
                }
            } else {
                files
            };
            return check(&files, &dialect);
        }
        Command::Payload {
            file,
            edited,
            title,
            message,
        } => {
            let mut session = EditorSession::open(dialect, &read(&file)?);
            session.edit(read(&edited)?);

            let title = title.unwrap_or_else(|| page_title(&file));
            let path = page_path(&file, config.as_ref());
            let request = session.save_request(&path, title, message);
            for name in &request.dropped {
                eprintln!("warning: component <{name} /> could not be restored");
            }
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Browse { site_root } => {
            let site_root = match (site_root, &config) {
                (Some(site_root), _) => site_root,
                (None, Some(config)) => config.site_root.clone(),
                (None, None) => bail!(
                    "No site root given and no config file found at {}",
                    Config::config_path().display()
                ),
            };
            io::validate_site_root(&site_root)
                .with_context(|| format!("Site root '{}' is invalid", site_root.display()))?;
            browse::run(site_root, dialect)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(explicit: Option<&Path>) -> Result<Option<Config>> {
    match explicit {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(Some(config)),
            None => bail!("Config file '{}' not found", path.display()),
        },
        None => Ok(Config::load()?),
    }
}

/// The built-in dialect extended with whatever the config adds.
fn dialect_from(config: Option<&Config>) -> Dialect {
    let mut dialect = Dialect::default();
    let Some(config) = config else {
        return dialect;
    };

    for namespace in &config.wrapper_namespaces {
        dialect = dialect.with_wrapper_namespace(namespace.clone());
    }
    for prefix in &config.leaked_prefixes {
        dialect = dialect.with_leaked_prefix(prefix.clone());
    }
    for component in &config.components {
        let spec = match &component.label {
            Some(label) => ComponentSpec::new(component.name.clone(), label.clone()),
            None => ComponentSpec::derived(component.name.clone()),
        };
        dialect = dialect.with_component(spec);
    }
    log::debug!("dialect has {} components", dialect.components.len());
    dialect
}

fn check(files: &[PathBuf], dialect: &Dialect) -> Result<ExitCode> {
    let mut failures = 0;
    for file in files {
        let source = strip_preamble(&read(file)?, dialect);
        let outcome = to_source(&to_visual(&source, dialect), &source, dialect);

        if !outcome.is_lossless() {
            failures += 1;
            println!("{}: dropped {}", file.display(), outcome.dropped.join(", "));
        } else if !equivalent(&outcome.source, &source) {
            failures += 1;
            println!("{}: changed by round trip", file.display());
        } else {
            println!("{}: ok", file.display());
        }
    }

    if failures > 0 {
        eprintln!("{failures} of {} pages did not round trip", files.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Page path for a save payload: relative to the configured site root when
/// the file lives under it, otherwise as given.
fn page_path(file: &Path, config: Option<&Config>) -> RelativePathBuf {
    let under_root = config.and_then(|config| {
        let absolute = fs::canonicalize(file).ok()?;
        let root = fs::canonicalize(&config.site_root).ok()?;
        io::to_relative(&absolute, &root)
    });
    under_root
        .or_else(|| RelativePathBuf::from_path(file).ok())
        .unwrap_or_else(|| RelativePathBuf::from(page_title(file)))
}

fn page_title(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_config::ComponentConfig;

    #[test]
    fn dialect_without_config_is_builtin() {
        assert_eq!(dialect_from(None), Dialect::default());
    }

    #[test]
    fn config_extends_dialect() {
        let mut config = Config::new("/srv/site");
        config.wrapper_namespaces.push("animated".to_string());
        config.leaked_prefixes.push("Back to site".to_string());
        config.components.push(ComponentConfig {
            name: "PricingTable".to_string(),
            label: None,
        });
        config.components.push(ComponentConfig {
            name: "Testimonials".to_string(),
            label: Some("Reviews".to_string()),
        });

        let dialect = dialect_from(Some(&config));

        assert_eq!(dialect.wrapper_parts("animated.div"), Some(("animated", "div")));
        assert!(dialect.leaked_prefixes.iter().any(|p| p == "Back to site"));
        assert_eq!(
            dialect.components.get("PricingTable").map(|c| c.label()),
            Some("Pricing Table Component")
        );
        assert_eq!(
            dialect.components.get("Testimonials").map(|c| c.label()),
            Some("Reviews")
        );
        assert_eq!(dialect.components.len(), 5);
    }

    #[test]
    fn page_title_from_file_stem() {
        assert_eq!(page_title(Path::new("src/pages/Home.jsx")), "Home");
    }

    #[test]
    fn page_path_falls_back_to_given_relative_path() {
        assert_eq!(
            page_path(Path::new("src/pages/Home.jsx"), None),
            RelativePathBuf::from("src/pages/Home.jsx")
        );
    }
}
