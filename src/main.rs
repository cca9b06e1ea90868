use clap::Parser;
use sleeve_selector::config::{catalog_source, toml_config::TomlConfig};
use sleeve_selector::core::grid::{diameter_options, length_options};
use sleeve_selector::core::report::render;
use sleeve_selector::core::{ConfigProvider, Storage};
use sleeve_selector::utils::error::ErrorSeverity;
use sleeve_selector::utils::{logger, validation::Validate};
use sleeve_selector::{CliConfig, LocalStorage, Selector, SelectorError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let toml = TomlConfig::from_file(&path).and_then(|toml| {
            toml.validate()?;
            Ok(toml)
        });
        match toml {
            Ok(toml) => config.merge_toml(&toml),
            Err(e) => exit_with(e),
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    if config.list_options {
        print_options(&config);
        return Ok(());
    }

    for warning in config.off_grid_warnings() {
        tracing::warn!("⚠️ {}", warning);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Selection failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        exit_with(e);
    }

    Ok(())
}

async fn run(config: &CliConfig) -> sleeve_selector::Result<()> {
    let request = config.selection_request()?;
    let selector = Selector::new(catalog_source(config)?);
    let selection = selector.run(&request).await?;

    let report = render(&selection, config.output_format()?, config.detailed)?;

    match &config.output {
        Some(path) => {
            LocalStorage::default()
                .write_file(path, report.as_bytes())
                .await?;
            tracing::info!("📁 Report saved to: {}", path);
            println!("{} compatible sleeves, report saved to {}", selection.matches.len(), path);
        }
        None => print!("{}", report),
    }

    Ok(())
}

fn print_options(config: &CliConfig) {
    let join = |values: Vec<f64>| {
        values
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };

    println!("Diameter options (inches): {}", join(diameter_options()));
    println!(
        "Length options (inches): {}",
        join(length_options(config.length_grid_start()))
    );
}

fn exit_with(e: SelectorError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
