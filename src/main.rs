use clap::Parser;
use gradebook_loader::utils::{logger, validation::Validate};
use gradebook_loader::{
    CliConfig, DataLoader, FileConfig, LoaderOptions, LocalStorage, RequestDispatcher,
    SnapshotSink, Storage,
};
use std::sync::Arc;

struct RunSettings {
    options: LoaderOptions,
    base_url: String,
    concurrent_requests: usize,
    output_path: String,
    output_filename: String,
}

fn settings_from(cli: &CliConfig) -> Result<RunSettings, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        let file = FileConfig::from_file(path)?;
        Ok(RunSettings {
            options: file.loader_options(),
            base_url: file.base_url().to_string(),
            concurrent_requests: file.concurrent_requests(),
            output_path: file.output_path().to_string(),
            output_filename: file.output_filename().to_string(),
        })
    } else {
        cli.validate()?;
        Ok(RunSettings {
            options: cli.loader_options(),
            base_url: cli.base_url.clone(),
            concurrent_requests: cli.concurrent_requests,
            output_path: cli.output_path.clone(),
            output_filename: "gradebook.json".to_string(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gradebook-loader");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match settings_from(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration invalid: {}", e);
            eprintln!("Configuration invalid: {}", e);
            std::process::exit(2);
        }
    };

    let dispatch = RequestDispatcher::new(&settings.base_url, settings.concurrent_requests)?;
    let loader = DataLoader::new(dispatch);
    let sink = Arc::new(SnapshotSink::new());

    match loader
        .load_gradebook_data(&settings.options, sink.clone())
        .await
    {
        Ok(data) => {
            let snapshot = sink.snapshot();
            let payload = serde_json::json!({
                "gradebook": data,
                "content": snapshot,
            });
            let storage = LocalStorage::new(settings.output_path.clone());
            storage
                .write_file(
                    &settings.output_filename,
                    &serde_json::to_vec_pretty(&payload)?,
                )
                .await?;

            tracing::info!(
                "Loaded {} students, {} submission groups, {} custom columns in {:?}",
                data.stats.students_loaded,
                data.stats.submission_groups_loaded,
                data.custom_columns.len(),
                data.stats.duration
            );
            println!(
                "Gradebook for course {} saved to {}/{}",
                settings.options.course_id, settings.output_path, settings.output_filename
            );
        }
        Err(e) => {
            tracing::error!("Gradebook load failed: {}", e);
            eprintln!("Gradebook load failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
