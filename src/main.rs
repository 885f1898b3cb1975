use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use inquire::error::InquireResult;

mod cli;
mod config;
mod dashboard;
mod error;
mod prompt;
mod search_query;
mod site;
mod site_text;
mod storage;
#[cfg(test)]
mod tests;
mod url_normalize;
mod web;

use config::Config;
use dashboard::Dashboard;
use site::Site;

fn read_input(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("couldnt read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("couldnt read stdin")?;
            Ok(buf)
        }
    }
}

fn confirm(message: String) -> anyhow::Result<bool> {
    match inquire::prompt_confirmation(message) {
        InquireResult::Ok(answer) => Ok(answer),
        InquireResult::Err(err) => bail!("An error occurred: {}", err),
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Parse { file } => {
            let text = read_input(file)?;
            let site = site_text::parse(&text)?;
            println!("{}", serde_json::to_string_pretty(&site)?);
            Ok(())
        }

        cli::Command::Format { file } => {
            let json = read_input(file)?;
            let site: Site = serde_json::from_str(&json).context("input is not a site json")?;
            println!("{}", site_text::serialize(&site));
            Ok(())
        }

        cli::Command::Search { query, count } => {
            let config = Config::load()?;
            let dash = Dashboard::new(config.site_store()?.load()?);
            let view = dash.search(&query);

            if count {
                println!("{} sites found", view.sites.len());
                return Ok(());
            }

            println!("{}", serde_json::to_string_pretty(&view.sites)?);
            if let Some(url) = view.detected_url {
                log::info!("{url} is not stored yet, add it with `sitedash prompt {url}`");
            }
            Ok(())
        }

        cli::Command::Detect { input } => {
            let config = Config::load()?;
            let sites = config.site_store()?.load()?;

            match url_normalize::detect_url(&input) {
                Some(url) => {
                    let exists = url_normalize::site_exists(&sites, &url);
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "url": url,
                            "exists": exists,
                        }))?
                    );
                }
                None => println!("null"),
            }
            Ok(())
        }

        cli::Command::Add { file, yes } => {
            let config = Config::load()?;
            let store = config.site_store()?;
            let text = read_input(file)?;
            let site = site_text::parse(&text)?;

            let mut dash = Dashboard::new(store.load()?);
            if !yes && dash.find(&site.url).is_some() {
                let message = format!("A site at {} already exists. Replace it?", site.url);
                if !confirm(message)? {
                    return Ok(());
                }
            }

            let (site, overwritten) = dash.upsert(site);
            println!("{}", serde_json::to_string_pretty(site)?);
            log::info!(
                "site {}",
                if overwritten { "updated" } else { "created" }
            );

            store.save(dash.sites())?;
            Ok(())
        }

        cli::Command::Remove { url, yes } => {
            let config = Config::load()?;
            let store = config.site_store()?;
            let mut dash = Dashboard::new(store.load()?);

            let Some(site) = dash.find(&url) else {
                bail!("no site stored at {url}");
            };

            if !yes {
                let message = format!("Are you sure you want to delete \"{}\"?", site.name);
                if !confirm(message)? {
                    return Ok(());
                }
            }

            if let Some(removed) = dash.remove(&url) {
                store.save(dash.sites())?;
                println!("{} removed", removed.name);
            }
            Ok(())
        }

        cli::Command::Prompt { url } => {
            let config = Config::load()?;
            let url = url_normalize::detect_url(&url).unwrap_or(url);
            let rules = prompt::load_rules(&config)?;
            println!("{}", prompt::build_prompt(&url, &rules));
            Ok(())
        }

        cli::Command::Daemon {} => {
            let config = Config::load()?;
            web::start_daemon(config)
        }
    }
}
