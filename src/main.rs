mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod figure;
mod savefig;
mod scale;
mod ui;

#[cfg(test)]
mod test_util;

use anyhow::Context;
use clap::Parser;

use cli::Args;
use config::PlotConfig;
use data::{combine, export, loader, select};
use figure::Figure;

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Parse, load, optionally combine, then show or save the figure.
fn run(args: &Args) -> anyhow::Result<()> {
    let config = PlotConfig::from_args(args)?;
    log::debug!("{config:?}");
    if config.markers != "osdv*" {
        log::debug!("--markers {} is accepted but not drawn", config.markers);
    }

    let mut datasets = loader::load_sources(&config.sources).context("loading sources")?;

    if let Some(factors) = &config.file_factors {
        datasets = combine::combine_files(&datasets, factors).context("combining files")?;
    }

    let columns = select::resolve_columns(&config.columns, datasets.ncols())?;

    if let Some(factors) = &config.column_factors {
        combine::combine_columns(&datasets, &columns, factors, config.subplots.len())?;
    }

    if let Some(path) = &config.dump {
        export::write_table(&datasets, path)?;
    }

    let figure = Figure::build(&datasets, &columns, &config);
    match &config.savefig {
        Some(path) => savefig::save_figure(&figure, path)
            .with_context(|| format!("saving {}", path.display()))?,
        None => app::show_blocking(figure).context("displaying figure")?,
    }
    Ok(())
}
