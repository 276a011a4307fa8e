use std::fs;
use std::path::PathBuf;

use catalog::Catalog;
use clap::{Parser, Subcommand, ValueEnum};
use foundation::LocationId;
use i18n::Locale;
use map::MapConfig;
use order::{OrderConfig, OrderForm};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Checks the advertising-map datasets and order output")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Lang {
    Fr,
    En,
}

impl From<Lang> for Locale {
    fn from(l: Lang) -> Self {
        match l {
            Lang::Fr => Locale::Fr,
            Lang::En => Locale::En,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate both datasets and their FR/EN parity
    Validate {
        /// French dataset (default: the shipped one)
        #[arg(long)]
        fr: Option<PathBuf>,

        /// English dataset (default: the shipped one)
        #[arg(long)]
        en: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the padded bounds "show all locations" fits
    Bounds {
        #[arg(long, value_enum, default_value_t = Lang::Fr)]
        lang: Lang,

        /// Padding ratio (default: the site's)
        #[arg(long)]
        padding: Option<f64>,
    },

    /// Print the mailto: URI of an order
    Mailto {
        #[arg(long, value_enum, default_value_t = Lang::Fr)]
        lang: Lang,

        /// Location ids, comma separated (e.g. 1,5,12)
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u32>,

        #[arg(long, default_value = "")]
        company: String,

        #[arg(long, default_value = "")]
        contact: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        duration: String,

        #[arg(long)]
        message: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main(Args::parse()) {
        error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), String> {
    match args.command {
        Command::Validate { fr, en, json } => cmd_validate(fr, en, json),
        Command::Bounds { lang, padding } => cmd_bounds(lang.into(), padding),
        Command::Mailto {
            lang,
            ids,
            company,
            contact,
            email,
            phone,
            duration,
            message,
        } => {
            let form = OrderForm {
                company,
                contact,
                email,
                phone,
                duration,
                message,
            };
            let ids: Vec<LocationId> = ids.into_iter().map(LocationId).collect();
            let catalog = load_catalog(lang.into())?;
            let url = tools::mailto_preview(&catalog, &ids, &form, &OrderConfig::default())?;
            println!("{url}");
            Ok(())
        }
    }
}

fn cmd_validate(fr: Option<PathBuf>, en: Option<PathBuf>, json: bool) -> Result<(), String> {
    let fr_raw = read_dataset(fr, Locale::Fr)?;
    let en_raw = read_dataset(en, Locale::En)?;
    let report = tools::validate_datasets(&fr_raw, &en_raw);

    if json {
        let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
        println!("{payload}");
    } else {
        for (locale, count) in &report.counts {
            println!("{locale}: {count} locations");
        }
        for issue in &report.issues {
            println!("issue: {issue}");
        }
    }

    if report.is_ok() {
        info!("datasets are consistent");
        Ok(())
    } else {
        Err(format!("{} issue(s) found", report.issues.len()))
    }
}

fn cmd_bounds(locale: Locale, padding: Option<f64>) -> Result<(), String> {
    let catalog = load_catalog(locale)?;
    let mut config = MapConfig::default();
    if let Some(p) = padding {
        if !(0.0..=1.0).contains(&p) {
            return Err(format!("padding must be within [0, 1], got {p}"));
        }
        config.fit_padding = p;
    }
    let bounds = tools::fit_bounds(&catalog, &config)
        .ok_or_else(|| "dataset has no locations".to_string())?;
    println!(
        "south_west: {:.6}, {:.6}",
        bounds.south_west.lat, bounds.south_west.lng
    );
    println!(
        "north_east: {:.6}, {:.6}",
        bounds.north_east.lat, bounds.north_east.lng
    );
    Ok(())
}

fn read_dataset(path: Option<PathBuf>, locale: Locale) -> Result<String, String> {
    match path {
        Some(p) => fs::read_to_string(&p).map_err(|e| format!("read {p:?}: {e}")),
        None => {
            // Round-trip the shipped dataset so the same parser checks it.
            let catalog = load_catalog(locale)?;
            let locations: Vec<_> = catalog.iter().cloned().collect();
            serde_json::to_string(&locations).map_err(|e| format!("json: {e}"))
        }
    }
}

fn load_catalog(locale: Locale) -> Result<Catalog, String> {
    Catalog::for_locale(locale).map_err(|e| format!("{} dataset: {e}", locale.tag()))
}
