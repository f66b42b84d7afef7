//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{
    print_deficiencies, print_fleet, print_next_inspection, print_schedule, ScheduleRow,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chp_app::app::{generate_document, ExportOptions};
use chp_app::config::Config;
use chp_app::export::export_repair_log;
use chp_app::repository::{open_fleet_repo, open_record_repo};
use chp_domain::model::{DeficiencyRate, InspectionRecord, MonthSlot};
use chp_domain::repository::{FleetRepository, InspectionRecordRepository};
use chp_domain::service::schedule::{displayed_slot, parse_iso_date};
use chp_domain::service::{
    collect_deficiencies, format_for_display, next_inspection_info, project_schedule,
    RngIndexSource,
};
use chp_types::{Error, Result};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn execute(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone();
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Schedule {
            anchor,
            after,
            today,
        } => {
            let rows = schedule_rows(&anchor)?;
            print_schedule(format, &rows)?;
            if let Some(slot) = after {
                let today = today.unwrap_or_else(|| Local::now().date_naive());
                let next = next_inspection_info(slot, &project_schedule(&anchor), today);
                print_next_inspection(format, slot, next.as_ref())?;
            }
            Ok(())
        }

        Commands::New {
            output,
            unit,
            anchor,
            all_ok,
            all_def,
            odometers,
            rates,
            seed,
            signature,
        } => {
            let args = NewRecordArgs {
                unit,
                anchor,
                all_ok,
                all_def,
                odometers,
                rates,
                seed,
                signature,
            };
            cmd_new(&config, &args, output)
        }

        Commands::Export {
            record,
            output_dir,
            xlsx,
            flat,
        } => cmd_export(&config, &record, output_dir, xlsx, flat),

        Commands::Deficiencies { record } => {
            let record = open_record_repo(record).load()?;
            print_deficiencies(format, &collect_deficiencies(&record))
        }

        Commands::Fleet => {
            let fleet = open_fleet_repo(&config)?;
            print_fleet(format, &fleet.find_all()?)
        }

        Commands::Config { show, sets, reset } => {
            cmd_config(config_path.as_deref(), show, &sets, reset)
        }
    }
}

fn schedule_rows(anchor: &str) -> Result<Vec<ScheduleRow>> {
    if parse_iso_date(anchor).is_none() {
        return Err(Error::InvalidRecord(format!(
            "invalid anchor date '{}' (expected YYYY-MM-DD)",
            anchor
        )));
    }
    let schedule = project_schedule(anchor);
    Ok(schedule
        .iter()
        .map(|(slot, date)| {
            let iso = date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
            ScheduleRow {
                slot,
                month: displayed_slot(&iso, slot),
                display: format_for_display(&iso),
                date: *date,
            }
        })
        .collect())
}

/// Flags of the `new` command
#[derive(Debug, Default)]
struct NewRecordArgs {
    unit: Option<String>,
    anchor: Option<String>,
    all_ok: bool,
    all_def: bool,
    odometers: Vec<String>,
    rates: Vec<String>,
    seed: Option<u64>,
    signature: Option<PathBuf>,
}

fn cmd_new(config: &Config, args: &NewRecordArgs, output: PathBuf) -> Result<()> {
    let fleet = open_fleet_repo(config)?;
    let record = build_record(config, &fleet, args)?;
    open_record_repo(output.clone()).save(&record)?;
    println!("Record written to: {}", output.display());
    Ok(())
}

fn build_record(
    config: &Config,
    fleet: &dyn FleetRepository,
    args: &NewRecordArgs,
) -> Result<InspectionRecord> {
    let mut record = InspectionRecord::new(&config.carrier_name);

    if let Some(unit) = &args.unit {
        let vehicle = fleet
            .find_by_unit(unit)?
            .ok_or_else(|| Error::UnknownUnit(unit.clone()))?;
        record.apply_fleet_vehicle(&vehicle);
    }

    if let Some(anchor) = &args.anchor {
        if parse_iso_date(anchor).is_none() {
            return Err(Error::InvalidRecord(format!(
                "invalid anchor date '{}' (expected YYYY-MM-DD)",
                anchor
            )));
        }
        record.apply_anchor_date(anchor);
    }

    if args.all_ok {
        record.set_all_passed();
    }
    if args.all_def {
        record.set_all_deficient();
    }

    for assignment in &args.odometers {
        let (slot, reading) = parse_assignment(assignment)?;
        record.set_odometer(slot, reading);
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut source = RngIndexSource(rng);
    for assignment in &args.rates {
        let (slot, value) = parse_assignment(assignment)?;
        let percent: u8 = value
            .parse()
            .map_err(|_| Error::InvalidRecord(format!("invalid rate '{}' for {}", value, slot)))?;
        let rate = DeficiencyRate::try_from(percent).map_err(Error::InvalidRecord)?;
        record.apply_deficiency_rate(slot, rate, &mut source);
    }

    if let Some(path) = &args.signature {
        let uri = signature_data_uri(path)?;
        let signed = record.sign_all_marked(&uri);
        info!(signed, "signature applied to marked months");
    }

    Ok(record)
}

/// Split `SLOT=VALUE`
fn parse_assignment(assignment: &str) -> Result<(MonthSlot, &str)> {
    let (slot, value) = assignment
        .split_once('=')
        .ok_or_else(|| Error::InvalidRecord(format!("expected SLOT=VALUE, got '{}'", assignment)))?;
    let slot: MonthSlot = slot.parse().map_err(Error::InvalidRecord)?;
    Ok((slot, value.trim()))
}

/// Read a PNG or JPEG file into a base64 data URI
fn signature_data_uri(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => {
            return Err(Error::InvalidRecord(format!(
                "signature must be a .png or .jpg file: {}",
                path.display()
            )))
        }
    };
    let bytes = std::fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn cmd_export(
    config: &Config,
    record_path: &Path,
    output_dir: Option<PathBuf>,
    xlsx: bool,
    flat: bool,
) -> Result<()> {
    let record = open_record_repo(record_path.to_path_buf()).load()?;

    let mut options = ExportOptions::from_config(config, today());
    if flat {
        options.interactive_fields = false;
    }
    let document = generate_document(&record, &options)?;

    let output_dir = output_dir.unwrap_or_else(|| config.output_dir());
    std::fs::create_dir_all(&output_dir)?;
    let pdf_path = output_dir.join(&document.filename);
    std::fs::write(&pdf_path, &document.pdf)?;
    println!("Exported {} page(s) to: {}", document.page_count, pdf_path.display());

    if xlsx {
        let xlsx_path = pdf_path.with_extension("xlsx");
        export_repair_log(&collect_deficiencies(&record), &record.vehicle, &xlsx_path)?;
        println!("Repair log: {}", xlsx_path.display());
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn cmd_config(path: Option<&Path>, show: bool, sets: &[String], reset: bool) -> Result<()> {
    let save = |config: &Config| match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    };

    if reset {
        let config = Config::default();
        save(&config)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    for assignment in sets {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| {
                Error::InvalidRecord(format!("expected KEY=VALUE, got '{}'", assignment))
            })?;
        config.set(key.trim(), value)?;
    }

    let modified = !sets.is_empty();
    if modified {
        save(&config)?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
