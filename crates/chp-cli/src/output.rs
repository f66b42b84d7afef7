//! Output formatting module

use chp_domain::model::{DeficiencyRecord, FleetVehicle, MonthSlot};
use chp_domain::service::{format_for_document, NextInspection};
use chp_types::{OutputFormat, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// One line of the projected schedule
#[derive(Debug, Serialize)]
pub struct ScheduleRow {
    pub slot: MonthSlot,
    /// Calendar month of the date, printed on the form
    pub month: MonthSlot,
    pub date: Option<NaiveDate>,
    #[serde(skip)]
    pub display: String,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn print_schedule(output_format: OutputFormat, rows: &[ScheduleRow]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(rows);
    }

    println!("\nInspection Schedule");
    println!("===================");
    println!("{:<5} {:<6} {}", "Slot", "Month", "Date");
    for row in rows {
        println!("{:<5} {:<6} {}", row.slot.label(), row.month.label(), row.display);
    }
    Ok(())
}

pub fn print_next_inspection(
    output_format: OutputFormat,
    after: MonthSlot,
    next: Option<&NextInspection>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&next);
    }

    match next {
        Some(next) if next.days_until >= 0 => println!(
            "\nNext inspection after {}: {} on {} (in {} days)",
            after, next.slot, next.date, next.days_until
        ),
        Some(next) => println!(
            "\nNext inspection after {}: {} on {} ({} days overdue)",
            after,
            next.slot,
            next.date,
            -next.days_until
        ),
        None => println!("\nNo inspection scheduled after {}", after),
    }
    Ok(())
}

pub fn print_deficiencies(
    output_format: OutputFormat,
    deficiencies: &[DeficiencyRecord],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(deficiencies);
    }

    println!("\nDeficiencies ({})", deficiencies.len());
    println!("================");
    if deficiencies.is_empty() {
        println!("None");
        return Ok(());
    }
    println!("{:<5} {:<4} {:<11} {:<9} {}", "Item", "Mon", "Date", "Mileage", "Description");
    for d in deficiencies {
        println!(
            "{:<5} {:<4} {:<11} {:<9} {}",
            d.item_number(),
            d.slot.label(),
            format_for_document(&d.inspection_date),
            d.odometer_reading,
            d.description
        );
    }
    Ok(())
}

pub fn print_fleet(output_format: OutputFormat, vehicles: &[FleetVehicle]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicles);
    }

    println!("\nFleet ({} vehicles)", vehicles.len());
    println!("===================");
    println!("{:<12} {:<10} {:<20} {:<6} {}", "Unit", "License", "Make", "Year", "Brakes");
    for v in vehicles {
        println!(
            "{:<12} {:<10} {:<20} {:<6} {}",
            v.unit_number,
            v.license_number,
            v.make_model(),
            v.year,
            if v.has_air_brakes { "air" } else { "hydraulic" }
        );
    }
    Ok(())
}
