//! Excel export of the deficiency repair log

use chp_domain::model::{DeficiencyRecord, VehicleInfo};
use chp_domain::service::format_for_document;
use chp_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Export the repair log to an Excel file
pub fn export_repair_log(
    deficiencies: &[DeficiencyRecord],
    vehicle: &VehicleInfo,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = build_workbook(deficiencies, vehicle)?;
    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;
    Ok(())
}

/// Same workbook as [`export_repair_log`], returned as bytes
pub fn repair_log_to_buffer(
    deficiencies: &[DeficiencyRecord],
    vehicle: &VehicleInfo,
) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(deficiencies, vehicle)?;
    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(e.to_string()))
}

fn build_workbook(deficiencies: &[DeficiencyRecord], vehicle: &VehicleInfo) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_repair_sheet(sheet, deficiencies, vehicle)?;
    Ok(workbook)
}

fn write_repair_sheet(
    sheet: &mut Worksheet,
    deficiencies: &[DeficiencyRecord],
    vehicle: &VehicleInfo,
) -> Result<()> {
    sheet
        .set_name("Repair Log")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "CHP 108A Repair Log", &header_format)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let vehicle_rows = [
        ("Carrier:", vehicle.carrier_name.as_str()),
        ("Unit:", vehicle.unit_number.as_str()),
        ("License:", vehicle.license_number.as_str()),
    ];
    for (offset, (label, value)) in vehicle_rows.iter().enumerate() {
        let row = 1 + offset as u32;
        sheet
            .write_string(row, 0, *label)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, *value)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    let headers = ["Item", "Description", "Month", "Date", "Mileage"];
    let header_row = 5;
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(header_row, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, deficiency) in deficiencies.iter().enumerate() {
        let row = header_row + 1 + row_idx as u32;
        sheet
            .write_number(row, 0, deficiency.item_number() as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, deficiency.description)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 2, deficiency.slot.label())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 3, format_for_document(&deficiency.inspection_date))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 4, &deficiency.odometer_reading)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (col, width) in [(0u16, 6.0), (1, 60.0), (2, 8.0), (3, 12.0), (4, 12.0)] {
        sheet
            .set_column_width(col, width)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    Ok(())
}
