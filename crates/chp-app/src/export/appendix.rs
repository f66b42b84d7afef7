//! Repair / deficiency appendix pages

use chp_domain::model::{DeficiencyRecord, VehicleInfo};
use chp_domain::service::format_for_document;

use super::layout::{
    draw_letterhead, draw_vehicle_band, LayoutOptions, CONTENT_WIDTH, FRAME_LINE, MARGIN_LEFT,
    SMALL_SIZE, TEXT_SIZE, THIN_LINE,
};
use super::metrics::truncate_to_width;
use super::page::{Color, FieldKind, FontFace, FormField, Page};
use crate::constants::APPENDIX_TITLE;

/// Table rows on every appendix page
pub const APPENDIX_ROWS_PER_PAGE: usize = 30;

const TABLE_GAP: f32 = 12.0;
const HEADER_HEIGHT: f32 = 14.0;
const ROW_HEIGHT: f32 = 15.0;
const MILEAGE_WIDTH: f32 = 90.0;
const DATE_WIDTH: f32 = 90.0;
const REPAIR_WIDTH: f32 = CONTENT_WIDTH - MILEAGE_WIDTH - DATE_WIDTH;
const FIELD_INSET: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Mileage,
    Date,
    Repair,
}

impl Column {
    const ALL: [Column; 3] = [Column::Mileage, Column::Date, Column::Repair];

    fn x(self) -> f32 {
        match self {
            Column::Mileage => MARGIN_LEFT,
            Column::Date => MARGIN_LEFT + MILEAGE_WIDTH,
            Column::Repair => MARGIN_LEFT + MILEAGE_WIDTH + DATE_WIDTH,
        }
    }

    fn width(self) -> f32 {
        match self {
            Column::Mileage => MILEAGE_WIDTH,
            Column::Date => DATE_WIDTH,
            Column::Repair => REPAIR_WIDTH,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Column::Mileage => "MILEAGE",
            Column::Date => "DATE",
            Column::Repair => "REPAIRS / DEFICIENCIES CORRECTED",
        }
    }

    /// Field name prefix; the 1-based row number across all pages follows
    fn field_prefix(self) -> &'static str {
        match self {
            Column::Mileage => "mileage",
            Column::Date => "date",
            Column::Repair => "repair",
        }
    }

    fn value(self, deficiency: &DeficiencyRecord) -> String {
        match self {
            Column::Mileage => deficiency.odometer_reading.clone(),
            Column::Date => format_for_document(&deficiency.inspection_date),
            Column::Repair => repair_description(deficiency),
        }
    }
}

/// Text printed in the repair column
pub fn repair_description(deficiency: &DeficiencyRecord) -> String {
    format!("Item {}: {}", deficiency.item_number(), deficiency.description)
}

/// Number of appendix pages needed for `count` deficiencies
pub fn appendix_page_count(count: usize) -> usize {
    count.div_ceil(APPENDIX_ROWS_PER_PAGE)
}

/// Paginate deficiencies into fixed 30-row tables.
///
/// No deficiencies means no pages. The final page is padded with blank rows
/// (editable fields in interactive mode).
pub fn render_appendix_pages(
    deficiencies: &[DeficiencyRecord],
    vehicle: &VehicleInfo,
    options: &LayoutOptions,
) -> Vec<Page> {
    deficiencies
        .chunks(APPENDIX_ROWS_PER_PAGE)
        .enumerate()
        .map(|(page_index, chunk)| {
            render_appendix_page(chunk, page_index * APPENDIX_ROWS_PER_PAGE, vehicle, options)
        })
        .collect()
}

fn render_appendix_page(
    chunk: &[DeficiencyRecord],
    first_row: usize,
    vehicle: &VehicleInfo,
    options: &LayoutOptions,
) -> Page {
    let mut page = Page::new();
    let band_top = draw_letterhead(&mut page, APPENDIX_TITLE, false);
    let band_bottom = draw_vehicle_band(&mut page, vehicle, band_top);

    let header_bottom = band_bottom - TABLE_GAP - HEADER_HEIGHT;
    for column in Column::ALL {
        page.rect(column.x(), header_bottom, column.width(), HEADER_HEIGHT, FRAME_LINE);
        page.text(
            column.x() + 3.0,
            header_bottom + 4.5,
            SMALL_SIZE,
            FontFace::Bold,
            Color::BLACK,
            column.heading(),
        );
    }

    for row in 0..APPENDIX_ROWS_PER_PAGE {
        let bottom = header_bottom - (row as f32 + 1.0) * ROW_HEIGHT;
        let deficiency = chunk.get(row);
        let row_number = first_row + row + 1;

        for column in Column::ALL {
            page.rect(column.x(), bottom, column.width(), ROW_HEIGHT, THIN_LINE);
            let value = deficiency.map(|d| column.value(d)).unwrap_or_default();

            if options.interactive_fields {
                page.field(FormField {
                    name: format!("{}_{}", column.field_prefix(), row_number),
                    x: column.x() + FIELD_INSET,
                    y: bottom + FIELD_INSET,
                    width: column.width() - 2.0 * FIELD_INSET,
                    height: ROW_HEIGHT - 2.0 * FIELD_INSET,
                    kind: FieldKind::Text {
                        value,
                        font_size: TEXT_SIZE,
                    },
                });
            } else {
                let value =
                    truncate_to_width(&value, FontFace::Regular, TEXT_SIZE, column.width() - 8.0);
                page.text(
                    column.x() + 3.0,
                    bottom + 5.0,
                    TEXT_SIZE,
                    FontFace::Regular,
                    Color::BLACK,
                    value,
                );
            }
        }
    }

    page
}
