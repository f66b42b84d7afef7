//! Page 1: letterhead, vehicle band, the 40 x 12 checklist grid and the
//! monthly signature blocks

use chp_domain::model::{ChecklistItem, InspectionRecord, MonthSlot};
use chp_domain::service::{cell_marks, displayed_slot, format_for_document, CellMarks};
use tracing::warn;

use super::layout::{
    draw_letterhead, draw_vehicle_band, LayoutOptions, FRAME_LINE, LABEL_SIZE, MARGIN_LEFT,
    SMALL_SIZE, TEXT_SIZE, THIN_LINE, TINY_SIZE,
};
use super::metrics::{text_width, truncate_to_width};
use super::page::{Color, FieldKind, FontFace, FormField, Page};
use super::signature::{fit_within, SignatureDecoder};
use crate::constants::{CHECKLIST_INSTRUCTIONS, FORM_TITLE, SIGNED_FALLBACK};

const GRID_TOP: f32 = 530.0;
const NUMBER_COL_WIDTH: f32 = 18.0;
const DESCRIPTION_COL_WIDTH: f32 = 230.0;
const MONTH_COL_WIDTH: f32 = 43.0;
const MONTHS_LEFT: f32 = MARGIN_LEFT + NUMBER_COL_WIDTH + DESCRIPTION_COL_WIDTH;
const SUB_HEADER_HEIGHT: f32 = 8.0;
const HEADER_HEIGHT: f32 = SUB_HEADER_HEIGHT * 3.0;
const ROW_HEIGHT: f32 = 9.0;
const MARK_SIZE: f32 = 8.0;
const CHECKBOX_INSET: f32 = 1.0;

const BLOCK_COLUMNS: usize = 4;
const BLOCK_COL_PITCH: f32 = 191.0;

const DATES_TITLE_Y: f32 = 138.0;
const DATES_TOP: f32 = 129.0;
const DATES_ROW_PITCH: f32 = 9.0;
const DATE_VALUE_OFFSET: f32 = 42.0;

const SIGNATURE_TITLE_Y: f32 = 100.0;
const SIGNATURE_TOP: f32 = 96.0;
const SIGNATURE_BOX_WIDTH: f32 = 187.0;
const SIGNATURE_BOX_HEIGHT: f32 = 20.0;
const SIGNATURE_ROW_PITCH: f32 = 22.0;
const SIGNATURE_MAX_WIDTH: f32 = 70.0;
const SIGNATURE_MAX_HEIGHT: f32 = 10.0;

fn month_x(slot: MonthSlot) -> f32 {
    MONTHS_LEFT + slot.index() as f32 * MONTH_COL_WIDTH
}

/// Origin of a slot's cell in the 4 x 3 date and signature blocks
fn block_cell(slot: MonthSlot, top: f32, row_pitch: f32) -> (f32, f32) {
    let col = slot.index() % BLOCK_COLUMNS;
    let row = slot.index() / BLOCK_COLUMNS;
    (MARGIN_LEFT + col as f32 * BLOCK_COL_PITCH, top - row as f32 * row_pitch)
}

/// Checkbox field name for one half of a cell, e.g. `item23.MAR.def`
pub fn checkbox_name(item: &ChecklistItem, slot: MonthSlot, deficient: bool) -> String {
    let kind = if deficient { "def" } else { "ok" };
    format!("item{}.{}.{}", item.number(), slot.label(), kind)
}

/// Render the checklist page.
///
/// Signature images go through `decoder`; any failure is logged and the block
/// shows the fallback marker instead.
pub fn render_checklist_page(
    record: &InspectionRecord,
    decoder: &dyn SignatureDecoder,
    options: &LayoutOptions,
) -> Page {
    let mut page = Page::new();
    let band_top = draw_letterhead(&mut page, FORM_TITLE, true);
    draw_vehicle_band(&mut page, &record.vehicle, band_top);

    let rows_top = draw_grid_header(&mut page, record);
    for (row, item) in ChecklistItem::all().enumerate() {
        let bottom = rows_top - (row as f32 + 1.0) * ROW_HEIGHT;
        draw_item_row(&mut page, record, &item, bottom, options);
    }

    draw_inspection_dates(&mut page, record);
    draw_signature_blocks(&mut page, record, decoder);
    page
}

/// Column headers with the per-month odometer sub-header. Returns the top of
/// the first item row.
fn draw_grid_header(page: &mut Page, record: &InspectionRecord) -> f32 {
    let bottom = GRID_TOP - HEADER_HEIGHT;

    page.rect(MARGIN_LEFT, bottom, NUMBER_COL_WIDTH, HEADER_HEIGHT, FRAME_LINE);
    page.centered_text(
        MARGIN_LEFT + NUMBER_COL_WIDTH / 2.0,
        bottom + 10.0,
        LABEL_SIZE,
        FontFace::Bold,
        Color::BLACK,
        "ITEM",
    );

    let desc_x = MARGIN_LEFT + NUMBER_COL_WIDTH;
    page.rect(desc_x, bottom, DESCRIPTION_COL_WIDTH, HEADER_HEIGHT, FRAME_LINE);
    page.text(
        desc_x + 3.0,
        bottom + 13.0,
        TEXT_SIZE,
        FontFace::Bold,
        Color::BLACK,
        "INSPECTION ITEMS",
    );
    page.text(
        desc_x + 3.0,
        bottom + 4.0,
        LABEL_SIZE,
        FontFace::Regular,
        Color::GRAY,
        CHECKLIST_INSTRUCTIONS,
    );

    for (slot, entry) in record.months.iter() {
        let x = month_x(slot);
        let half = MONTH_COL_WIDTH / 2.0;

        let mileage_bottom = GRID_TOP - SUB_HEADER_HEIGHT;
        page.rect(x, mileage_bottom, MONTH_COL_WIDTH, SUB_HEADER_HEIGHT, THIN_LINE);
        page.text(x + 1.5, mileage_bottom + 2.5, 3.5, FontFace::Regular, Color::GRAY, "MILEAGE");
        let reading = truncate_to_width(
            &entry.odometer_reading,
            FontFace::Regular,
            4.5,
            MONTH_COL_WIDTH - 19.0,
        );
        page.text(x + 17.0, mileage_bottom + 2.5, 4.5, FontFace::Regular, Color::BLACK, reading);

        let label_bottom = mileage_bottom - SUB_HEADER_HEIGHT;
        page.rect(x, label_bottom, MONTH_COL_WIDTH, SUB_HEADER_HEIGHT, THIN_LINE);
        let label = displayed_slot(&entry.inspection_date, slot).label();
        page.centered_text(
            x + half,
            label_bottom + 2.0,
            SMALL_SIZE,
            FontFace::Bold,
            Color::BLACK,
            label,
        );

        page.rect(x, bottom, half, SUB_HEADER_HEIGHT, THIN_LINE);
        page.rect(x + half, bottom, half, SUB_HEADER_HEIGHT, THIN_LINE);
        page.centered_text(x + half / 2.0, bottom + 2.5, 4.5, FontFace::Bold, Color::BLACK, "OK");
        page.centered_text(x + half * 1.5, bottom + 2.5, 4.5, FontFace::Bold, Color::BLACK, "DEF");
    }

    bottom
}

fn draw_item_row(
    page: &mut Page,
    record: &InspectionRecord,
    item: &ChecklistItem,
    bottom: f32,
    options: &LayoutOptions,
) {
    let baseline = bottom + 2.5;
    let active = item.is_active(record.vehicle.has_air_brakes);
    let color = if active { Color::BLACK } else { Color::LIGHT_GRAY };

    page.rect(MARGIN_LEFT, bottom, NUMBER_COL_WIDTH, ROW_HEIGHT, THIN_LINE);
    page.centered_text(
        MARGIN_LEFT + NUMBER_COL_WIDTH / 2.0,
        baseline,
        TINY_SIZE,
        FontFace::Regular,
        color,
        &format!("{}.", item.number()),
    );

    let desc_x = MARGIN_LEFT + NUMBER_COL_WIDTH;
    page.rect(desc_x, bottom, DESCRIPTION_COL_WIDTH, ROW_HEIGHT, THIN_LINE);
    let description = truncate_to_width(
        item.description,
        FontFace::Regular,
        TEXT_SIZE,
        DESCRIPTION_COL_WIDTH - 8.0,
    );
    let text = if item.cvc_required {
        format!("* {}", description)
    } else {
        description
    };
    let text_x = desc_x + 2.0;
    if !active {
        let width = text_width(&text, FontFace::Regular, TEXT_SIZE);
        let strike_y = baseline + TEXT_SIZE * 0.3;
        page.line((text_x, strike_y), (text_x + width, strike_y), THIN_LINE, Color::GRAY);
    }
    page.text(text_x, baseline, TEXT_SIZE, FontFace::Regular, color, text);

    for slot in MonthSlot::ALL {
        let x = month_x(slot);
        let half = MONTH_COL_WIDTH / 2.0;
        page.rect(x, bottom, half, ROW_HEIGHT, THIN_LINE);
        page.rect(x + half, bottom, half, ROW_HEIGHT, THIN_LINE);

        let CellMarks::Active { passed, deficient } = cell_marks(record, item.index, slot) else {
            continue;
        };
        for (cell_x, checked, is_def) in [(x, passed, false), (x + half, deficient, true)] {
            let mark = if is_def { Color::RED } else { Color::BLACK };
            if options.interactive_fields {
                page.field(FormField {
                    name: checkbox_name(item, slot, is_def),
                    x: cell_x + CHECKBOX_INSET,
                    y: bottom + CHECKBOX_INSET,
                    width: half - 2.0 * CHECKBOX_INSET,
                    height: ROW_HEIGHT - 2.0 * CHECKBOX_INSET,
                    kind: FieldKind::CheckBox { checked, mark },
                });
            } else if checked {
                page.centered_text(
                    cell_x + half / 2.0,
                    bottom + 2.0,
                    MARK_SIZE,
                    FontFace::Bold,
                    mark,
                    "X",
                );
            }
        }
    }
}

/// Every slot's date under its month's full name, signed or not
fn draw_inspection_dates(page: &mut Page, record: &InspectionRecord) {
    page.text(
        MARGIN_LEFT,
        DATES_TITLE_Y,
        SMALL_SIZE,
        FontFace::Bold,
        Color::BLACK,
        "INSPECTION DATES:",
    );

    for (slot, entry) in record.months.iter() {
        let (x, y) = block_cell(slot, DATES_TOP, DATES_ROW_PITCH);
        let month = displayed_slot(&entry.inspection_date, slot).full_name().to_uppercase();
        page.text(x, y, TINY_SIZE, FontFace::Bold, Color::BLACK, format!("{}:", month));
        let date = format_for_document(&entry.inspection_date);
        page.text(x + DATE_VALUE_OFFSET, y, TINY_SIZE, FontFace::Regular, Color::BLACK, date);
    }
}

fn draw_signature_blocks(
    page: &mut Page,
    record: &InspectionRecord,
    decoder: &dyn SignatureDecoder,
) {
    page.text(
        MARGIN_LEFT,
        SIGNATURE_TITLE_Y,
        SMALL_SIZE,
        FontFace::Bold,
        Color::BLACK,
        "INSPECTOR SIGNATURES",
    );

    for (slot, entry) in record.months.iter() {
        let (x, top) = block_cell(slot, SIGNATURE_TOP, SIGNATURE_ROW_PITCH);
        let bottom = top - SIGNATURE_BOX_HEIGHT;
        let date_x = x + SIGNATURE_BOX_WIDTH - 55.0;

        page.rect(x, bottom, SIGNATURE_BOX_WIDTH, SIGNATURE_BOX_HEIGHT, THIN_LINE);
        let label = format!("{} INSPECTION", displayed_slot(&entry.inspection_date, slot).label());
        page.text(x + 3.0, top - 6.0, TINY_SIZE, FontFace::Bold, Color::BLACK, label);
        page.text(date_x, top - 6.0, LABEL_SIZE, FontFace::Regular, Color::GRAY, "DATE");
        page.line((x + 3.0, bottom + 3.0), (date_x - 6.0, bottom + 3.0), THIN_LINE, Color::GRAY);

        if !entry.is_signed() {
            continue;
        }
        let date = format_for_document(&entry.inspection_date);
        page.text(date_x, bottom + 4.0, TEXT_SIZE, FontFace::Regular, Color::BLACK, date);

        match decoder.decode(&entry.signature_image) {
            Ok(image) => {
                let (width, height) = fit_within(
                    image.width,
                    image.height,
                    SIGNATURE_MAX_WIDTH,
                    SIGNATURE_MAX_HEIGHT,
                );
                page.image(image, x + 4.0, bottom + 3.0, width, height);
            }
            Err(err) => {
                warn!(
                    slot = %slot,
                    error = %err,
                    "signature could not be embedded, using text marker"
                );
                page.text(
                    x + 5.0,
                    bottom + 5.0,
                    TEXT_SIZE,
                    FontFace::Regular,
                    Color::BLACK,
                    SIGNED_FALLBACK,
                );
            }
        }
    }
}
