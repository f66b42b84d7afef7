//! Blocks shared by every page: letterhead, vehicle band and footer

use chp_domain::model::VehicleInfo;

use super::metrics::truncate_to_width;
use super::page::{Color, FontFace, Page, PAGE_WIDTH};
use crate::constants::{
    AGENCY_DEPARTMENT, AGENCY_STATE, CVC_NOTE, FORM_REVISION, REPRODUCTION_NOTICE,
};

pub const MARGIN_LEFT: f32 = 14.0;
pub const CONTENT_RIGHT: f32 = PAGE_WIDTH - MARGIN_LEFT;
pub const CONTENT_WIDTH: f32 = CONTENT_RIGHT - MARGIN_LEFT;

pub const TITLE_SIZE: f32 = 12.0;
pub const HEADER_SIZE: f32 = 8.0;
pub const TEXT_SIZE: f32 = 7.0;
pub const SMALL_SIZE: f32 = 6.0;
pub const TINY_SIZE: f32 = 5.5;
pub const LABEL_SIZE: f32 = 5.0;

pub const THIN_LINE: f32 = 0.5;
pub const FRAME_LINE: f32 = 0.8;

const LETTERHEAD_TOP: f32 = 592.0;
const VEHICLE_BAND_HEIGHT: f32 = 20.0;

/// Layout switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Emit checkbox and text fields that stay editable after export
    pub interactive_fields: bool,
}

/// Agency lines, form title and revision line. Returns the y just below the
/// block.
pub fn draw_letterhead(page: &mut Page, title: &str, with_cvc_note: bool) -> f32 {
    let mut y = LETTERHEAD_TOP;
    page.text(MARGIN_LEFT, y, SMALL_SIZE, FontFace::Regular, Color::BLACK, AGENCY_STATE);
    y -= 8.0;
    page.text(MARGIN_LEFT, y, SMALL_SIZE, FontFace::Bold, Color::BLACK, AGENCY_DEPARTMENT);
    page.centered_text(PAGE_WIDTH / 2.0, y - 4.0, TITLE_SIZE, FontFace::Bold, Color::BLACK, title);
    y -= 14.0;
    page.text(MARGIN_LEFT, y, TINY_SIZE, FontFace::Regular, Color::GRAY, FORM_REVISION);
    if with_cvc_note {
        page.right_aligned_text(
            CONTENT_RIGHT,
            y,
            TINY_SIZE,
            FontFace::Regular,
            Color::RED,
            CVC_NOTE,
        );
    }
    y - 8.0
}

/// Labelled boxes across the page: carrier, unit, year, make, license and
/// brake system. Returns the bottom edge of the band.
pub fn draw_vehicle_band(page: &mut Page, vehicle: &VehicleInfo, top: f32) -> f32 {
    let brakes = if vehicle.has_air_brakes { "AIR" } else { "HYDRAULIC" };
    let boxes: [(&str, &str, f32); 6] = [
        ("CARRIER NAME", &vehicle.carrier_name, 250.0),
        ("UNIT NUMBER", &vehicle.unit_number, 100.0),
        ("YEAR", &vehicle.year, 60.0),
        ("MAKE", &vehicle.make_model, 130.0),
        ("LICENSE NUMBER", &vehicle.license_number, 110.0),
        ("BRAKE SYSTEM", brakes, CONTENT_WIDTH - 650.0),
    ];

    let bottom = top - VEHICLE_BAND_HEIGHT;
    let mut x = MARGIN_LEFT;
    for (label, value, width) in boxes {
        page.rect(x, bottom, width, VEHICLE_BAND_HEIGHT, THIN_LINE);
        page.text(x + 2.0, top - 6.0, LABEL_SIZE, FontFace::Regular, Color::GRAY, label);
        let value = truncate_to_width(value, FontFace::Regular, HEADER_SIZE, width - 6.0);
        page.text(x + 3.0, bottom + 4.0, HEADER_SIZE, FontFace::Regular, Color::BLACK, value);
        x += width;
    }
    bottom
}

/// Stamp the static footer once the total page count is known
pub fn draw_footer(page: &mut Page, number: usize, total: usize) {
    let y = 14.0;
    page.text(MARGIN_LEFT, y + 8.0, TINY_SIZE, FontFace::Regular, Color::BLACK, CVC_NOTE);
    page.text(MARGIN_LEFT, y, TINY_SIZE, FontFace::Regular, Color::GRAY, FORM_REVISION);
    page.centered_text(
        PAGE_WIDTH / 2.0,
        y,
        SMALL_SIZE,
        FontFace::Regular,
        Color::BLACK,
        &format!("Page {} of {}", number, total),
    );
    page.right_aligned_text(
        CONTENT_RIGHT,
        y,
        LABEL_SIZE,
        FontFace::Regular,
        Color::GRAY,
        REPRODUCTION_NOTICE,
    );
}
