//! Whole-document layout: checklist page, appendix pages, footers

use chp_domain::model::InspectionRecord;
use chp_domain::service::collect_deficiencies;
use tracing::debug;

use super::appendix::render_appendix_pages;
use super::checklist_page::render_checklist_page;
use super::layout::{draw_footer, LayoutOptions};
use super::page::Page;
use super::signature::SignatureDecoder;

/// Lay out every page of the form. The checklist page always comes first;
/// footers are stamped once the total is known.
pub fn render_document(
    record: &InspectionRecord,
    decoder: &dyn SignatureDecoder,
    options: &LayoutOptions,
) -> Vec<Page> {
    let deficiencies = collect_deficiencies(record);
    let mut pages = vec![render_checklist_page(record, decoder, options)];
    pages.extend(render_appendix_pages(&deficiencies, &record.vehicle, options));

    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        draw_footer(page, index + 1, total);
    }
    debug!(pages = total, deficiencies = deficiencies.len(), "document laid out");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::signature::DataUriDecoder;
    use chp_domain::model::MonthSlot;

    #[test]
    fn test_clean_record_is_single_page() {
        let mut record = InspectionRecord::default();
        record.set_all_passed();
        let pages = render_document(&record, &DataUriDecoder, &LayoutOptions::default());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains_text("Page 1 of 1"));
    }

    #[test]
    fn test_deficient_month_adds_two_appendix_pages() {
        let mut record = InspectionRecord::default();
        record.toggle_deficient(MonthSlot::Feb);
        let pages = render_document(&record, &DataUriDecoder, &LayoutOptions::default());
        // 40 deficiencies: 30 + 10
        assert_eq!(pages.len(), 3);
        assert!(pages[2].contains_text("Page 3 of 3"));
    }
}
