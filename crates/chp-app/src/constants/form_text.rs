/// Document title stored in the PDF metadata
pub const DOCUMENT_TITLE: &str = "CHP 108A Bus Maintenance & Safety Inspection";

pub const AGENCY_STATE: &str = "STATE OF CALIFORNIA";
pub const AGENCY_DEPARTMENT: &str = "DEPARTMENT OF CALIFORNIA HIGHWAY PATROL";
pub const FORM_TITLE: &str = "BUS MAINTENANCE & SAFETY INSPECTION";
pub const APPENDIX_TITLE: &str = "REPAIRS AND DEFICIENCIES CORRECTED";

/// Form number and revision, printed in the header and every footer
pub const FORM_REVISION: &str = "CHP 108A (Rev. 7-05) OPI 062";

/// Marks the checklist items required by the Vehicle Code
pub const CVC_NOTE: &str = "* Inspection of these items meet the minimum requirements of 34505 CVC";

pub const REPRODUCTION_NOTICE: &str =
    "Form may be reproduced privately\u{2014}bulk supplies are not available from the CHP";

pub const CHECKLIST_INSTRUCTIONS: &str = "(Mark OK or DEF for each month)";

/// Shown in a signed block whose image could not be embedded
pub const SIGNED_FALLBACK: &str = "[Signed]";
