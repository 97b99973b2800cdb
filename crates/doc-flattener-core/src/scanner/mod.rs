pub mod eligibility;
pub mod walk;

pub use eligibility::{read_entries, EligibilityFilter, EntryError, EntryInfo, EntryKind, RawEntry};
pub use walk::{ScanResult, ScanSkip, TreeScanner};

use crate::CONSOLIDATION_EXTENSION;

/// True when `name` ends in `.pdf`, ignoring case.
pub fn has_consolidation_extension(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.strip_suffix(CONSOLIDATION_EXTENSION)
        .is_some_and(|stem| stem.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match() {
        assert!(has_consolidation_extension("report.pdf"));
        assert!(has_consolidation_extension("REPORT.PDF"));
        assert!(has_consolidation_extension("Mixed.Pdf"));
        assert!(has_consolidation_extension(".pdf"));
        assert!(!has_consolidation_extension("report.pdf.txt"));
        assert!(!has_consolidation_extension("reportpdf"));
        assert!(!has_consolidation_extension("pdf"));
    }
}
