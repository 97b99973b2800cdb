mod sanitize;

pub use sanitize::{clean_segment, sanitize, strip_hash_suffix};

use crate::model::DirectoryPath;

/// Output file name for the directory at 1-based `index` in the scan order.
///
/// Only the last two sanitized segments are kept, so `a/b/c` and `x/b/c`
/// differ only by index. The index is padded to two digits: listings stay
/// sorted up to 99 artifacts, and `100-…` sorts before `11-…` beyond that.
pub fn artifact_name(path: &DirectoryPath, index: usize) -> String {
    let segments: Vec<String> = path.segments().iter().map(|s| sanitize(s)).collect();
    let label = match segments.as_slice() {
        [] => "Root".to_string(),
        [only] => only.clone(),
        [.., parent, child] => format!("{}-{}", parent, child),
    };
    format!("{:02}-{}.pdf", index, label)
}
