/// Length of the sample-level prefix of a TCGA-style barcode
/// (`TCGA-XX-XXXX-01A`); later characters identify aliquots.
pub const SAMPLE_ID_PREFIX_LEN: usize = 15;

pub fn truncate_sample_id(id: &str) -> String {
    id.chars().take(SAMPLE_ID_PREFIX_LEN).collect()
}

/// Join key for a sample identifier cell: surrounding whitespace removed,
/// then truncated. Both sides of every sample-keyed join go through here.
pub fn sample_key(id: &str) -> String {
    truncate_sample_id(id.trim())
}
