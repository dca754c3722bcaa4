use super::*;

#[test]
fn test_normalization_steps() {
    assert_eq!(normalize_column_name("  Patient ID "), "Patient_ID");
    assert_eq!(normalize_column_name("MSI MANTIS Score"), "MSI_MANTIS_Score");
    assert_eq!(
        normalize_column_name("Progress-Free Survival"),
        "Progress_Free_Survival"
    );
    assert_eq!(
        normalize_column_name("Diagnosis Age (years)"),
        "Diagnosis_Age_(years)"
    );
}

#[test]
fn test_non_ascii_is_dropped_not_transliterated() {
    assert_eq!(normalize_column_name("Größe"), "Gre");
    assert_eq!(normalize_column_name("TMB\u{00a0}score"), "TMBscore");
    assert_eq!(normalize_column_name("Stage\u{2013}Code"), "StageCode");
}

#[test]
fn test_space_next_to_dropped_char_becomes_underscore() {
    assert_eq!(normalize_column_name("\u{00e9} Sex"), "_Sex");
}

#[test]
fn test_whitespace_exposed_by_dropped_chars_is_trimmed() {
    assert_eq!(normalize_column_name("\u{00e9}\tAge\t\u{00e9}"), "Age");
}

#[test]
fn test_normalization_is_idempotent() {
    let cases = [
        "  Patient ID ",
        "Neoplasm Disease Stage American Joint Committee on Cancer Code",
        "TMB (nonsynonymous)",
        "a-b c-d",
        " \t mixed\u{00e9}-value  ",
        "\u{00e9} Sex",
        "\u{00e9}\t\u{00e9}",
        "",
        "---",
        "\u{00dc}n\u{00ef}c\u{00f6}d\u{00e9} Name",
    ];
    for raw in cases {
        let once = normalize_column_name(raw);
        assert_eq!(normalize_column_name(&once), once, "input {raw:?}");
    }
}

#[test]
fn test_normalize_columns_on_table() {
    let mut table = Table::new(vec!["Sample ID".to_string(), "Patient-ID".to_string()]);
    normalize_columns(&mut table);
    assert_eq!(table.columns, vec!["Sample_ID", "Patient_ID"]);
}
