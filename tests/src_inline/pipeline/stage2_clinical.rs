use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::model::allowlist::{DEFAULT_KEEP_COLUMNS, default_keep_columns};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_subgroups_clin_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const PATIENT: &str = "#Patient Identifier\tSex\tOverall Survival (Months)\tExtra\n\
#Identifier to uniquely specify a patient.\tSex\tMonths\tExtra\n\
#STRING\tSTRING\tNUMBER\tSTRING\n\
Patient ID\tSex\tOverall Survival Months\tExtra-Field\n\
TCGA-AB-1234\tMale\t12.5\tx\n\
TCGA-AB-5678\tFemale\t030\ty\n";

const SAMPLE: &str = "#Sample annotations\n\
Patient ID\tSample ID\tMutation Count\tSex\tTMB_nonsynonymous\n\
TCGA-AB-1234\tTCGA-AB-1234-01A-TEST\t42\tM\t1.2\n\
TCGA-AB-5678\tTCGA-AB-5678-01\t7\tF\t\n\
TCGA-ZZ-0000\tTCGA-ZZ-0000-01\t3\tF\t\n";

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut t = Table::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        t.push_row(
            row.iter()
                .map(|v| (!v.is_empty()).then(|| v.to_string()))
                .collect(),
        );
    }
    t
}

#[test]
fn test_load_clinical_normalizes_headers() {
    let dir = make_temp_dir();
    let path = dir.join("data_clinical_patient.txt");
    fs::write(&path, PATIENT).unwrap();
    let table = load_clinical(&path).unwrap();
    assert_eq!(
        table.columns,
        vec!["Patient_ID", "Sex", "Overall_Survival_Months", "Extra_Field"]
    );
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.cell(1, 2), Some("030"));
}

#[test]
fn test_join_suffixes_collisions_and_keeps_every_sample() {
    let dir = make_temp_dir();
    let patient_path = dir.join("patient.txt");
    let sample_path = dir.join("sample.txt");
    fs::write(&patient_path, PATIENT).unwrap();
    fs::write(&sample_path, SAMPLE).unwrap();

    let patient = load_clinical(&patient_path).unwrap();
    let sample = load_clinical(&sample_path).unwrap();
    let joined = join_clinical(&sample, &patient).unwrap();

    assert_eq!(
        joined.columns,
        vec![
            "Patient_ID",
            "Sample_ID",
            "Mutation_Count",
            "Sex_sample",
            "TMB_nonsynonymous",
            "Sex_patient",
            "Overall_Survival_Months",
            "Extra_Field",
        ]
    );
    assert_eq!(joined.n_rows(), sample.n_rows());
    assert_eq!(joined.cell(0, 5), Some("Male"));
    assert_eq!(joined.cell(2, 5), None);
    assert_eq!(joined.cell(2, 0), Some("TCGA-ZZ-0000"));
}

#[test]
fn test_repeated_patient_rows_duplicate_samples() {
    let sample = table(&["Patient_ID", "Sample_ID"], &[&["P1", "S1"], &["P2", "S2"]]);
    let patient = table(&["Patient_ID", "Sex"], &[&["P1", "F"], &["P1", "M"], &["P2", "F"]]);
    let joined = join_clinical(&sample, &patient).unwrap();
    assert_eq!(joined.n_rows(), 3);
}

#[test]
fn test_missing_patient_key_is_error() {
    let sample = table(&["Sample_ID"], &[&["S1"]]);
    let patient = table(&["Patient_ID"], &[&["P1"]]);
    let err = join_clinical(&sample, &patient).unwrap_err();
    match err {
        MergeError::MissingColumn { column, table } => {
            assert_eq!(column, "Patient_ID");
            assert_eq!(table, "sample table");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_projection_uses_allow_list_order() {
    let source = table(
        &[
            "Sex",
            "Unlisted",
            "Mutation_Count",
            "Sample_ID",
            "Patient_ID",
            "Diagnosis_Age",
        ],
        &[&["F", "u", "3", "S1", "P1", "61"]],
    );
    let projected = project_columns(&source, &default_keep_columns());
    assert_eq!(
        projected.columns,
        vec!["Patient_ID", "Sample_ID", "Diagnosis_Age", "Mutation_Count", "Sex"]
    );
    assert_eq!(projected.rows[0][0].as_deref(), Some("P1"));
    assert_eq!(projected.rows[0][4].as_deref(), Some("F"));
}

#[test]
fn test_projection_never_leaves_allow_list() {
    let mut columns: Vec<&str> = DEFAULT_KEEP_COLUMNS.iter().rev().copied().collect();
    columns.extend(["Other_A", "Sex_patient", "Sample_ID_x"]);
    let source = table(&columns, &[]);
    let projected = project_columns(&source, &default_keep_columns());
    assert_eq!(projected.columns, default_keep_columns());
    for c in &projected.columns {
        assert!(DEFAULT_KEEP_COLUMNS.contains(&c.as_str()));
    }
}

#[test]
fn test_projection_with_nothing_present_is_empty() {
    let source = table(&["a", "b"], &[&["1", "2"]]);
    let projected = project_columns(&source, &default_keep_columns());
    assert!(projected.columns.is_empty());
    assert_eq!(projected.n_rows(), 1);
}

#[test]
fn test_build_clinical_end_to_end() {
    let dir = make_temp_dir();
    let patient_path = dir.join("patient.txt");
    let sample_path = dir.join("sample.txt");
    fs::write(&patient_path, PATIENT).unwrap();
    fs::write(&sample_path, SAMPLE).unwrap();

    let clinical = build_clinical(&patient_path, &sample_path, &default_keep_columns()).unwrap();
    assert_eq!(
        clinical.columns,
        vec![
            "Patient_ID",
            "Sample_ID",
            "Overall_Survival_Months",
            "TMB_nonsynonymous",
            "Mutation_Count",
        ]
    );
    assert_eq!(clinical.n_rows(), 3);
}
