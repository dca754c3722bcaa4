/// Clinical fields carried into the merged table, in output order.
pub const DEFAULT_KEEP_COLUMNS: &[&str] = &[
    "Patient_ID",
    "Sample_ID",
    "Diagnosis_Age",
    "Neoplasm_Disease_Stage_American_Joint_Committee_on_Cancer_Code",
    "Overall_Survival_Months",
    "Overall_Survival_Status",
    "Disease_Free_Months",
    "Disease_Free_Status",
    "Radiation_Therapy",
    "Neoadjuvant_Therapy_Type_Administered_Prior_To_Resection_Text",
    "TMB_nonsynonymous",
    "MSIsensor_Score",
    "MSI_MANTIS_Score",
    "Aneuploidy_Score",
    "Mutation_Count",
    "Sex",
    "Race_Category",
    "Ethnicity_Category",
    "Progress_Free_Survival_Months",
    "Progression_Free_Status",
    "Fraction_Genome_Altered",
];

pub fn default_keep_columns() -> Vec<String> {
    DEFAULT_KEEP_COLUMNS.iter().map(|s| s.to_string()).collect()
}
