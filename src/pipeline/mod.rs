pub mod join;
pub mod stage1_label;
pub mod stage2_clinical;
pub mod stage3_merge;
