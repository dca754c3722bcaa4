pub mod allowlist;
pub mod columns;
pub mod sample_id;
pub mod status;
