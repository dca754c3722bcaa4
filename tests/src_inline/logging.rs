use super::*;

#[test]
fn test_init_is_repeatable() {
    init(false);
    init(true);
    tracing::debug!("logging initialized");
}
