use super::*;

#[test]
fn test_quantile_linear_interpolates() {
    let v = vec![1.0, 2.0, 3.0, 10.0];
    assert_eq!(quantile_linear(&v, 0.75), 4.75);
    assert_eq!(quantile_linear(&v, 0.5), 2.5);
    assert_eq!(quantile_linear(&[5.0], 0.9), 5.0);
}

#[test]
fn test_quantile_order_independent_and_ignores_nan() {
    let v = vec![10.0, f64::NAN, 3.0, 1.0, 2.0, f64::NAN];
    assert_eq!(quantile_linear(&v, 0.75), 4.75);
}

#[test]
fn test_quantile_on_exact_order_statistic() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(quantile_linear(&v, 0.5), 3.0);
    assert_eq!(quantile_linear(&v, 0.25), 2.0);
}

#[test]
fn test_quantile_all_missing_is_nan() {
    assert!(quantile_linear(&[f64::NAN, f64::NAN], 0.5).is_nan());
    assert!(quantile_linear(&[], 0.5).is_nan());
}

#[test]
fn test_format_expression() {
    assert_eq!(format_expression(3.0), "3.0");
    assert_eq!(format_expression(4.75), "4.75");
    assert_eq!(format_expression(0.1), "0.1");
    assert_eq!(format_expression(f64::NAN), "");
}

#[test]
fn test_format_expression_exponent_padding() {
    assert_eq!(format_expression(1e-5), "1e-05");
    assert_eq!(format_expression(2.5e-7), "2.5e-07");
    assert_eq!(format_expression(1e16), "1e+16");
    assert_eq!(format_expression(0.0001), "0.0001");
    assert_eq!(format_expression(123456.5), "123456.5");
}

#[test]
fn test_format_sig4() {
    assert_eq!(format_sig4(4.75), "4.75");
    assert_eq!(format_sig4(10.0), "10");
    assert_eq!(format_sig4(123.456), "123.5");
    assert_eq!(format_sig4(0.0001234), "0.0001234");
    assert_eq!(format_sig4(12346.0), "1.235e+04");
    assert_eq!(format_sig4(0.00001), "1e-05");
    assert_eq!(format_sig4(f64::NAN), "nan");
    assert_eq!(format_sig4(0.0), "0");
}

#[test]
fn test_format_quantile() {
    assert_eq!(format_quantile(0.75), "0.75");
    assert_eq!(format_quantile(0.5), "0.50");
}
