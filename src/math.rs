//! Decimal-safe arithmetic.

/// Adds two floats without binary floating-point artifacts, for operands
/// with a bounded number of decimal digits.
///
/// Both operands are scaled by ten to the power of the larger decimal-digit
/// count, rounded to integers, added, and scaled back down. The digit count
/// is taken from each operand's shortest display form.
pub fn add_precise(a: f64, b: f64) -> f64 {
    let precision = decimal_digits(a).max(decimal_digits(b));
    let factor = 10f64.powi(precision as i32);
    ((a * factor).round() + (b * factor).round()) / factor
}

fn decimal_digits(value: f64) -> usize {
    let text = value.to_string();
    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.1, 0.2, 0.3)]
    #[case(0.1, 0.25, 0.35)]
    #[case(1.005, 2.004, 3.009)]
    #[case(2.0, 3.0, 5.0)]
    #[case(-0.1, 0.3, 0.2)]
    fn given_decimal_operands_when_adding_then_result_is_exact(
        #[case] a: f64,
        #[case] b: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(add_precise(a, b), expected);
    }

    #[test]
    fn given_operands_with_different_scales_then_larger_scale_wins() {
        // 0.1 has one decimal digit, 0.002 has three; naive f64 addition
        // yields 0.10200000000000001.
        assert_eq!(add_precise(0.1, 0.002), 0.102);
    }
}
