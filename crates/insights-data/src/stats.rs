//! Pearson correlation over the columns compared by the heatmap.

use insights_core::models::CorrelationMatrix;

/// Pearson correlation coefficient of two equally long series.
///
/// Returns `None` when the lengths differ, fewer than two points are given,
/// or either series has no spread.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    if is_constant(xs) || is_constant(ys) {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = var_x.sqrt() * var_y.sqrt();
    if denom == 0.0 {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

/// `true` when every value equals the first (or the slice is empty).
///
/// Exact comparison: a column of identical cells must be degenerate even
/// when its floating-point mean is off by an ulp.
pub fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}

/// Build the symmetric 3×3 matrix for three equally long columns.
///
/// The upper triangle is computed and mirrored; the diagonal is fixed at
/// `1.0`. On failure returns the index of the first column with no spread.
pub fn correlation_matrix(columns: [&[f64]; 3]) -> Result<CorrelationMatrix, usize> {
    if let Some(idx) = columns.iter().position(|c| c.len() < 2 || is_constant(c)) {
        return Err(idx);
    }

    let mut values = [[1.0; 3]; 3];
    for i in 0..3 {
        for j in (i + 1)..3 {
            let r = pearson(columns[i], columns[j]).ok_or(i)?;
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    Ok(CorrelationMatrix { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!(approx(r, 1.0), "r = {r}");
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let r = pearson(&[1.0, 2.0, 3.0], &[30.0, 20.0, 10.0]).unwrap();
        assert!(approx(r, -1.0), "r = {r}");
    }

    #[test]
    fn test_pearson_known_value() {
        // Hand-computed: cov = 2, var_x = 2, var_y = 8/3 → r = 2 / sqrt(16/3).
        let r = pearson(&[1.0, 2.0, 3.0], &[1.0, 3.0, 3.0]).unwrap();
        let expected = 2.0 / (16.0_f64 / 3.0).sqrt();
        assert!(approx(r, expected), "r = {r}, expected {expected}");
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert!(pearson(&[1.0], &[2.0]).is_none());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_none());
        assert!(pearson(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[]));
        assert!(is_constant(&[0.1 + 0.2, 0.1 + 0.2]));
        assert!(!is_constant(&[1.0, 1.0, 1.0000001]));
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let high = [105.0, 110.0, 107.0, 111.0];
        let low = [100.0, 108.0, 101.0, 109.0];
        let volume = [1000.0, 1500.0, 900.0, 2000.0];

        let m = correlation_matrix([&high, &low, &volume]).unwrap();
        assert!(m.is_symmetric());
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert!((-1.0..=1.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn test_matrix_reports_first_degenerate_column() {
        let high = [1.0, 2.0, 3.0];
        let low = [0.5, 0.5, 0.5];
        let volume = [7.0, 7.0, 7.0];
        assert_eq!(correlation_matrix([&high, &low, &volume]), Err(1));
    }

    #[test]
    fn test_matrix_single_row_is_degenerate() {
        assert_eq!(correlation_matrix([&[1.0], &[2.0], &[3.0]]), Err(0));
    }
}
