use crate::data::model::{ListingTable, NumericField};

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation between numeric listing fields.
/// Symmetric with a unit diagonal; computed once at startup.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    fields: Vec<NumericField>,
    /// Row-major, `fields.len()` squared.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn compute(table: &ListingTable, fields: &[NumericField]) -> Self {
        let columns: Vec<Vec<f64>> = fields
            .iter()
            .map(|&field| table.listings.iter().map(|l| field.value(l)).collect())
            .collect();

        let n = fields.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(&columns[i], &columns[j]);
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        CorrelationMatrix {
            fields: fields.to_vec(),
            values,
        }
    }

    pub fn fields(&self) -> &[NumericField] {
        &self.fields
    }

    /// Coefficient for the field pair at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.fields.len() + col]
    }
}

/// Pearson correlation coefficient of two equal-length samples.
/// Returns 0.0 when either sample has zero variance or fewer than two points.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n < 2 {
        return 0.0;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}

// ---------------------------------------------------------------------------
// Box-plot statistics
// ---------------------------------------------------------------------------

/// Five-number summary feeding a box element: whiskers at the furthest
/// points within 1.5·IQR of the quartiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub quartile1: f64,
    pub median: f64,
    pub quartile3: f64,
    pub upper_whisker: f64,
}

impl BoxStats {
    /// Compute the summary of a non-empty sample. Returns None for an
    /// empty one.
    pub fn of(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let quartile1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let quartile3 = percentile(&sorted, 0.75);

        let iqr = quartile3 - quartile1;
        let lo_fence = quartile1 - 1.5 * iqr;
        let hi_fence = quartile3 + 1.5 * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= lo_fence)
            .unwrap_or(quartile1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= hi_fence)
            .unwrap_or(quartile3);

        Some(BoxStats {
            lower_whisker,
            quartile1,
            median,
            quartile3,
            upper_whisker,
        })
    }
}

/// Linear-interpolated percentile of an already sorted sample, p in [0, 1].
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = p * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AnimalPolicy, Furniture, Listing, ListingTable};

    fn listing(area: f64, rooms: i64, rent: f64) -> Listing {
        Listing {
            city: "A".to_string(),
            area,
            rooms,
            bathroom: 1,
            parking_spaces: 0,
            hoa: 100.0,
            rent,
            total: rent + 100.0,
            animal: AnimalPolicy::Accept,
            furniture: Furniture::Furnished,
        }
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let table = ListingTable::from_listings(vec![
            listing(40.0, 1, 1200.0),
            listing(70.0, 2, 2500.0),
            listing(55.0, 2, 1700.0),
            listing(120.0, 4, 6000.0),
        ]);
        let matrix = CorrelationMatrix::compute(&table, &NumericField::ALL);

        let n = matrix.fields().len();
        for i in 0..n {
            assert_eq!(matrix.get(i, i), 1.0);
            for j in 0..n {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!(matrix.get(i, j).abs() <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn pearson_detects_exact_linear_relationships() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
        let down: Vec<f64> = x.iter().map(|v| -2.0 * v).collect();

        assert!((pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_of_constant_sample_is_zero() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(pearson(&x, &y), 0.0);
    }

    #[test]
    fn box_stats_on_known_sample() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = BoxStats::of(&values).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.quartile1, 2.0);
        assert_eq!(stats.quartile3, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 5.0);
    }

    #[test]
    fn box_stats_whiskers_exclude_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        let stats = BoxStats::of(&values).unwrap();
        assert!(stats.upper_whisker < 100.0);
        assert!(BoxStats::of(&[]).is_none());
    }

    #[test]
    fn box_stats_of_single_value_collapses() {
        let stats = BoxStats::of(&[7.0]).unwrap();
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.lower_whisker, 7.0);
        assert_eq!(stats.upper_whisker, 7.0);
    }
}
