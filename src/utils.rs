//! Utility functions for the ghostbuster crate

use rand::{Rng, distr::StandardUniform, prelude::IndexedRandom};

/// Totals below this are treated as a collapsed distribution.
pub const DEGENERATE_TOTAL: f64 = 1e-12;

/// Calculate Shannon entropy from a probability distribution.
///
/// The Shannon entropy is calculated as: H = -Σ(p * ln(p)) for p > 0
///
/// # Examples
///
/// ```
/// use ghostbuster::utils::shannon_entropy;
///
/// let entropy = shannon_entropy(vec![0.5, 0.5]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// let entropy = shannon_entropy(vec![1.0, 0.0, 0.0]);
/// assert!(entropy.abs() < 0.001);
/// ```
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Normalize weights to probabilities, returning `None` for a collapsed total.
///
/// # Examples
///
/// ```
/// use ghostbuster::utils::normalize_weights;
///
/// assert_eq!(normalize_weights(vec![1.0, 3.0]), Some(vec![0.25, 0.75]));
/// assert_eq!(normalize_weights(vec![0.0, 0.0]), None);
/// ```
pub fn normalize_weights<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || !total.is_finite() || total <= DEGENERATE_TOTAL {
        return None;
    }
    Some(weights.iter().map(|&w| w / total).collect())
}

/// Uniform distribution over the entries flagged in `support`; zero elsewhere.
///
/// Returns `None` when nothing is flagged.
pub fn uniform_over(support: &[bool]) -> Option<Vec<f64>> {
    let count = support.iter().filter(|&&kept| kept).count();
    if count == 0 {
        return None;
    }
    let each = 1.0 / count as f64;
    Some(
        support
            .iter()
            .map(|&kept| if kept { each } else { 0.0 })
            .collect(),
    )
}

/// Round to a fixed number of decimal places.
///
/// # Examples
///
/// ```
/// use ghostbuster::utils::round_to;
///
/// assert_eq!(round_to(0.126, 2), 0.13);
/// assert_eq!(round_to(1.0, 2), 1.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Performs weighted random sampling from a collection of items.
///
/// Draws a threshold in `[0, total)` and walks the items subtracting weights
/// until it crosses zero. All-zero weights fall back to a uniform choice.
/// Returns `None` only for an empty slice.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use ghostbuster::utils::weighted_sample;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let items = vec![((0, 0), 0.0), ((0, 1), 1.0)];
/// assert_eq!(weighted_sample(&mut rng, &items), Some((0, 1)));
/// ```
pub fn weighted_sample<R, T, W>(rng: &mut R, items: &[(T, W)]) -> Option<T>
where
    R: Rng,
    T: Clone,
    W: Into<f64> + Copy,
{
    if items.is_empty() {
        return None;
    }

    let total: f64 = items.iter().map(|(_, w)| (*w).into()).sum();
    if total <= 0.0 {
        return items.choose(rng).map(|(item, _)| item.clone());
    }

    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;
    for (item, weight) in items {
        let w = (*weight).into();
        if threshold < w {
            return Some(item.clone());
        }
        threshold -= w;
    }

    // numerical slack
    items
        .iter()
        .rev()
        .find(|(_, w)| (*w).into() > 0.0)
        .map(|(item, _)| item.clone())
}
