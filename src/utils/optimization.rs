//! Bounded simplex search for smoothing-parameter estimation.
//!
//! The smoothing models pick their parameters by minimizing in-sample squared
//! error over a small box-constrained space (two or three parameters, each in
//! an open unit interval). A Nelder-Mead simplex handles that without
//! requiring derivatives of the objective.

/// Tuning knobs for the simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the objective spread across the simplex.
    pub tolerance: f64,
    /// Relative size of the initial simplex around the starting point.
    pub initial_step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOutcome {
    /// Best point found, clamped to the bounds.
    pub point: Vec<f64>,
    /// Objective value at the best point.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the simplex collapsed below the tolerance.
    pub converged: bool,
}

// Standard Nelder-Mead coefficients. The smoothing fits never need these
// tuned, so they are fixed rather than configurable.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimize `objective` over a box, starting from `initial`.
///
/// Every probe point is clamped into `bounds` before evaluation, so the
/// objective never sees an out-of-range parameter.
pub fn minimize_bounded<F>(
    objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    options: SimplexOptions,
) -> SimplexOutcome
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    debug_assert_eq!(n, bounds.len());
    if n == 0 {
        return SimplexOutcome {
            point: vec![],
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let clamp = |point: &[f64]| -> Vec<f64> {
        point
            .iter()
            .zip(bounds.iter())
            .map(|(&x, &(lo, hi))| x.clamp(lo, hi))
            .collect()
    };

    // Initial simplex: the starting point plus one perturbed vertex per axis.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(clamp(initial));
    for axis in 0..n {
        let mut vertex = initial.to_vec();
        let step = if vertex[axis].abs() > 1e-10 {
            options.initial_step * vertex[axis].abs()
        } else {
            options.initial_step
        };
        vertex[axis] += step;
        simplex.push(clamp(&vertex));
    }
    let mut scores: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < options.max_iter {
        iterations += 1;

        // Order vertices best-to-worst.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        if scores[worst] - scores[best] < options.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (i, vertex) in simplex.iter().enumerate() {
            if i != worst {
                for (c, &x) in centroid.iter_mut().zip(vertex.iter()) {
                    *c += x;
                }
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let toward = |from: &[f64], scale: f64| -> Vec<f64> {
            clamp(
                &centroid
                    .iter()
                    .zip(from.iter())
                    .map(|(&c, &x)| c + scale * (c - x))
                    .collect::<Vec<_>>(),
            )
        };

        let reflected = toward(&simplex[worst], REFLECT);
        let reflected_score = objective(&reflected);

        if reflected_score < scores[best] {
            // Keep going in the same direction.
            let expanded = toward(&simplex[worst], REFLECT * EXPAND);
            let expanded_score = objective(&expanded);
            if expanded_score < reflected_score {
                simplex[worst] = expanded;
                scores[worst] = expanded_score;
            } else {
                simplex[worst] = reflected;
                scores[worst] = reflected_score;
            }
            continue;
        }

        if reflected_score < scores[second_worst] {
            simplex[worst] = reflected;
            scores[worst] = reflected_score;
            continue;
        }

        // Contract toward the centroid, from whichever of worst/reflected is
        // better.
        let contracted = if reflected_score < scores[worst] {
            toward(&simplex[worst], REFLECT * CONTRACT)
        } else {
            toward(&simplex[worst], -CONTRACT)
        };
        let contracted_score = objective(&contracted);
        if contracted_score < scores[worst].min(reflected_score) {
            simplex[worst] = contracted;
            scores[worst] = contracted_score;
            continue;
        }

        // Shrink everything toward the best vertex.
        let anchor = simplex[best].clone();
        for (i, vertex) in simplex.iter_mut().enumerate() {
            if i == best {
                continue;
            }
            for (x, &a) in vertex.iter_mut().zip(anchor.iter()) {
                *x = a + SHRINK * (*x - a);
            }
            *vertex = clamp(vertex);
            scores[i] = objective(vertex);
        }
    }

    let best = scores
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    SimplexOutcome {
        point: simplex[best].clone(),
        value: scores[best],
        iterations,
        converged,
    }
}
