use ndarray::{Array1, ArrayView1};

use crate::rng::DeRng;

/// Copies each mutant component with probability `cr`; one uniformly chosen
/// dimension is always taken from the mutant.
pub(crate) fn binomial_crossover(
    target: ArrayView1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut DeRng,
) -> Array1<f64> {
    let n = target.len();
    let jrand = rng.index(n);
    let mut trial = target.to_owned();
    for j in 0..n {
        if j == jrand || rng.uniform() < cr {
            trial[j] = mutant[j];
        }
    }
    trial
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cr_zero_copies_exactly_one() {
        let target = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let mutant = array![10.0, 20.0, 30.0, 40.0, 50.0];
        let mut rng = DeRng::new(42);
        for _ in 0..20 {
            let trial = binomial_crossover(target.view(), &mutant, 0.0, &mut rng);
            let from_mutant = trial.iter().zip(mutant.iter()).filter(|(t, m)| t == m).count();
            assert_eq!(from_mutant, 1);
        }
    }

    #[test]
    fn test_cr_one_copies_everything() {
        let target = array![1.0, 2.0, 3.0];
        let mutant = array![10.0, 20.0, 30.0];
        let mut rng = DeRng::new(1);
        let trial = binomial_crossover(target.view(), &mutant, 1.0, &mut rng);
        assert_eq!(trial, mutant);
    }

    #[test]
    fn test_components_come_from_parents() {
        let target = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let mutant = array![10.0, 20.0, 30.0, 40.0, 50.0];
        let mut rng = DeRng::new(7);
        let trial = binomial_crossover(target.view(), &mutant, 0.5, &mut rng);
        assert_eq!(trial.len(), target.len());
        for j in 0..5 {
            assert!(trial[j] == target[j] || trial[j] == mutant[j]);
        }
    }
}
