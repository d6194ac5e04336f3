//! Stochastic inventory cost

use ndarray::{Array1, Array2};

const ORDER_COST: f64 = 1.0;
const BACKORDER_COST: f64 = 1.5;
const HOLDING_COST: f64 = 0.1;

/// Average cost of an ordering policy over sampled demand scenarios.
///
/// `x[w]` is the quantity ordered in week `w`; each row of `demands` is one
/// scenario giving the demand of every week. Unsold stock carries over to the
/// next week, unmet demand is charged as a backorder.
pub fn inventory_cost(x: &Array1<f64>, demands: &Array2<f64>) -> f64 {
    if demands.nrows() == 0 {
        return 0.0;
    }
    let mut total = 0.0;
    for scenario in demands.rows() {
        let mut stock = 0.0f64;
        for (&order, &demand) in x.iter().zip(scenario.iter()) {
            let available = stock + order;
            total += ORDER_COST * order
                + BACKORDER_COST * (demand - available).max(0.0)
                + HOLDING_COST * (available - demand).max(0.0);
            stock = (available - demand).max(0.0);
        }
    }
    total / demands.nrows() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_exact_orders_only_pay_order_cost() {
        let x = array![10.0, 20.0];
        let demands = array![[10.0, 20.0]];
        assert_relative_eq!(inventory_cost(&x, &demands), 30.0);
    }

    #[test]
    fn test_shortage_and_surplus() {
        let x = array![5.0, 0.0];
        // week 1: short 5 -> 1.5 * 5; week 2: short 4 -> 1.5 * 4
        let demands = array![[10.0, 4.0]];
        assert_relative_eq!(inventory_cost(&x, &demands), 5.0 + 7.5 + 6.0);

        let x = array![12.0, 0.0];
        // week 1: surplus 2 carried over, covers 2 of week 2's demand of 3
        let demands = array![[10.0, 3.0]];
        assert_relative_eq!(inventory_cost(&x, &demands), 12.0 + 0.2 + 1.5);
    }

    #[test]
    fn test_averages_over_scenarios() {
        let x = array![1.0];
        let demands = array![[1.0], [3.0]];
        assert_relative_eq!(inventory_cost(&x, &demands), (1.0 + 4.0) / 2.0);
    }
}
