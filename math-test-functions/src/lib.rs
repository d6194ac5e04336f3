//! Benchmark objective functions for exercising global optimizers.
//!
//! Every scalar function takes an `&Array1<f64>` and returns `f64`. The
//! metadata table records the usual search box, the known global minima and,
//! for constrained problems, the constraint functions.

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Scalar test function signature
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a test function including bounds, constraints, and other properties
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// Bounds for each dimension (min, max)
    pub bounds: Vec<(f64, f64)>,
    /// Global minima locations and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    /// Inequality constraint functions (should be <= 0 when satisfied)
    pub inequality_constraints: Vec<TestFunction>,
    /// Equality constraint functions (should be = 0 when satisfied)
    pub equality_constraints: Vec<TestFunction>,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
    /// Typical dimension(s) for the function
    pub dimensions: Vec<usize>,
}

/// Get metadata for all scalar test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    metadata.insert(
        "ackley".to_string(),
        FunctionMetadata {
            name: "ackley".to_string(),
            bounds: vec![(-32.768, 32.768); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            inequality_constraints: vec![],
            equality_constraints: vec![],
            description: "Multimodal Ackley function with many local minima".to_string(),
            multimodal: true,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "hock_schittkowsky_71".to_string(),
        FunctionMetadata {
            name: "hock_schittkowsky_71".to_string(),
            bounds: vec![(1.0, 5.0); 4],
            global_minima: vec![(vec![1.0, 4.742_999_4, 3.821_150_3, 1.379_408_2], 17.014_017_3)],
            inequality_constraints: vec![hock_schittkowsky_71_ineq as TestFunction],
            equality_constraints: vec![hock_schittkowsky_71_eq as TestFunction],
            description: "Hock-Schittkowsky #71, one equality and one inequality constraint"
                .to_string(),
            multimodal: false,
            dimensions: vec![4],
        },
    );

    metadata.insert(
        "quadratic".to_string(),
        FunctionMetadata {
            name: "quadratic".to_string(),
            bounds: vec![(-5.0, 5.0); 2],
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            inequality_constraints: vec![],
            equality_constraints: vec![],
            description: "Convex quadratic bowl".to_string(),
            multimodal: false,
            dimensions: vec![2],
        },
    );

    metadata.insert(
        "rosenbrock".to_string(),
        FunctionMetadata {
            name: "rosenbrock".to_string(),
            bounds: vec![(-5.0, 10.0); 2],
            global_minima: vec![(vec![1.0, 1.0], 0.0)],
            inequality_constraints: vec![],
            equality_constraints: vec![],
            description: "Classic Rosenbrock banana function".to_string(),
            multimodal: false,
            dimensions: vec![2],
        },
    );

    metadata
}

/// Look up a scalar function by name (case-insensitive).
pub fn get_function(function_name: &str) -> Option<TestFunction> {
    match function_name.to_lowercase().as_str() {
        "ackley" => Some(ackley as TestFunction),
        "hock_schittkowsky_71" | "hs71" => Some(hock_schittkowsky_71 as TestFunction),
        "quadratic" | "sphere" => Some(quadratic as TestFunction),
        "rosenbrock" => Some(rosenbrock as TestFunction),
        _ => None,
    }
}

/// Get bounds for a function by name
pub fn get_function_bounds(function_name: &str) -> Option<Vec<(f64, f64)>> {
    let metadata = get_function_metadata();
    metadata.get(function_name).map(|meta| meta.bounds.clone())
}

/// Bounds for `dim` dimensions, repeating the function's first bound pair
/// when the metadata is recorded for a different dimension.
/// Returns `default_bounds` for every dimension if the function is unknown.
pub fn get_function_bounds_vec(
    function_name: &str,
    dim: usize,
    default_bounds: (f64, f64),
) -> Vec<(f64, f64)> {
    match get_function_bounds(function_name) {
        Some(bounds) if bounds.len() == dim => bounds,
        Some(bounds) if !bounds.is_empty() => vec![bounds[0]; dim],
        _ => vec![default_bounds; dim],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_function_minima() {
        for (name, meta) in get_function_metadata() {
            let f = get_function(&name).expect("every metadata entry has a function");
            for (coords, expected) in &meta.global_minima {
                let value = f(&Array1::from_vec(coords.clone()));
                assert!(
                    (value - expected).abs() < 1e-5,
                    "{name}: expected {expected} at {coords:?}, got {value}"
                );
            }
        }
    }

    #[test]
    fn test_bounds_vec_resizes() {
        let b = get_function_bounds_vec("rosenbrock", 25, (-1.0, 1.0));
        assert_eq!(b.len(), 25);
        assert!(b.iter().all(|&p| p == (-5.0, 10.0)));

        let b = get_function_bounds_vec("nope", 3, (-1.0, 1.0));
        assert_eq!(b, vec![(-1.0, 1.0); 3]);
    }

    #[test]
    fn test_lookup_aliases() {
        assert!(get_function("sphere").is_some());
        assert!(get_function("HS71").is_some());
        assert!(get_function("unknown").is_none());
    }
}
