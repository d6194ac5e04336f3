//! Benchmark objective functions, one per file.

pub mod ackley;
pub mod hock_schittkowsky_71;
pub mod inventory;
pub mod quadratic;
pub mod rosenbrock;
pub mod zdt1;

pub use ackley::ackley;
pub use hock_schittkowsky_71::{
    hock_schittkowsky_71, hock_schittkowsky_71_eq, hock_schittkowsky_71_ineq,
};
pub use inventory::inventory_cost;
pub use quadratic::quadratic;
pub use rosenbrock::rosenbrock;
pub use zdt1::zdt1;
