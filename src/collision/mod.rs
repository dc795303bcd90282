pub mod broad_phase;
mod contact_solver;
mod manifold;
mod pair;
pub mod narrow_phase;

pub use self::contact_solver::SequentialImpulseSolver;
pub use self::manifold::ContactManifold;
pub use self::pair::CollisionPair;
