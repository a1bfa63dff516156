pub mod traits;
pub mod dijkstra;
pub mod yen;
pub mod kisp;

pub use traits::{KShortestPathAlgorithm, KShortestPaths, ShortestPathAlgorithm, ShortestPathResult};
