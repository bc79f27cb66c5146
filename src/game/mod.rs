// Puzzle generation modules

pub mod builder;
pub mod grid;
pub mod placer;

pub use builder::PuzzleBuilder;
pub use grid::GridAllocator;
pub use placer::WordPlacer;
