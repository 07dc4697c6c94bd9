pub mod canvas;
pub mod genes;
pub mod snapshot;
pub mod vector;

pub use canvas::*;
pub use genes::*;
pub use snapshot::*;
pub use vector::*;
