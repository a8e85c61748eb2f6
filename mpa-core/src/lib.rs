pub mod batcher;
pub mod dates;
pub mod locate;
pub mod region;
pub mod selection;
