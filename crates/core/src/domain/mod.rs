pub mod crop;
pub mod location;
pub mod recommendation;
pub mod signals;
