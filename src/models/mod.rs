pub mod analysis;
pub mod composite;
pub mod data_uri;
pub mod generation;
pub mod prompt;
pub mod safety;
pub mod wire;

pub use analysis::*;
pub use composite::*;
pub use data_uri::*;
pub use generation::*;
pub use prompt::*;
pub use safety::*;
