pub mod lookup;
pub mod registry;

pub use lookup::ServiceResearchLookup;
pub use registry::Registry;
