pub mod resolver;

pub use resolver::{ResolvedStyle, StyleResolution, StyleTable};
