//! Product catalog core: normalize heterogeneous product metadata into a
//! canonical color and capacity, filter by those fields and build the
//! distributions that feed the charts.

pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod normalizer;
pub mod record;
pub mod seed;

pub use catalog::{Catalog, Snapshot, add_record};
pub use error::CatalogError;
pub use normalizer::normalize;
pub use record::{
    CanonicalProduct, ChartField, FilterState, HistogramEntry, NOT_AVAILABLE, RawProduct,
};
