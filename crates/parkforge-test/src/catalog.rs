//! Catalog fixtures.

use parkforge_core::{StallCatalog, StallFootprint, StallTypeSpec, StallVariant};

/// Only the single 90° stall: width 5.3, one connection.
pub fn right_angle_catalog() -> StallCatalog {
    StallCatalog::right_angle_only(StallFootprint::STANDARD)
        .expect("right-angle catalog must be valid")
}

/// The full nine-entry catalog.
pub fn standard_catalog() -> StallCatalog {
    StallCatalog::standard().expect("standard catalog must be valid")
}

/// A 45° double followed by a 90° single.
pub fn double_first_catalog() -> StallCatalog {
    let footprint = StallFootprint::STANDARD;
    let types = vec![
        StallTypeSpec::from_footprint(footprint, 45.0, StallVariant::Double)
            .expect("45° double must be valid"),
        StallTypeSpec::from_footprint(footprint, 90.0, StallVariant::Single)
            .expect("90° single must be valid"),
    ];
    StallCatalog::new(types).expect("catalog is not empty")
}
