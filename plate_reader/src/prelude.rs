pub use crate::{
    load_image, scan, write_table, AbsorbanceMatrix, Error, ErrorKind, GridGeometry, Offset,
    PitchRounding, PlateLayout, PlateScanner, Result, ScanConfig, ScanResult,
};
