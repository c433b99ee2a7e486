pub mod geometry;
pub mod labels;
pub mod projection;
pub mod renderer;
pub mod segmenter;

pub use labels::{BoundingBox, LabelOracle, LabelPlacer, PlacedLabel};
pub use projection::{PolarScale, ProjectedPoint, ViewTransform};
pub use renderer::{
    DisplaySettings, LabelKind, MapConfig, MapLayers, MapScene, TextLabel,
};
pub use segmenter::{segment_ring, segment_rings, CoastlineSegment};
