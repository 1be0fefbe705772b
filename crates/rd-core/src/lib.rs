pub mod css;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod record;
pub mod render;
pub mod scene;
pub mod serializer;
pub mod settings;
pub mod store;
pub mod table;

pub use error::{LoadError, SaveError};
pub use geometry::{GridSettings, MIN_COMPONENT_SIZE, snap};
pub use id::ComponentId;
pub use model::*;
pub use record::{Measurement, Project, Record, RecordCursor};
pub use render::{Rendered, render, render_component};
pub use scene::Scene;
pub use settings::{EditorSettings, Theme};
pub use store::{KeyValueStore, MemoryStore};
pub use table::MeasurementTable;

// Re-export kurbo geometry so downstream crates share one version.
pub use kurbo::{Point, Rect};
