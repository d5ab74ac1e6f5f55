pub mod board;
pub mod card;
pub mod column;
pub mod export;
pub mod field_update;
pub mod profile;
pub mod schema;
pub mod search;
pub mod seed;
pub mod store;
pub mod tag;

pub use board::Board;
pub use card::{Card, CardId, CardPatch, NewCard};
pub use column::{Column, ColumnId, Columns};
pub use export::{BoardExporter, BoardImporter, ExportDocument, EXPORT_VERSION};
pub use field_update::FieldUpdate;
pub use profile::{Profile, ProfileId, ProfileRegistry};
pub use schema::{validate_document, SchemaError};
pub use store::{BoardOps, BoardStore};
pub use tag::{NewTag, Tag, TagId, TagPatch};
