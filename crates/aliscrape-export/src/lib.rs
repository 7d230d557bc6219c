pub mod error;
pub mod shopify;
pub mod writer;

pub use error::ExportError;
pub use shopify::{project, project_batch};
pub use writer::{
    export_bundle, render_commerce_csv, render_json, render_records_csv, save_commerce_csv,
    save_json, save_records_csv, ExportPaths,
};
