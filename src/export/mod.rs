pub mod foundry;

pub use foundry::{export_shop, suggested_filename};
