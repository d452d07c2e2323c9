pub mod categorizer;
pub mod selector;
pub mod writer;

pub use categorizer::{categorize, category_labels, MISC_CATEGORY};
pub use selector::{select_best, AssetFormat, SelectedAsset};
pub use writer::{
    list_asset_dirs, FlatLookupEntry, LookupEntry, LookupWriter, MaterializeReport, Materializer,
    OrganizeReport, OrganizeWriter,
};
