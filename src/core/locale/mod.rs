//! Locale catalogs: the nested key/value tree model and catalog discovery.
//!
//! - `tree`: flatten / unflatten / deep merge / key diff over catalog trees
//! - `catalog`: finding languages and parsing JSON/YAML catalog files

pub mod catalog;
pub mod tree;

pub use catalog::{CatalogFile, CatalogFormat, CatalogTree, LanguageCatalogs, LocaleSet, load_locale_set};
pub use tree::{FlatKeys, KeyDiff, NOT_TRANSLATED_MARKER, deep_merge, diff_keys, flatten, unflatten};
