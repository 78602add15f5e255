pub mod catalog;
pub mod config;
pub mod filter;
pub mod library;
pub mod metrics;
pub mod selector;
pub mod testing;

pub use catalog::{
    BeatSaverClient, BeatSaverConfig, Catalog, CatalogError, CatalogKey, Difficulties, Difficulty,
    Item, Metadata, Stats,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ServerConfig,
};
pub use filter::{accepts, evaluate, FilterCriteria, Rejection};
pub use library::{
    DirectoryLibrary, Library, LibraryConfig, LibraryError, MemoryLibrary, NoLibrary,
};
pub use selector::{KeySampler, RandomSelector, SearchOutcome, SelectorConfig, SelectorError};
