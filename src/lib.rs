pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod entity;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod remote;
pub mod store;
pub mod types;

pub use config::Config;
pub use entity::{Entity, EntityId};
pub use error::{BoardError, Result};
pub use normalize::normalize;
pub use remote::{CollectionClient, HttpCollectionClient, MemoryClient};
pub use store::{
    Draft, FilterContext, ListStore, ListView, LoadOutcome, LoadTicket, PaginationInfo,
    RequestStatus, Stats, Tab,
};
pub use types::Resource;
