pub mod db;

pub use db::{Result, StoreError};
