//! Task list core: the canonical task collection, its derived views and the
//! local persistence pipeline. Presentation shells call in through
//! [`commands`] and render from the payloads broadcast via [`events`].

pub mod commands;
pub mod events;
pub mod flush;
pub mod logging;
pub mod models;
pub mod stats;
pub mod storage;
pub mod store;
pub mod view;
