pub mod cache;
pub mod format;
pub mod fragment;
pub mod insert;
pub mod ranker;
pub mod settings;
pub mod tag_list;
pub mod tagdb;
