//! askmap-cli
//! ==========
//!
//! Command-line interface for `askmap-core`.
//!
//! This crate primarily provides a binary (`askmap`). The library target
//! exists so that docs.rs renders an overview page.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install askmap-cli
//! export GEMINI_API_KEY=...
//! askmap --help
//! askmap suggest ger
//! askmap ask "longest rivers in South America"
//! askmap highlight peru
//! askmap listen
//! askmap stats
//! ```
//!
//! Every global option can also come from the environment (`ASKMAP_*`,
//! `GEMINI_API_KEY`) or a `.env` file in the working directory.
//!
//! For programmatic access use the [`askmap-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
