// SPDX-License-Identifier: MPL-2.0
//! `watermark_remover` is a desktop front-end for removing watermarks with a
//! generative image service.
//!
//! The user picks an image, the [`session`] sends it with an instruction to a
//! [`removal`] service, and the result is shown next to the original in a
//! draggable before/after comparison that can be saved to disk.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod icon;
pub mod removal;
pub mod session;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
