// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for outcomes outside the main workflow: file read
//! failures, saved downloads and settings problems.
//!
//! Success and info toasts disappear after a few seconds, warnings stay a
//! little longer and errors wait for the user. At most three are visible;
//! the rest queue.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
