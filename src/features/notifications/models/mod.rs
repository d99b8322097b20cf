mod notification;

pub use notification::{Notification, Recipient};
