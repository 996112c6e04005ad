pub use super::giveaway::Entity as Giveaway;
pub use super::poll::Entity as Poll;
pub use super::reminder::Entity as Reminder;
