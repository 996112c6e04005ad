mod giveaway;
mod poll;
mod reminder;
