pub mod click_target;
pub mod file_card;
pub mod trigger_event;

pub use click_target::{ClickTarget, ElementNode};
pub use file_card::FileCard;
pub use trigger_event::TriggerEvent;
