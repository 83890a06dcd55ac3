pub mod states;

pub use states::Entity as States;
pub use states::Model as StateRow;
