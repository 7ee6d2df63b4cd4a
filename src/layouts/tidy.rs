mod layout;

pub use layout::Tidy;
