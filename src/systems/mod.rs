pub mod frame;
pub mod hover;
pub mod link;
pub mod motion;
pub mod selection;
