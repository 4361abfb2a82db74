mod area;
mod connect_four;

pub use area::{AreaController, AreaEvents, GameArea};
pub use connect_four::{ConnectFourAreaController, ConnectFourEvents};
