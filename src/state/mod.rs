pub mod app;
pub mod mode;
pub mod model;
pub mod pane;
pub mod snapshot;
pub mod status;

pub use app::App;
pub use model::Model;
pub use snapshot::Snapshot;

/// Which pane is addressed
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}
