pub use serde_with;

pub mod fence;
pub mod live;
pub mod location;

pub trait ExampleData {
    fn example_data() -> Self;
}
