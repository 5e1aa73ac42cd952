// OrbitKit: accessible primitives built on the Orbit component model

pub mod components;
pub mod config;
pub mod forwarding;
pub mod primitive;
pub mod token_set;

/// Re-export of common components for convenience
pub mod prelude {
    pub use crate::kit::components::label::{
        use_label_context, Label, LabelContextConsumer, LabelContextValue, LabelProps, Root,
    };
    pub use crate::kit::config::KitConfig;
}
