// OrbitKit component module organization

// Form labelling
pub mod label;

// Re-export commonly used components
pub use label::{
    use_label_context, Label, LabelContextConsumer, LabelContextValue, LabelProps, Root,
};
