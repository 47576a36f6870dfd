//! Request Builder: turns the raw prompt, the strategy selection and an
//! optional step-back answer into one generation instruction.
//!
//! - **Template**: `{placeholder}` substitution with required-placeholder checks
//! - **Builder**: `GenerationRequest` validation and instruction rendering

mod builder;
mod template;


pub use builder::{
    DEFAULT_TEMPLATE, GenerationRequest, LANGUAGE_DIRECTIVE, REQUIRED_PLACEHOLDERS,
    RequestBuilder, validate_prompt, validate_step_back_answer,
};
pub use template::{Template, TemplateError};
