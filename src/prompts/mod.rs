// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Prompt rendering from named templates and free-form builders.

pub mod builders;
pub mod error;
pub mod registry;
pub mod service;
pub mod template;

pub use error::PromptError;
pub use registry::{TemplateRegistry, DEFAULT_TEMPLATES};
pub use service::PromptService;
pub use template::Template;
