//! Parsed-description types and the resource tree builder.

mod build;
mod load;
mod media_type;
mod path;
mod security;
mod types;

pub use build::{base_uri_parameters, ResourceTree, ROOT_PATH};
pub use load::{load_document, load_model};
pub use media_type::media_type_extensions;
pub use path::{extract_parameters, fill_template, resource_name, split_path};
pub use security::{resolve_secured_by, ANONYMOUS_SCHEME};
pub use types::{
    MethodDefinition, RamlDocument, ResourceNode, SecuredBy, SecurityScheme, UriParameters,
};
